use super::Vec2;

/// Axis-aligned rectangle in normalized device coordinates (+Y up).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct NdcRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl NdcRect {
    /// The whole clip-space square `[-1, 1]²`.
    pub const FULL: NdcRect = NdcRect::new(-1.0, -1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min: Vec2::new(min_x, min_y),
            max: Vec2::new(max_x, max_y),
        }
    }

    /// Smallest rectangle containing every point of a flat `[x, y, ..]` slice.
    ///
    /// Returns `None` for an empty slice or one with an odd length.
    pub fn bounding(points: &[f32]) -> Option<Self> {
        if points.is_empty() || points.len() % 2 != 0 {
            return None;
        }

        let mut r = NdcRect {
            min: Vec2::new(f32::INFINITY, f32::INFINITY),
            max: Vec2::new(f32::NEG_INFINITY, f32::NEG_INFINITY),
        };
        for p in points.chunks_exact(2) {
            r.min.x = r.min.x.min(p[0]);
            r.min.y = r.min.y.min(p[1]);
            r.max.x = r.max.x.max(p[0]);
            r.max.y = r.max.y.max(p[1]);
        }
        Some(r)
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn area(self) -> f32 {
        self.width().max(0.0) * self.height().max(0.0)
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// True when `self` lies entirely inside `other` (edges may touch).
    #[inline]
    pub fn is_within(self, other: NdcRect) -> bool {
        self.min.x >= other.min.x
            && self.min.y >= other.min.y
            && self.max.x <= other.max.x
            && self.max.y <= other.max.y
    }

    /// Overlap area with `other`; zero when they only share an edge.
    #[inline]
    pub fn overlap_area(self, other: NdcRect) -> f32 {
        let w = self.max.x.min(other.max.x) - self.min.x.max(other.min.x);
        let h = self.max.y.min(other.max.y) - self.min.y.max(other.min.y);
        if w <= 0.0 || h <= 0.0 { 0.0 } else { w * h }
    }
}
