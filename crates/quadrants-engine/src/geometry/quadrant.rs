use crate::coords::{NdcRect, Vec2};
use crate::paint::Color;

pub const FLOATS_PER_VERTEX: usize = 2;
pub const VERTICES_PER_QUADRANT: usize = 4;
pub const QUADRANT_COUNT: usize = 4;
pub const FLOATS_PER_QUADRANT: usize = FLOATS_PER_VERTEX * VERTICES_PER_QUADRANT;
pub const BYTES_PER_FLOAT: usize = std::mem::size_of::<f32>();

/// Byte distance between consecutive vertices (tightly packed `vec2<f32>`).
pub const VERTEX_STRIDE: u64 = (FLOATS_PER_VERTEX * BYTES_PER_FLOAT) as u64;

/// Four unit quads in NDC, one contiguous block per quadrant.
///
/// Block order follows [`Quadrant::ALL`]. Within a block the corners are in
/// triangle-strip order: `(x0,y0) (x1,y0) (x0,y1) (x1,y1)`.
#[rustfmt::skip]
pub const VERTEX_POSITIONS: [f32; FLOATS_PER_QUADRANT * QUADRANT_COUNT] = [
    // bottom-left
    -1.0, -1.0,
     0.0, -1.0,
    -1.0,  0.0,
     0.0,  0.0,

    // bottom-right
     0.0, -1.0,
     1.0, -1.0,
     0.0,  0.0,
     1.0,  0.0,

    // top-left
    -1.0,  0.0,
     0.0,  0.0,
    -1.0,  1.0,
     0.0,  1.0,

    // top-right
     0.0,  0.0,
     1.0,  0.0,
     0.0,  1.0,
     1.0,  1.0,
];

/// Fill color per vertex block; `QUADRANT_COLORS[i]` paints block `i`.
pub const QUADRANT_COLORS: [Color; QUADRANT_COUNT] =
    [Color::BLUE, Color::YELLOW, Color::RED, Color::GREEN];

/// Screen quadrant, in vertex-table order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Quadrant {
    BottomLeft,
    BottomRight,
    TopLeft,
    TopRight,
}

impl Quadrant {
    /// Draw order. Index `i` here is block `i` of [`VERTEX_POSITIONS`].
    pub const ALL: [Quadrant; QUADRANT_COUNT] = [
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
        Quadrant::TopLeft,
        Quadrant::TopRight,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Quadrant::BottomLeft => 0,
            Quadrant::BottomRight => 1,
            Quadrant::TopLeft => 2,
            Quadrant::TopRight => 3,
        }
    }

    /// The 8 floats (4 strip-ordered vertices) of this quadrant's block.
    #[inline]
    pub fn vertices(self) -> &'static [f32] {
        let start = self.index() * FLOATS_PER_QUADRANT;
        &VERTEX_POSITIONS[start..start + FLOATS_PER_QUADRANT]
    }

    /// Byte offset of this quadrant's block inside the vertex buffer.
    #[inline]
    pub const fn byte_offset(self) -> u64 {
        (self.index() * FLOATS_PER_QUADRANT * BYTES_PER_FLOAT) as u64
    }

    #[inline]
    pub const fn color(self) -> Color {
        QUADRANT_COLORS[self.index()]
    }

    /// Region of clip space this quadrant must cover.
    pub const fn ndc_bounds(self) -> NdcRect {
        match self {
            Quadrant::BottomLeft => NdcRect::new(-1.0, -1.0, 0.0, 0.0),
            Quadrant::BottomRight => NdcRect::new(0.0, -1.0, 1.0, 0.0),
            Quadrant::TopLeft => NdcRect::new(-1.0, 0.0, 0.0, 1.0),
            Quadrant::TopRight => NdcRect::new(0.0, 0.0, 1.0, 1.0),
        }
    }

    /// Area covered by the two triangles a 4-vertex strip emits from this block.
    pub fn strip_coverage(self) -> f32 {
        let v = self.vertices();
        let p = |i| Vec2::from_flat(v, i).unwrap_or_default();
        let tri = |a: Vec2, b: Vec2, c: Vec2| ((b - a).cross(c - a)).abs() * 0.5;
        tri(p(0), p(1), p(2)) + tri(p(1), p(2), p(3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── vertex table ──────────────────────────────────────────────────────

    #[test]
    fn vertex_table_has_32_floats() {
        assert_eq!(VERTEX_POSITIONS.len(), 32);
        assert_eq!(std::mem::size_of_val(&VERTEX_POSITIONS), 128);
    }

    #[test]
    fn blocks_match_quadrant_bounds() {
        for q in Quadrant::ALL {
            let bounds = NdcRect::bounding(q.vertices()).unwrap();
            assert_eq!(bounds, q.ndc_bounds(), "{q:?}");
            assert_eq!(bounds.area(), 1.0, "{q:?}");
        }
    }

    #[test]
    fn blocks_tile_clip_space_without_overlap() {
        let total: f32 = Quadrant::ALL.iter().map(|q| q.ndc_bounds().area()).sum();
        assert_eq!(total, NdcRect::FULL.area());

        for a in Quadrant::ALL {
            assert!(a.ndc_bounds().is_within(NdcRect::FULL));
            for b in Quadrant::ALL {
                if a != b {
                    assert_eq!(a.ndc_bounds().overlap_area(b.ndc_bounds()), 0.0);
                }
            }
        }
    }

    #[test]
    fn strip_order_fills_whole_quad() {
        // Two non-degenerate half-quads: total coverage is the full unit area.
        for q in Quadrant::ALL {
            assert_eq!(q.strip_coverage(), 1.0, "{q:?}");
        }
    }

    // ── offsets ───────────────────────────────────────────────────────────

    #[test]
    fn byte_offsets_skip_one_block_each() {
        let offsets: Vec<u64> = Quadrant::ALL.iter().map(|q| q.byte_offset()).collect();
        assert_eq!(offsets, vec![0, 32, 64, 96]);
        assert_eq!(VERTEX_STRIDE, 8);
    }

    // ── color pairing ─────────────────────────────────────────────────────

    #[test]
    fn colors_pair_by_index() {
        assert_eq!(Quadrant::BottomLeft.color(), Color::BLUE);
        assert_eq!(Quadrant::BottomRight.color(), Color::YELLOW);
        assert_eq!(Quadrant::TopLeft.color(), Color::RED);
        assert_eq!(Quadrant::TopRight.color(), Color::GREEN);
    }

    #[test]
    fn all_is_in_table_order() {
        for (i, q) in Quadrant::ALL.iter().enumerate() {
            assert_eq!(q.index(), i);
        }
    }
}
