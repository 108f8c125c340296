use core::ops::{Add, Mul, Sub};

/// 2D point or extent.
///
/// Used both for NDC positions and for surface pixel positions; the owning
/// type says which.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Reads the `index`-th 2D point out of a flat `[x0, y0, x1, y1, ..]` slice.
    #[inline]
    pub fn from_flat(data: &[f32], index: usize) -> Option<Self> {
        let x = *data.get(index * 2)?;
        let y = *data.get(index * 2 + 1)?;
        Some(Self::new(x, y))
    }

    /// Z component of the 3D cross product of `self` and `other`.
    #[inline]
    pub fn cross(self, other: Vec2) -> f32 {
        self.x * other.y - self.y * other.x
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}
