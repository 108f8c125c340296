use super::Vec2;

/// Pixel rectangle of the render target that NDC `[-1, 1]²` is mapped onto.
///
/// Origin is the top-left corner of the surface, +Y down, physical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Maps an NDC position to surface pixel coordinates.
    ///
    /// NDC +Y is up while pixel +Y is down, so the Y axis flips.
    #[inline]
    pub fn ndc_to_pixel(self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            self.x + (ndc.x + 1.0) * 0.5 * self.width,
            self.y + (1.0 - ndc.y) * 0.5 * self.height,
        )
    }
}

/// Drawable canvas size. Always square.
///
/// Mirrors the window: on every resize the side becomes
/// `min(window_width, window_height)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SurfaceDimensions {
    side: u32,
}

impl SurfaceDimensions {
    /// Canvas side used before the first resize event.
    pub const INITIAL_SIDE: u32 = 500;

    #[inline]
    pub const fn square(side: u32) -> Self {
        Self { side }
    }

    /// Square of `logical_side` logical units at `scale_factor` physical
    /// pixels per unit.
    #[inline]
    pub fn logical(logical_side: u32, scale_factor: f64) -> Self {
        Self::square((f64::from(logical_side) * scale_factor).round() as u32)
    }

    /// Largest square that fits a `width x height` window.
    #[inline]
    pub fn fit_window(width: u32, height: u32) -> Self {
        Self::square(width.min(height))
    }

    /// Shrinks the square so it does not exceed a `width x height` target.
    #[inline]
    pub fn clamped_to(self, width: u32, height: u32) -> Self {
        Self::square(self.side.min(width).min(height))
    }

    #[inline]
    pub fn side(self) -> u32 {
        self.side
    }

    #[inline]
    pub fn width(self) -> u32 {
        self.side
    }

    #[inline]
    pub fn height(self) -> u32 {
        self.side
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.side == 0
    }

    /// Square viewport anchored at the surface's top-left corner.
    #[inline]
    pub fn viewport(self) -> Viewport {
        Viewport::new(0.0, 0.0, self.side as f32, self.side as f32)
    }
}

impl Default for SurfaceDimensions {
    fn default() -> Self {
        Self::square(Self::INITIAL_SIDE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── SurfaceDimensions ─────────────────────────────────────────────────

    #[test]
    fn default_is_initial_canvas() {
        let d = SurfaceDimensions::default();
        assert_eq!(d.width(), 500);
        assert_eq!(d.height(), 500);
    }

    #[test]
    fn fit_window_takes_min_side() {
        assert_eq!(SurfaceDimensions::fit_window(800, 600).side(), 600);
        assert_eq!(SurfaceDimensions::fit_window(300, 1024).side(), 300);
        assert_eq!(SurfaceDimensions::fit_window(640, 640).side(), 640);
    }

    #[test]
    fn fit_window_zero_is_empty() {
        assert!(SurfaceDimensions::fit_window(0, 720).is_empty());
    }

    #[test]
    fn clamped_to_smaller_target() {
        let d = SurfaceDimensions::default().clamped_to(400, 900);
        assert_eq!(d.side(), 400);
        assert_eq!(SurfaceDimensions::default().clamped_to(1000, 1000).side(), 500);
    }

    #[test]
    fn logical_side_scales_to_physical() {
        assert_eq!(SurfaceDimensions::logical(500, 1.0).side(), 500);
        assert_eq!(SurfaceDimensions::logical(500, 2.0).side(), 1000);
        assert_eq!(SurfaceDimensions::logical(500, 1.25).side(), 625);
    }

    // ── Viewport ──────────────────────────────────────────────────────────

    #[test]
    fn square_viewport_is_anchored_top_left() {
        let v = SurfaceDimensions::square(600).viewport();
        assert_eq!(v, Viewport::new(0.0, 0.0, 600.0, 600.0));
        assert!(v.is_valid());
    }

    #[test]
    fn ndc_corners_map_to_pixel_corners() {
        let v = Viewport::new(0.0, 0.0, 500.0, 500.0);
        assert_eq!(v.ndc_to_pixel(Vec2::new(-1.0, 1.0)), Vec2::new(0.0, 0.0));
        assert_eq!(v.ndc_to_pixel(Vec2::new(1.0, -1.0)), Vec2::new(500.0, 500.0));
    }

    #[test]
    fn bottom_left_quadrant_center_is_lower_half() {
        // NDC +Y is up, pixel +Y is down.
        let v = Viewport::new(0.0, 0.0, 500.0, 500.0);
        assert_eq!(v.ndc_to_pixel(Vec2::new(-0.5, -0.5)), Vec2::new(125.0, 375.0));
    }

    #[test]
    fn empty_viewport_is_invalid() {
        assert!(!SurfaceDimensions::square(0).viewport().is_valid());
    }
}
