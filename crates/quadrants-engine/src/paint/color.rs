/// RGBA color with straight (non-premultiplied) alpha, components in `[0, 1]`.
///
/// Values are written to the target unchanged: no sRGB encoding, no blending.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const RED: Color = Color::rgba(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color::rgba(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Color = Color::rgba(0.0, 0.0, 1.0, 1.0);
    pub const YELLOW: Color = Color::rgba(1.0, 1.0, 0.0, 1.0);

    /// Dark blue-gray background behind the quadrants.
    pub const SLATE: Color = Color::rgba(0.1, 0.2, 0.3, 1.0);

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Clear value for a render pass.
    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }

    /// Quantizes to 8-bit unorm the way a `*8Unorm` render target stores it.
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primaries_quantize_exactly() {
        assert_eq!(Color::BLUE.to_rgba8(), [0, 0, 255, 255]);
        assert_eq!(Color::YELLOW.to_rgba8(), [255, 255, 0, 255]);
        assert_eq!(Color::RED.to_rgba8(), [255, 0, 0, 255]);
        assert_eq!(Color::GREEN.to_rgba8(), [0, 255, 0, 255]);
    }

    #[test]
    fn slate_quantizes_to_expected_bytes() {
        assert_eq!(Color::SLATE.to_rgba8(), [26, 51, 77, 255]);
    }

    #[test]
    fn to_rgba8_clamps_out_of_range() {
        assert_eq!(Color::rgba(-1.0, 2.0, 0.5, 1.0).to_rgba8(), [0, 255, 128, 255]);
    }

    #[test]
    fn to_wgpu_widens_components() {
        let c = Color::SLATE.to_wgpu();
        assert_eq!(c.a, 1.0);
        assert!((c.b - 0.3).abs() < 1e-6);
    }
}
