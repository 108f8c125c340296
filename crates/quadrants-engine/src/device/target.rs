use winit::dpi::PhysicalSize;

use super::{GpuFrame, SurfaceErrorAction};

/// Something a frame can be rendered into: a window surface or an offscreen
/// texture.
pub trait FrameTarget {
    fn device(&self) -> &wgpu::Device;

    fn queue(&self) -> &wgpu::Queue;

    /// Color format of the frames handed out by [`begin_frame`](Self::begin_frame).
    fn format(&self) -> wgpu::TextureFormat;

    /// Current drawable size in physical pixels.
    fn size(&self) -> PhysicalSize<u32>;

    /// Physical pixels per logical unit.
    fn scale_factor(&self) -> f64;

    /// Resizes the drawable. Zero-sized requests are recorded but not applied.
    fn resize(&mut self, new_size: PhysicalSize<u32>);

    /// Acquires the next frame and creates an encoder for it.
    fn begin_frame(&self) -> Result<GpuFrame, wgpu::SurfaceError>;

    /// Submits the recorded commands and presents the frame where applicable.
    fn submit(&self, frame: GpuFrame);

    /// Converts a `SurfaceError` into a higher-level action, recovering where possible.
    fn handle_surface_error(&mut self, err: wgpu::SurfaceError) -> SurfaceErrorAction;
}
