/// Represents a single acquired frame.
///
/// This object is short-lived and must be finalized promptly. Holding a surface
/// texture prevents acquisition of subsequent frames.
pub struct GpuFrame {
    /// Swapchain image; `None` for offscreen targets.
    pub surface_texture: Option<wgpu::SurfaceTexture>,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

impl GpuFrame {
    pub(crate) fn new(
        device: &wgpu::Device,
        view: wgpu::TextureView,
        surface_texture: Option<wgpu::SurfaceTexture>,
    ) -> Self {
        let encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("quadrants frame encoder"),
        });

        Self {
            surface_texture,
            view,
            encoder,
        }
    }

    /// Submits the recorded commands.
    ///
    /// Presentation (window targets) occurs when `surface_texture` is presented
    /// after submission.
    pub(crate) fn submit(self, queue: &wgpu::Queue) {
        queue.submit(std::iter::once(self.encoder.finish()));
        drop(self.view);
        if let Some(texture) = self.surface_texture {
            texture.present();
        }
    }
}
