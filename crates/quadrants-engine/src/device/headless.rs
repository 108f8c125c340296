use std::sync::mpsc;

use anyhow::{Context, Result};
use winit::dpi::PhysicalSize;

use super::{FrameTarget, GpuFrame, GpuInit, SurfaceErrorAction};

/// Offscreen frame target: renders into a texture that can be read back.
///
/// Same device setup as [`Gpu`](super::Gpu) minus the window. The color
/// format is fixed to `Rgba8Unorm` so readback bytes are plain RGBA.
pub struct HeadlessGpu {
    _instance: wgpu::Instance,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,

    texture: wgpu::Texture,
    size: PhysicalSize<u32>,
    scale_factor: f64,
}

/// Tightly packed RGBA8 image, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl PixelImage {
    /// Returns the pixel at `(x, y)` (top-left origin), or `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

impl HeadlessGpu {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    /// Creates a device with no surface and an offscreen target of `size`.
    pub async fn new(size: PhysicalSize<u32>, init: GpuInit) -> Result<Self> {
        anyhow::ensure!(size.width > 0 && size.height > 0, "offscreen target has zero size");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let (device, queue) = adapter
            .request_device(&init.device_descriptor())
            .await
            .context("failed to create wgpu device/queue")?;

        let texture = create_target_texture(&device, size);

        log::debug!(
            "headless target ready: {} {}x{}",
            adapter.get_info().name,
            size.width,
            size.height
        );

        Ok(Self {
            _instance: instance,
            adapter,
            device,
            queue,
            texture,
            size,
            scale_factor: 1.0,
        })
    }

    /// Reports `scale_factor` physical pixels per logical unit, as a window
    /// on a HiDPI display would.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    /// Copies the current target contents to the CPU.
    ///
    /// Blocks until the GPU has finished all submitted work. After a
    /// zero-sized resize this is the last texture that was applied.
    pub fn read_pixels(&self) -> Result<PixelImage> {
        let wgpu::Extent3d { width, height, .. } = self.texture.size();
        let unpadded_row = width * 4;
        let padded_row = unpadded_row.next_multiple_of(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT);

        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("quadrants readback buffer"),
            size: u64::from(padded_row) * u64::from(height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("quadrants readback encoder"),
            });

        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        self.queue.submit(std::iter::once(encoder.finish()));

        let slice = buffer.slice(..);
        let (tx, rx) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |res| {
            let _ = tx.send(res);
        });

        self.device
            .poll(wgpu::PollType::wait_indefinitely())
            .context("device poll failed during readback")?;

        rx.recv()
            .context("readback callback dropped")?
            .context("failed to map readback buffer")?;

        let mut data = Vec::with_capacity((unpadded_row * height) as usize);
        {
            let mapped = slice.get_mapped_range();
            for row in mapped.chunks_exact(padded_row as usize) {
                data.extend_from_slice(&row[..unpadded_row as usize]);
            }
        }
        buffer.unmap();

        Ok(PixelImage {
            width,
            height,
            data,
        })
    }
}

impl FrameTarget for HeadlessGpu {
    fn device(&self) -> &wgpu::Device {
        &self.device
    }

    fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    fn format(&self) -> wgpu::TextureFormat {
        Self::FORMAT
    }

    fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size == self.size {
            return;
        }
        self.size = new_size;
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        let current = self.texture.size();
        if (current.width, current.height) != (new_size.width, new_size.height) {
            self.texture = create_target_texture(&self.device, new_size);
        }
    }

    fn begin_frame(&self) -> Result<GpuFrame, wgpu::SurfaceError> {
        let view = self
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        Ok(GpuFrame::new(&self.device, view, None))
    }

    fn submit(&self, frame: GpuFrame) {
        frame.submit(&self.queue);
    }

    fn handle_surface_error(&mut self, err: wgpu::SurfaceError) -> SurfaceErrorAction {
        // Offscreen frames never fail to acquire; anything here is unexpected.
        log::warn!("unexpected surface error on offscreen target: {err:?}");
        SurfaceErrorAction::SkipFrame
    }
}

fn create_target_texture(device: &wgpu::Device, size: PhysicalSize<u32>) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some("quadrants offscreen target"),
        size: wgpu::Extent3d {
            width: size.width,
            height: size.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: HeadlessGpu::FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    })
}

/// Offscreen target for GPU-backed tests.
///
/// Returns `None` with a warning when no adapter is available; the
/// `#[ignore]`d tests that need the readback checks to run use
/// [`require_test_target`] instead.
#[cfg(test)]
pub(crate) fn test_target(width: u32, height: u32) -> Option<HeadlessGpu> {
    crate::logging::init_logging(crate::logging::LoggingConfig::default());
    match pollster::block_on(HeadlessGpu::new(PhysicalSize::new(width, height), GpuInit::default())) {
        Ok(gpu) => Some(gpu),
        Err(e) => {
            log::warn!("no GPU adapter, readback checks not run: {e:#}");
            None
        }
    }
}

#[cfg(test)]
pub(crate) fn require_test_target(width: u32, height: u32) -> HeadlessGpu {
    pollster::block_on(HeadlessGpu::new(PhysicalSize::new(width, height), GpuInit::default()))
        .expect("a GPU adapter is required for this test")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> PixelImage {
        // 2x2: red, green / blue, white
        PixelImage {
            width: 2,
            height: 2,
            data: vec![
                255, 0, 0, 255, 0, 255, 0, 255, //
                0, 0, 255, 255, 255, 255, 255, 255,
            ],
        }
    }

    #[test]
    fn pixel_reads_row_major_top_left() {
        let img = image();
        assert_eq!(img.pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(img.pixel(1, 0), Some([0, 255, 0, 255]));
        assert_eq!(img.pixel(0, 1), Some([0, 0, 255, 255]));
        assert_eq!(img.pixel(1, 1), Some([255, 255, 255, 255]));
    }

    #[test]
    fn pixel_out_of_bounds_is_none() {
        let img = image();
        assert_eq!(img.pixel(2, 0), None);
        assert_eq!(img.pixel(0, 2), None);
    }

    // ── resize ────────────────────────────────────────────────────────────

    #[test]
    fn zero_sized_resize_is_recorded_but_keeps_texture() {
        let Some(mut gpu) = test_target(64, 48) else { return };

        gpu.resize(PhysicalSize::new(0, 48));
        assert_eq!(gpu.size(), PhysicalSize::new(0, 48));
        let img = gpu.read_pixels().unwrap();
        assert_eq!((img.width, img.height), (64, 48));

        gpu.resize(PhysicalSize::new(32, 16));
        assert_eq!(gpu.size(), PhysicalSize::new(32, 16));
        let img = gpu.read_pixels().unwrap();
        assert_eq!((img.width, img.height), (32, 16));
    }

    #[test]
    fn scale_factor_defaults_to_one() {
        let Some(gpu) = test_target(8, 8) else { return };
        assert_eq!(gpu.scale_factor(), 1.0);
        assert_eq!(gpu.with_scale_factor(2.0).scale_factor(), 2.0);
    }
}
