use wgpu::util::DeviceExt;

use crate::geometry::{
    Quadrant, QUADRANT_COLORS, QUADRANT_COUNT, VERTEX_POSITIONS, VERTICES_PER_QUADRANT,
};
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};
use crate::shader::{ShaderProgram, COLOR_UNIFORM_SIZE};

/// Draws the four colored quadrants.
///
/// All GPU resources are created once in [`new`](Self::new) and never
/// rewritten:
/// - the 32-float vertex table, one 4-vertex strip per quadrant
/// - a uniform buffer with one aligned color slot per quadrant
pub struct QuadrantRenderer {
    program: ShaderProgram,
    vertex_buffer: wgpu::Buffer,
    color_buffer: wgpu::Buffer,
    color_bind_group: wgpu::BindGroup,
    /// Distance between color slots; a multiple of the device's uniform offset alignment.
    color_stride: u32,
}

impl QuadrantRenderer {
    pub fn new(device: &wgpu::Device, program: ShaderProgram) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quadrants vertex buffer"),
            contents: bytemuck::cast_slice(&VERTEX_POSITIONS),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let color_stride = color_slot_stride(device.limits().min_uniform_buffer_offset_alignment);
        let color_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quadrants color ubo"),
            contents: &pack_color_slots(&QUADRANT_COLORS, color_stride),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let (_, binding) = program.info().color_binding;
        let color_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("quadrants color bind group"),
            layout: program.color_layout(),
            entries: &[wgpu::BindGroupEntry {
                binding,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &color_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(COLOR_UNIFORM_SIZE),
                }),
            }],
        });

        log::debug!(
            "quadrant geometry uploaded: {} floats, color stride {color_stride}",
            VERTEX_POSITIONS.len()
        );

        Self {
            program,
            vertex_buffer,
            color_buffer,
            color_bind_group,
            color_stride,
        }
    }

    #[inline]
    pub fn program(&self) -> &ShaderProgram {
        &self.program
    }

    /// Clears `target` to `clear` and draws every quadrant in table order.
    pub fn render(&self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, clear: Color) {
        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("quadrants pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        let vp = ctx.viewport;
        if !vp.is_valid() {
            return;
        }
        rpass.set_viewport(vp.x, vp.y, vp.width, vp.height, 0.0, 1.0);

        let (group, _) = self.program.info().color_binding;
        for quadrant in Quadrant::ALL {
            rpass.set_pipeline(self.program.pipeline());
            rpass.set_bind_group(group, &self.color_bind_group, &[self.color_offset(quadrant)]);
            rpass.set_vertex_buffer(0, self.vertex_buffer.slice(quadrant.byte_offset()..));
            rpass.draw(0..VERTICES_PER_QUADRANT as u32, 0..1);
        }
    }

    /// Dynamic offset selecting `quadrant`'s color slot.
    #[inline]
    fn color_offset(&self, quadrant: Quadrant) -> u32 {
        quadrant.index() as u32 * self.color_stride
    }

    /// Size of the color uniform buffer in bytes.
    #[inline]
    pub fn color_buffer_size(&self) -> u64 {
        self.color_buffer.size()
    }
}

fn color_slot_stride(min_alignment: u32) -> u32 {
    (COLOR_UNIFORM_SIZE as u32).next_multiple_of(min_alignment.max(1))
}

/// Lays `colors` out one per `stride`-byte slot, zero padded.
fn pack_color_slots(colors: &[Color; QUADRANT_COUNT], stride: u32) -> Vec<u8> {
    let stride = stride as usize;
    let mut bytes = vec![0u8; stride * colors.len()];
    for (slot, color) in bytes.chunks_exact_mut(stride).zip(colors) {
        let rgba = color.to_array();
        let src: &[u8] = bytemuck::cast_slice(&rgba);
        slot[..src.len()].copy_from_slice(src);
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::SurfaceDimensions;
    use crate::device::{test_target, FrameTarget, HeadlessGpu, PixelImage};
    use crate::shader::{init_shader_program, FRAGMENT_SOURCE, VERTEX_SOURCE};

    // ── color slots ───────────────────────────────────────────────────────

    #[test]
    fn stride_rounds_up_to_alignment() {
        assert_eq!(color_slot_stride(256), 256);
        assert_eq!(color_slot_stride(16), 16);
        assert_eq!(color_slot_stride(0), 16);
    }

    #[test]
    fn packed_slots_hold_colors_at_stride() {
        let bytes = pack_color_slots(&QUADRANT_COLORS, 256);
        assert_eq!(bytes.len(), 1024);
        for (i, color) in QUADRANT_COLORS.iter().enumerate() {
            let slot = &bytes[i * 256..i * 256 + 16];
            let floats: [f32; 4] = bytemuck::pod_read_unaligned(slot);
            assert_eq!(floats, color.to_array());
            assert!(bytes[i * 256 + 16..(i + 1) * 256].iter().all(|b| *b == 0));
        }
    }

    // ── GPU readback ──────────────────────────────────────────────────────

    fn headless(side: u32) -> Option<HeadlessGpu> {
        test_target(side, side)
    }

    fn draw(gpu: &HeadlessGpu, renderer: &QuadrantRenderer, dims: SurfaceDimensions) -> PixelImage {
        let mut frame = gpu.begin_frame().unwrap();
        {
            let ctx = RenderCtx::new(gpu.device(), gpu.queue(), gpu.format(), dims.viewport());
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            renderer.render(&ctx, &mut target, Color::SLATE);
        }
        gpu.submit(frame);
        gpu.read_pixels().unwrap()
    }

    #[test]
    fn renders_quadrant_colors_at_centers() {
        let Some(gpu) = headless(500) else { return };
        let program =
            init_shader_program(gpu.device(), gpu.format(), VERTEX_SOURCE, FRAGMENT_SOURCE).unwrap();
        let renderer = QuadrantRenderer::new(gpu.device(), program);

        let dims = SurfaceDimensions::default();
        let img = draw(&gpu, &renderer, dims);

        for quadrant in Quadrant::ALL {
            let p = dims.viewport().ndc_to_pixel(quadrant.ndc_bounds().center());
            assert_eq!(
                img.pixel(p.x as u32, p.y as u32),
                Some(quadrant.color().to_rgba8()),
                "{quadrant:?}"
            );
        }
    }

    #[test]
    fn color_buffer_has_one_slot_per_quadrant() {
        let Some(gpu) = headless(8) else { return };
        let program =
            init_shader_program(gpu.device(), gpu.format(), VERTEX_SOURCE, FRAGMENT_SOURCE).unwrap();
        let renderer = QuadrantRenderer::new(gpu.device(), program);

        assert_eq!(renderer.color_buffer_size(), u64::from(renderer.color_stride) * 4);
        assert_eq!(renderer.program().format(), HeadlessGpu::FORMAT);
    }
}
