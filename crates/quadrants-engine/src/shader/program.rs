use crate::geometry::VERTEX_STRIDE;

use super::{compile_stage, link_interface, CompiledStage, ProgramInfo, ShaderError, StageKind};

/// Byte size of the color uniform (`vec4<f32>`).
pub const COLOR_UNIFORM_SIZE: u64 = std::mem::size_of::<[f32; 4]>() as u64;

/// Linked program: render pipeline plus the bind group layout of its color
/// uniform.
///
/// The color binding uses a dynamic offset so one buffer can hold a color per
/// draw call.
pub struct ShaderProgram {
    info: ProgramInfo,
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    color_layout: wgpu::BindGroupLayout,
}

impl ShaderProgram {
    /// Links two compiled stages into a pipeline targeting `format`.
    ///
    /// Interface mismatches are logged and returned as [`ShaderError::Link`];
    /// the GPU pipeline is only created once the interface checks pass. Any
    /// validation error wgpu raises while building it is returned the same
    /// way, with wgpu's message as the diagnostic.
    pub fn link(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        vertex: &CompiledStage,
        fragment: &CompiledStage,
    ) -> Result<Self, ShaderError> {
        let info = link_interface(vertex, fragment).inspect_err(|e| {
            log::error!("unable to initialize the shader program: {e}");
        })?;

        // Pipeline validation errors surface through the device; capture
        // them as link failures.
        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let (pipeline, color_layout) = create_pipeline(device, format, vertex, fragment, &info);
        if let Some(err) = pollster::block_on(scope.pop()) {
            let err = ShaderError::link(err.to_string());
            log::error!("unable to initialize the shader program: {err}");
            return Err(err);
        }

        log::info!(
            "shader program linked ({} + {}, {format:?})",
            info.vertex_entry,
            info.fragment_entry
        );

        Ok(Self {
            info,
            format,
            pipeline,
            color_layout,
        })
    }

    #[inline]
    pub fn info(&self) -> &ProgramInfo {
        &self.info
    }

    #[inline]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    #[inline]
    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    #[inline]
    pub fn color_layout(&self) -> &wgpu::BindGroupLayout {
        &self.color_layout
    }
}

/// Creates the shader modules, color bind group layout and render pipeline.
///
/// Validation failures are reported through the device error scope the
/// caller pushed, not returned here.
fn create_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    vertex: &CompiledStage,
    fragment: &CompiledStage,
    info: &ProgramInfo,
) -> (wgpu::RenderPipeline, wgpu::BindGroupLayout) {
    let vs_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("quadrants vertex shader"),
        source: wgpu::ShaderSource::Wgsl(vertex.source().into()),
    });
    let fs_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("quadrants fragment shader"),
        source: wgpu::ShaderSource::Wgsl(fragment.source().into()),
    });

    let (_, color_binding) = info.color_binding;
    let color_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("quadrants color bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: color_binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: true,
                min_binding_size: wgpu::BufferSize::new(COLOR_UNIFORM_SIZE),
            },
            count: None,
        }],
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("quadrants pipeline layout"),
        bind_group_layouts: &[&color_layout],
        immediate_size: 0,
    });

    // Two floats per vertex, tightly packed, not normalized.
    let attributes = [wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x2,
        offset: 0,
        shader_location: info.position_location,
    }];
    let buffers = [wgpu::VertexBufferLayout {
        array_stride: VERTEX_STRIDE,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &attributes,
    }];

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("quadrants pipeline"),
        layout: Some(&pipeline_layout),

        vertex: wgpu::VertexState {
            module: &vs_module,
            entry_point: Some(info.vertex_entry.as_str()),
            compilation_options: Default::default(),
            buffers: &buffers,
        },

        fragment: Some(wgpu::FragmentState {
            module: &fs_module,
            entry_point: Some(info.fragment_entry.as_str()),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleStrip,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    });

    (pipeline, color_layout)
}

/// Passes both stages through only if both compiled.
///
/// A failed stage turns into [`ShaderError::Link`] naming that stage, so the
/// link step is never reached with a missing stage.
pub fn require_stages(
    vertex: Result<CompiledStage, ShaderError>,
    fragment: Result<CompiledStage, ShaderError>,
) -> Result<(CompiledStage, CompiledStage), ShaderError> {
    match (vertex, fragment) {
        (Ok(v), Ok(f)) => Ok((v, f)),
        (Err(_), Ok(_)) => Err(ShaderError::link("vertex stage failed to compile")),
        (Ok(_), Err(_)) => Err(ShaderError::link("fragment stage failed to compile")),
        (Err(_), Err(_)) => Err(ShaderError::link("vertex and fragment stages failed to compile")),
    }
}

/// Compiles both stages and links them into a program.
///
/// Every failure is logged; none panics.
pub fn init_shader_program(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<ShaderProgram, ShaderError> {
    let vertex = compile_stage(StageKind::Vertex, vertex_source);
    let fragment = compile_stage(StageKind::Fragment, fragment_source);

    let (vertex, fragment) = require_stages(vertex, fragment).inspect_err(|e| {
        log::error!("unable to initialize the shader program: {e}");
    })?;

    ShaderProgram::link(device, format, &vertex, &fragment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{test_target, FrameTarget};
    use crate::shader::{FRAGMENT_SOURCE, VERTEX_SOURCE};

    const BROKEN: &str = "@fragment fn fs_main() -> @location(0) vec4<f32> { return u_missing; }";

    #[test]
    fn require_stages_passes_two_successes() {
        let v = compile_stage(StageKind::Vertex, VERTEX_SOURCE);
        let f = compile_stage(StageKind::Fragment, FRAGMENT_SOURCE);
        let (v, f) = require_stages(v, f).unwrap();
        assert_eq!(v.kind(), StageKind::Vertex);
        assert_eq!(f.kind(), StageKind::Fragment);
    }

    #[test]
    fn failed_fragment_short_circuits_to_link_error() {
        let v = compile_stage(StageKind::Vertex, VERTEX_SOURCE);
        let f = compile_stage(StageKind::Fragment, BROKEN);
        assert!(f.is_err());

        let err = require_stages(v, f).unwrap_err();
        assert_eq!(err, ShaderError::link("fragment stage failed to compile"));
    }

    #[test]
    fn both_failed_names_both() {
        let v = compile_stage(StageKind::Vertex, "not wgsl");
        let f = compile_stage(StageKind::Fragment, BROKEN);
        let err = require_stages(v, f).unwrap_err();
        assert!(err.diagnostic().contains("vertex and fragment"));
    }

    #[test]
    fn integer_position_attribute_fails_to_link() {
        let Some(gpu) = test_target(8, 8) else { return };
        let vertex = "@vertex fn vs_main(@location(0) p: vec2<i32>) -> @builtin(position) vec4<f32> {
            return vec4<f32>(vec2<f32>(p), 0.0, 1.0);
        }";

        let err = init_shader_program(gpu.device(), gpu.format(), vertex, FRAGMENT_SOURCE)
            .err()
            .expect("mismatched attribute format must not link");
        assert!(err.is_link());
        assert!(!err.diagnostic().is_empty());
    }

    #[test]
    fn embedded_sources_link_on_device() {
        let Some(gpu) = test_target(8, 8) else { return };
        let program =
            init_shader_program(gpu.device(), gpu.format(), VERTEX_SOURCE, FRAGMENT_SOURCE).unwrap();
        assert_eq!(program.info().position_location, 0);
    }

    #[test]
    fn color_uniform_is_sixteen_bytes() {
        assert_eq!(COLOR_UNIFORM_SIZE, 16);
    }
}
