use super::{CompiledStage, ShaderError, StageKind};

/// Vertex attribute location of the position input.
pub const POSITION_LOCATION: u32 = 0;

/// `(group, binding)` of the fragment color uniform.
pub const COLOR_UNIFORM_BINDING: (u32, u32) = (0, 0);

/// Interface resolved while linking two stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInfo {
    pub vertex_entry: String,
    pub fragment_entry: String,
    /// Location of the vertex-position attribute.
    pub position_location: u32,
    /// `(group, binding)` of the color uniform.
    pub color_binding: (u32, u32),
}

/// Checks that `vertex` and `fragment` form a valid program.
///
/// Requirements:
/// - each module has exactly one entry point of its stage
/// - the vertex entry consumes the position attribute at [`POSITION_LOCATION`]
/// - the fragment module declares a `vec4<f32>` uniform at [`COLOR_UNIFORM_BINDING`]
/// - every fragment input location is written by the vertex stage
pub fn link_interface(
    vertex: &CompiledStage,
    fragment: &CompiledStage,
) -> Result<ProgramInfo, ShaderError> {
    check_kind(vertex, StageKind::Vertex)?;
    check_kind(fragment, StageKind::Fragment)?;

    let vs_module = vertex.module();
    let fs_module = fragment.module();
    let vs_entry = single_entry_point(vs_module, StageKind::Vertex)?;
    let fs_entry = single_entry_point(fs_module, StageKind::Fragment)?;

    let vs_inputs = input_locations(vs_module, vs_entry);
    if !vs_inputs.contains(&POSITION_LOCATION) {
        return Err(ShaderError::link(format!(
            "vertex entry `{}` has no attribute at @location({POSITION_LOCATION})",
            vs_entry.name
        )));
    }

    if !has_color_uniform(fs_module) {
        let (group, binding) = COLOR_UNIFORM_BINDING;
        return Err(ShaderError::link(format!(
            "fragment stage declares no vec4<f32> uniform at @group({group}) @binding({binding})"
        )));
    }

    let vs_outputs = output_locations(vs_module, vs_entry);
    if let Some(missing) = input_locations(fs_module, fs_entry)
        .into_iter()
        .find(|loc| !vs_outputs.contains(loc))
    {
        return Err(ShaderError::link(format!(
            "fragment input @location({missing}) is not written by the vertex stage"
        )));
    }

    Ok(ProgramInfo {
        vertex_entry: vs_entry.name.clone(),
        fragment_entry: fs_entry.name.clone(),
        position_location: POSITION_LOCATION,
        color_binding: COLOR_UNIFORM_BINDING,
    })
}

fn check_kind(stage: &CompiledStage, expected: StageKind) -> Result<(), ShaderError> {
    if stage.kind() == expected {
        Ok(())
    } else {
        Err(ShaderError::link(format!(
            "{} stage attached in the {expected} slot",
            stage.kind()
        )))
    }
}

fn single_entry_point(
    module: &naga::Module,
    kind: StageKind,
) -> Result<&naga::EntryPoint, ShaderError> {
    let mut entries = module
        .entry_points
        .iter()
        .filter(|ep| ep.stage == kind.naga_stage());

    match (entries.next(), entries.next()) {
        (Some(ep), None) => Ok(ep),
        (None, _) => Err(ShaderError::link(format!(
            "no {} entry point in {kind} stage",
            kind.attribute()
        ))),
        (Some(_), Some(_)) => Err(ShaderError::link(format!(
            "more than one {} entry point in {kind} stage",
            kind.attribute()
        ))),
    }
}

fn input_locations(module: &naga::Module, entry: &naga::EntryPoint) -> Vec<u32> {
    let mut out = Vec::new();
    for arg in &entry.function.arguments {
        collect_locations(module, arg.ty, arg.binding.as_ref(), &mut out);
    }
    out
}

fn output_locations(module: &naga::Module, entry: &naga::EntryPoint) -> Vec<u32> {
    let mut out = Vec::new();
    if let Some(result) = &entry.function.result {
        collect_locations(module, result.ty, result.binding.as_ref(), &mut out);
    }
    out
}

/// Location bindings of a value: either its own binding or, for an unbound
/// struct, the bindings of its members. Builtins are skipped.
fn collect_locations(
    module: &naga::Module,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
    out: &mut Vec<u32>,
) {
    match binding {
        Some(naga::Binding::Location { location, .. }) => out.push(*location),
        Some(_) => {}
        None => {
            if let naga::TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for member in members {
                    if let Some(naga::Binding::Location { location, .. }) = &member.binding {
                        out.push(*location);
                    }
                }
            }
        }
    }
}

fn has_color_uniform(module: &naga::Module) -> bool {
    let (group, binding) = COLOR_UNIFORM_BINDING;
    let vec4f = naga::TypeInner::Vector {
        size: naga::VectorSize::Quad,
        scalar: naga::Scalar::F32,
    };

    module.global_variables.iter().any(|(_, var)| {
        var.space == naga::AddressSpace::Uniform
            && var.binding == Some(naga::ResourceBinding { group, binding })
            && module.types[var.ty].inner == vec4f
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::{compile_stage, FRAGMENT_SOURCE, VERTEX_SOURCE};

    fn vs(src: &str) -> CompiledStage {
        compile_stage(StageKind::Vertex, src).unwrap()
    }

    fn fs(src: &str) -> CompiledStage {
        compile_stage(StageKind::Fragment, src).unwrap()
    }

    fn link_diagnostic(v: &CompiledStage, f: &CompiledStage) -> String {
        match link_interface(v, f).unwrap_err() {
            ShaderError::Link { diagnostic } => diagnostic,
            other => panic!("expected link error, got {other:?}"),
        }
    }

    // ── success ───────────────────────────────────────────────────────────

    #[test]
    fn builtin_stages_link() {
        let info = link_interface(&vs(VERTEX_SOURCE), &fs(FRAGMENT_SOURCE)).unwrap();
        assert_eq!(info.vertex_entry, "vs_main");
        assert_eq!(info.fragment_entry, "fs_main");
        assert_eq!(info.position_location, 0);
        assert_eq!(info.color_binding, (0, 0));
    }

    #[test]
    fn struct_varyings_link() {
        let v = vs("
            struct Out { @builtin(position) pos: vec4<f32>, @location(1) tint: vec4<f32> }
            @vertex fn main(@location(0) p: vec2<f32>) -> Out {
                return Out(vec4<f32>(p, 0.0, 1.0), vec4<f32>(1.0));
            }
        ");
        let f = fs("
            @group(0) @binding(0) var<uniform> c: vec4<f32>;
            @fragment fn main(@location(1) tint: vec4<f32>) -> @location(0) vec4<f32> {
                return c * tint;
            }
        ");
        let info = link_interface(&v, &f).unwrap();
        assert_eq!(info.vertex_entry, "main");
    }

    // ── failures ──────────────────────────────────────────────────────────

    #[test]
    fn swapped_stages_fail() {
        let d = link_diagnostic(&fs(FRAGMENT_SOURCE), &vs(VERTEX_SOURCE));
        assert!(d.contains("vertex slot"), "{d}");
    }

    #[test]
    fn missing_entry_point_fails() {
        // A fragment-only module passed as the vertex stage source.
        let v = compile_stage(StageKind::Vertex, FRAGMENT_SOURCE).unwrap();
        let d = link_diagnostic(&v, &fs(FRAGMENT_SOURCE));
        assert!(d.contains("no @vertex entry point"), "{d}");
    }

    #[test]
    fn missing_position_attribute_fails() {
        let v = vs("
            @vertex fn vs_main(@location(3) p: vec2<f32>) -> @builtin(position) vec4<f32> {
                return vec4<f32>(p, 0.0, 1.0);
            }
        ");
        let d = link_diagnostic(&v, &fs(FRAGMENT_SOURCE));
        assert!(d.contains("@location(0)"), "{d}");
    }

    #[test]
    fn missing_color_uniform_fails() {
        let f = fs("@fragment fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }");
        let d = link_diagnostic(&vs(VERTEX_SOURCE), &f);
        assert!(d.contains("uniform"), "{d}");
    }

    #[test]
    fn wrong_uniform_type_fails() {
        let f = fs("
            @group(0) @binding(0) var<uniform> c: vec3<f32>;
            @fragment fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(c, 1.0); }
        ");
        assert!(link_interface(&vs(VERTEX_SOURCE), &f).is_err());
    }

    #[test]
    fn unwritten_varying_fails() {
        let f = fs("
            @group(0) @binding(0) var<uniform> c: vec4<f32>;
            @fragment fn fs_main(@location(2) uv: vec2<f32>) -> @location(0) vec4<f32> {
                return c * uv.x;
            }
        ");
        let d = link_diagnostic(&vs(VERTEX_SOURCE), &f);
        assert!(d.contains("@location(2)"), "{d}");
    }
}
