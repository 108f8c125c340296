use std::fmt;

use super::ShaderError;

/// Pipeline stage a source is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl StageKind {
    pub(crate) fn naga_stage(self) -> naga::ShaderStage {
        match self {
            StageKind::Vertex => naga::ShaderStage::Vertex,
            StageKind::Fragment => naga::ShaderStage::Fragment,
        }
    }

    /// WGSL attribute that marks an entry point of this stage.
    pub(crate) fn attribute(self) -> &'static str {
        match self {
            StageKind::Vertex => "@vertex",
            StageKind::Fragment => "@fragment",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StageKind::Vertex => "vertex",
            StageKind::Fragment => "fragment",
        })
    }
}

/// A parsed and validated WGSL stage, ready to link.
#[derive(Debug, Clone)]
pub struct CompiledStage {
    kind: StageKind,
    source: String,
    module: naga::Module,
}

impl CompiledStage {
    #[inline]
    pub fn kind(&self) -> StageKind {
        self.kind
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub(crate) fn module(&self) -> &naga::Module {
        &self.module
    }
}

/// Compiles one WGSL stage.
///
/// On failure the compiler diagnostic is logged and returned in
/// [`ShaderError::Compile`].
pub fn compile_stage(kind: StageKind, source: &str) -> Result<CompiledStage, ShaderError> {
    let result = parse_and_validate(kind, source);

    match &result {
        Ok(_) => log::debug!("{kind} shader compiled"),
        Err(e) => log::error!("an error occurred compiling the shaders: {e}"),
    }

    result.map(|module| CompiledStage {
        kind,
        source: source.to_owned(),
        module,
    })
}

fn parse_and_validate(kind: StageKind, source: &str) -> Result<naga::Module, ShaderError> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| ShaderError::compile(kind, e.emit_to_string(source)))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    )
    .validate(&module)
    .map_err(|e| ShaderError::compile(kind, e.emit_to_string(source)))?;

    Ok(module)
}
