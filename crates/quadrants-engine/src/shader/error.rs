use std::fmt;

use super::StageKind;

/// Failure to build the shader program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    /// A stage failed to parse or validate. `diagnostic` is the compiler report.
    Compile { stage: StageKind, diagnostic: String },
    /// The stages could not be combined into a program.
    Link { diagnostic: String },
}

impl ShaderError {
    pub(crate) fn compile(stage: StageKind, diagnostic: impl Into<String>) -> Self {
        Self::Compile {
            stage,
            diagnostic: diagnostic.into(),
        }
    }

    pub(crate) fn link(diagnostic: impl Into<String>) -> Self {
        Self::Link {
            diagnostic: diagnostic.into(),
        }
    }

    #[inline]
    pub fn is_link(&self) -> bool {
        matches!(self, ShaderError::Link { .. })
    }

    pub fn diagnostic(&self) -> &str {
        match self {
            ShaderError::Compile { diagnostic, .. } | ShaderError::Link { diagnostic } => diagnostic,
        }
    }
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Compile { stage, diagnostic } => {
                write!(f, "error compiling {stage} shader: {diagnostic}")
            }
            ShaderError::Link { diagnostic } => {
                write!(f, "unable to link shader program: {diagnostic}")
            }
        }
    }
}

impl std::error::Error for ShaderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_display_names_stage() {
        let e = ShaderError::compile(StageKind::Fragment, "expected `;`");
        assert_eq!(e.to_string(), "error compiling fragment shader: expected `;`");
        assert!(!e.is_link());
    }

    #[test]
    fn link_display() {
        let e = ShaderError::link("no @vertex entry point");
        assert_eq!(e.to_string(), "unable to link shader program: no @vertex entry point");
        assert_eq!(e.diagnostic(), "no @vertex entry point");
        assert!(e.is_link());
    }
}
