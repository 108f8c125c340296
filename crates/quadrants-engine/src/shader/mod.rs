//! Two-stage shader pipeline: WGSL compilation, interface linking and the
//! GPU program handle.
//!
//! Stages compile independently ([`compile_stage`]); a program is only linked
//! from two successfully compiled stages ([`init_shader_program`]).

mod compile;
mod error;
mod link;
mod program;

pub use compile::{compile_stage, CompiledStage, StageKind};
pub use error::ShaderError;
pub use link::{link_interface, ProgramInfo, COLOR_UNIFORM_BINDING, POSITION_LOCATION};
pub use program::{init_shader_program, require_stages, ShaderProgram, COLOR_UNIFORM_SIZE};

/// Pass-through vertex stage (position attribute at location 0).
pub const VERTEX_SOURCE: &str = include_str!("wgsl/pass_through.wgsl");

/// Uniform-color fragment stage (color at group 0, binding 0).
pub const FRAGMENT_SOURCE: &str = include_str!("wgsl/uniform_color.wgsl");
