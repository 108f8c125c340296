//! GPU rendering subsystem.
//!
//! Convention:
//! - geometry is authored in NDC and drawn without transformation
//! - the viewport maps NDC onto the square canvas region of the target

mod ctx;
mod quadrants;

pub use ctx::{RenderCtx, RenderTarget};
pub use quadrants::QuadrantRenderer;
