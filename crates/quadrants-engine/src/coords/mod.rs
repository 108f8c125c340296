//! Coordinate types shared by the geometry tables and the renderer.
//!
//! Two spaces are in play:
//! - NDC: `[-1, 1]` on both axes, origin at the center, +Y up
//! - surface pixels: physical pixels, origin top-left, +Y down
//!
//! [`Viewport`] maps the first onto the second.

mod rect;
mod vec2;
mod viewport;

pub use rect::NdcRect;
pub use vec2::Vec2;
pub use viewport::{SurfaceDimensions, Viewport};
