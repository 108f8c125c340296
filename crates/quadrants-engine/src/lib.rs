//! Quadrants engine crate.
//!
//! Owns the platform + GPU runtime pieces and the four-quadrant frame
//! renderer. The viewer binary only wires a [`core::Session`] into the
//! [`window::Runtime`].

pub mod core;
pub mod device;
pub mod window;

pub mod coords;
pub mod geometry;
pub mod logging;
pub mod paint;
pub mod render;
pub mod shader;
