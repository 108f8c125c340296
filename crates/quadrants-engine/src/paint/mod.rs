//! Color model shared by the color table, clear color and renderer.

pub mod color;

pub use color::Color;
