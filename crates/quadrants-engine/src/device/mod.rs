//! GPU device + frame target management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the window Surface (swapchain)
//! - an offscreen texture target with pixel readback
//! - acquiring frames and providing encoders/views for rendering

mod context;
mod error;
mod frame;
mod headless;
mod init;
mod surface;
mod target;

pub use context::Gpu;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use headless::{HeadlessGpu, PixelImage};
#[cfg(test)]
pub(crate) use headless::{require_test_target, test_target};
pub use init::GpuInit;
pub use target::FrameTarget;
