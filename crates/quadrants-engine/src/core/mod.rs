//! Core engine-facing contracts.
//!
//! [`App`] is the interface between the window runtime and the application;
//! [`Session`] is the long-lived graphics session an application owns and
//! hands to the renderer and resize handler.

mod app;
mod session;

pub use app::{App, AppControl};
pub use session::{Session, SessionConfig};
