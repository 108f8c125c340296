use anyhow::Result;
use winit::dpi::PhysicalSize;

use quadrants_engine::core::{App, AppControl, Session, SessionConfig};
use quadrants_engine::device::{Gpu, GpuInit};
use quadrants_engine::logging::{init_logging, LoggingConfig};
use quadrants_engine::window::{Runtime, RuntimeConfig};

/// Owns the graphics session once the window's GPU context exists.
#[derive(Default)]
struct Viewer {
    session: Option<Session>,
}

impl App for Viewer {
    fn on_gpu_ready(&mut self, gpu: &Gpu<'_>) {
        let info = gpu.adapter_info();
        log::debug!("adapter: {} / {}", info.driver, info.driver_info);
        self.session = Some(Session::new(gpu, SessionConfig::default()));
    }

    fn on_resize(&mut self, gpu: &mut Gpu<'_>, size: PhysicalSize<u32>) -> AppControl {
        match self.session.as_mut() {
            Some(session) => session.resize(gpu, size),
            None => AppControl::Continue,
        }
    }

    fn on_redraw(&mut self, gpu: &mut Gpu<'_>) -> AppControl {
        match self.session.as_mut() {
            Some(session) => session.render(gpu),
            None => AppControl::Continue,
        }
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    Runtime::run(RuntimeConfig::default(), GpuInit::default(), Viewer::default())
}
