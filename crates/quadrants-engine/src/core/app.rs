use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;

use crate::device::Gpu;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// All callbacks run on the event-loop thread and complete before the next
/// event is dispatched.
pub trait App {
    /// Called once, after the window's graphics context has been created.
    fn on_gpu_ready(&mut self, gpu: &Gpu<'_>);

    /// Called for every window resize (and scale-factor change) with the new
    /// inner size in physical pixels.
    fn on_resize(&mut self, gpu: &mut Gpu<'_>, size: PhysicalSize<u32>) -> AppControl;

    /// Called when the platform asks for the window contents.
    fn on_redraw(&mut self, gpu: &mut Gpu<'_>) -> AppControl;

    /// Called for every window event before the runtime handles it.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }
}
