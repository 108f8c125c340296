use winit::dpi::PhysicalSize;

use crate::coords::SurfaceDimensions;
use crate::device::{FrameTarget, SurfaceErrorAction};
use crate::paint::Color;
use crate::render::{QuadrantRenderer, RenderCtx, RenderTarget};
use crate::shader::{init_shader_program, FRAGMENT_SOURCE, VERTEX_SOURCE};

use super::AppControl;

/// Renderer defaults.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Color the whole target is cleared to before the quadrants are drawn.
    pub clear_color: Color,

    /// Canvas side before the first resize in logical units. Scaled by the
    /// target's scale factor, then clamped to the target size.
    pub initial_side: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            clear_color: Color::SLATE,
            initial_side: SurfaceDimensions::INITIAL_SIDE,
        }
    }
}

/// The single long-lived graphics session.
///
/// Owns the linked program and uploaded geometry (through the renderer) and
/// the square canvas dimensions. If the shader program failed to build the
/// session stays alive but draws nothing.
pub struct Session {
    config: SessionConfig,
    renderer: Option<QuadrantRenderer>,
    dimensions: SurfaceDimensions,
    frames_rendered: u64,
    warned_not_ready: bool,
}

impl Session {
    /// Builds the program from the embedded shaders and uploads the geometry.
    pub fn new<T: FrameTarget + ?Sized>(target: &T, config: SessionConfig) -> Self {
        Self::with_sources(target, config, VERTEX_SOURCE, FRAGMENT_SOURCE)
    }

    /// Like [`new`](Self::new) with caller-provided WGSL stage sources.
    pub fn with_sources<T: FrameTarget + ?Sized>(
        target: &T,
        config: SessionConfig,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Self {
        let renderer =
            init_shader_program(target.device(), target.format(), vertex_source, fragment_source)
                .ok()
                .map(|program| QuadrantRenderer::new(target.device(), program));

        let size = target.size();
        let dimensions = SurfaceDimensions::logical(config.initial_side, target.scale_factor())
            .clamped_to(size.width, size.height);

        log::info!(
            "session ready: canvas {}x{}, program {}",
            dimensions.width(),
            dimensions.height(),
            if renderer.is_some() { "linked" } else { "unavailable" }
        );

        Self {
            config,
            renderer,
            dimensions,
            frames_rendered: 0,
            warned_not_ready: false,
        }
    }

    /// True when the shader program linked and frames can be drawn.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.renderer.is_some()
    }

    #[inline]
    pub fn dimensions(&self) -> SurfaceDimensions {
        self.dimensions
    }

    /// Number of frames submitted so far.
    #[inline]
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Clears the target and draws the four quadrants into the canvas square.
    ///
    /// Runs to completion: the frame is submitted before returning (the GPU
    /// may still be executing it).
    pub fn render<T: FrameTarget + ?Sized>(&mut self, target: &mut T) -> AppControl {
        let Some(renderer) = self.renderer.as_ref() else {
            if !self.warned_not_ready {
                log::warn!("no linked shader program; nothing will be drawn");
                self.warned_not_ready = true;
            }
            return AppControl::Continue;
        };

        let size = target.size();
        let canvas = self.dimensions.clamped_to(size.width, size.height);
        if canvas.is_empty() {
            log::debug!("zero-sized canvas; frame skipped");
            return AppControl::Continue;
        }

        let mut frame = match target.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match target.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => {
                        log::error!("surface lost beyond recovery; exiting");
                        AppControl::Exit
                    }
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        AppControl::Continue
                    }
                };
            }
        };

        {
            let ctx = RenderCtx::new(
                target.device(),
                target.queue(),
                target.format(),
                canvas.viewport(),
            );
            let mut rt = RenderTarget::new(&mut frame.encoder, &frame.view);
            renderer.render(&ctx, &mut rt, self.config.clear_color);
        }

        target.submit(frame);
        self.frames_rendered += 1;
        log::trace!("frame {} submitted ({}px canvas)", self.frames_rendered, canvas.side());

        AppControl::Continue
    }

    /// Resize handler: the target follows the window, the canvas becomes the
    /// largest fitting square, then one frame is rendered immediately.
    pub fn resize<T: FrameTarget + ?Sized>(
        &mut self,
        target: &mut T,
        window: PhysicalSize<u32>,
    ) -> AppControl {
        target.resize(window);
        self.dimensions = SurfaceDimensions::fit_window(window.width, window.height);

        log::debug!(
            "window {}x{} -> canvas {}x{}",
            window.width,
            window.height,
            self.dimensions.width(),
            self.dimensions.height()
        );

        self.render(target)
    }
}
