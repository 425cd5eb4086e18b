//! Drawing of grid world frames.
//!
//! The environment only talks to a [`Renderer`], so the reset/step state
//! machine never touches a graphics dependency. Which renderer sits behind it
//! follows the render mode:
//!
//! - no mode: [`NullRenderer`]
//! - `rgb_array`: [`CanvasRenderer`], frames returned from `render()`
//! - `human`: `WindowRenderer`, frames drawn on every reset and step
//!   (requires the `human` feature)

pub mod ansi;
pub mod canvas;
#[cfg(feature = "human")]
pub mod window;

pub use canvas::{Canvas, CanvasRenderer};
#[cfg(feature = "human")]
pub use window::WindowRenderer;

use crate::common::defs::Coords;
use crate::config::{GridWorldConfig, RenderMode};
use crate::error::Result;
use crate::RenderFrame;

/// Everything needed to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scene {
    pub size: usize,
    pub agent: Coords,
    pub targets: [Coords; 2],
}

pub trait Renderer {
    /// Called after every reset and step.
    fn on_transition(&mut self, scene: &Scene) -> Result<()>;

    /// Called from `Env::render`.
    fn render(&mut self, scene: &Scene) -> Result<Option<RenderFrame>>;

    /// Must be idempotent.
    fn close(&mut self);
}

#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn on_transition(&mut self, _scene: &Scene) -> Result<()> {
        Ok(())
    }

    fn render(&mut self, _scene: &Scene) -> Result<Option<RenderFrame>> {
        Ok(None)
    }

    fn close(&mut self) {}
}

pub fn renderer_for(
    mode: Option<RenderMode>,
    config: &GridWorldConfig,
) -> Result<Box<dyn Renderer>> {
    match mode {
        None => Ok(Box::new(NullRenderer)),
        Some(RenderMode::RgbArray) => Ok(Box::new(CanvasRenderer::new(config.window_size))),
        Some(RenderMode::Human) => human_renderer(config),
    }
}

#[cfg(feature = "human")]
fn human_renderer(config: &GridWorldConfig) -> Result<Box<dyn Renderer>> {
    Ok(Box::new(WindowRenderer::new(
        config.window_size,
        config.render_fps,
    )))
}

#[cfg(not(feature = "human"))]
fn human_renderer(_config: &GridWorldConfig) -> Result<Box<dyn Renderer>> {
    Err(crate::error::GridWorldError::RenderModeUnavailable(
        RenderMode::Human.to_string(),
    ))
}
