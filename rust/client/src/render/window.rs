//! On-screen window for the `human` render mode, using minifb.

use super::{Canvas, Renderer, Scene};
use crate::error::{GridWorldError, Result};
use crate::RenderFrame;
use minifb::{Window, WindowOptions};
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

const TITLE: &str = "Grid World";

pub struct WindowRenderer {
    canvas: Canvas,
    /// Opened on the first frame, dropped by `close`.
    window: Option<Window>,
    /// 0RGB pixels for minifb.
    buffer: Vec<u32>,
    frame_duration: Duration,
    last_frame: Option<Instant>,
}

impl WindowRenderer {
    pub fn new(window_size: usize, render_fps: u32) -> Self {
        Self {
            canvas: Canvas::new(window_size),
            window: None,
            buffer: vec![0; window_size * window_size],
            frame_duration: Duration::from_secs_f64(1.0 / render_fps.max(1) as f64),
            last_frame: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.window.as_ref().map_or(false, Window::is_open)
    }

    fn open(&mut self) -> Result<&mut Window> {
        if self.window.is_none() {
            let size = self.canvas.window_size();
            let window = Window::new(TITLE, size, size, WindowOptions::default())
                .map_err(|e| GridWorldError::Render(e.to_string()))?;
            info!(size, "opened window");
            self.window = Some(window);
        }

        self.window
            .as_mut()
            .ok_or_else(|| GridWorldError::Render("window unavailable".to_string()))
    }

    fn rgb_to_argb(&mut self) {
        let pixels = self.canvas.pixels();
        for (px, rgb) in self.buffer.iter_mut().zip(pixels.as_slice().unwrap_or(&[]).chunks_exact(3)) {
            *px = (rgb[0] as u32) << 16 | (rgb[1] as u32) << 8 | rgb[2] as u32;
        }
    }

    /// Sleep off whatever is left of the current frame.
    fn throttle(&mut self) {
        if let Some(last) = self.last_frame {
            let elapsed = last.elapsed();
            if elapsed < self.frame_duration {
                thread::sleep(self.frame_duration - elapsed);
            }
        }
        self.last_frame = Some(Instant::now());
    }
}

impl Renderer for WindowRenderer {
    fn on_transition(&mut self, scene: &Scene) -> Result<()> {
        self.canvas.draw(scene);
        self.rgb_to_argb();

        let size = self.canvas.window_size();
        let buffer = std::mem::take(&mut self.buffer);
        // Also pumps the window's event queue.
        let updated = self
            .open()?
            .update_with_buffer(&buffer, size, size)
            .map_err(|e| GridWorldError::Render(e.to_string()));
        self.buffer = buffer;
        updated?;

        self.throttle();
        Ok(())
    }

    fn render(&mut self, _scene: &Scene) -> Result<Option<RenderFrame>> {
        Ok(None)
    }

    fn close(&mut self) {
        if self.window.take().is_some() {
            self.last_frame = None;
            info!("closed window");
        }
    }
}
