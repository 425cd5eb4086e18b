use super::{Renderer, Scene};
use crate::error::Result;
use crate::RenderFrame;
use ndarray::{aview1, s, Array3};

const WHITE: [u8; 3] = [255, 255, 255];
const RED: [u8; 3] = [255, 0, 0];
const BLUE: [u8; 3] = [0, 0, 255];
const BLACK: [u8; 3] = [0, 0, 0];

const GRID_LINE_WIDTH: usize = 3;

/// Offscreen square RGB canvas, indexed as [row, col, channel].
#[derive(Debug, Clone)]
pub struct Canvas {
    window_size: usize,
    pixels: Array3<u8>,
}

impl Canvas {
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size,
            pixels: Self::blank(window_size),
        }
    }

    fn blank(window_size: usize) -> Array3<u8> {
        let mut pixels = Array3::zeros((window_size, window_size, 3));
        pixels.assign(&aview1(&WHITE));
        pixels
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn pixels(&self) -> &Array3<u8> {
        &self.pixels
    }

    /// Targets as red squares, the agent as a blue circle in the middle of
    /// its cell, then black grid lines on top.
    pub fn draw(&mut self, scene: &Scene) {
        self.pixels.assign(&aview1(&WHITE));
        let cell = self.window_size as f64 / scene.size as f64;

        for &(row, col) in &scene.targets {
            let top = (row as f64 * cell) as usize;
            let left = (col as f64 * cell) as usize;
            self.fill_rect(top, left, cell as usize, cell as usize, RED);
        }

        let (row, col) = scene.agent;
        self.fill_circle(
            (row as f64 + 0.5) * cell,
            (col as f64 + 0.5) * cell,
            cell / 3.,
            BLUE,
        );

        for i in 0..=scene.size {
            let at = (i as f64 * cell) as usize;
            let start = at.saturating_sub(GRID_LINE_WIDTH / 2);
            self.fill_rect(start, 0, GRID_LINE_WIDTH, self.window_size, BLACK);
            self.fill_rect(0, start, self.window_size, GRID_LINE_WIDTH, BLACK);
        }
    }

    fn fill_rect(&mut self, top: usize, left: usize, height: usize, width: usize, color: [u8; 3]) {
        let bottom = (top + height).min(self.window_size);
        let right = (left + width).min(self.window_size);
        if top >= bottom || left >= right {
            return;
        }

        self.pixels
            .slice_mut(s![top..bottom, left..right, ..])
            .assign(&aview1(&color));
    }

    fn fill_circle(&mut self, center_row: f64, center_col: f64, radius: f64, color: [u8; 3]) {
        let top = (center_row - radius).floor().max(0.) as usize;
        let left = (center_col - radius).floor().max(0.) as usize;
        let bottom = ((center_row + radius).ceil() as usize).min(self.window_size);
        let right = ((center_col + radius).ceil() as usize).min(self.window_size);

        for r in top..bottom {
            for c in left..right {
                let dr = r as f64 + 0.5 - center_row;
                let dc = c as f64 + 0.5 - center_col;
                if dr * dr + dc * dc <= radius * radius {
                    self.pixels
                        .slice_mut(s![r, c, ..])
                        .assign(&aview1(&color));
                }
            }
        }
    }
}

/// Backs the `rgb_array` render mode.
#[derive(Debug, Clone)]
pub struct CanvasRenderer {
    canvas: Canvas,
}

impl CanvasRenderer {
    pub fn new(window_size: usize) -> Self {
        Self {
            canvas: Canvas::new(window_size),
        }
    }
}

impl Renderer for CanvasRenderer {
    fn on_transition(&mut self, _scene: &Scene) -> Result<()> {
        Ok(())
    }

    fn render(&mut self, scene: &Scene) -> Result<Option<RenderFrame>> {
        self.canvas.draw(scene);
        Ok(Some(RenderFrame::Rgb(self.canvas.pixels().clone())))
    }

    fn close(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        Scene {
            size: 4,
            agent: (1, 1),
            targets: [(0, 0), (3, 3)],
        }
    }

    #[test]
    fn draws_targets_agent_and_lines() {
        let mut canvas = Canvas::new(512);
        canvas.draw(&scene());
        let px = canvas.pixels();

        assert_eq!(px.shape(), &[512, 512, 3]);
        assert_eq!(px.slice(s![64, 64, ..]).to_vec(), RED);
        assert_eq!(px.slice(s![448, 448, ..]).to_vec(), RED);
        assert_eq!(px.slice(s![192, 192, ..]).to_vec(), BLUE);
        assert_eq!(px.slice(s![64, 320, ..]).to_vec(), WHITE);
        // Horizontal line between rows 0 and 1.
        assert_eq!(px.slice(s![128, 320, ..]).to_vec(), BLACK);
        // Vertical line between cols 2 and 3.
        assert_eq!(px.slice(s![320, 384, ..]).to_vec(), BLACK);
    }

    #[test]
    fn agent_circle_stays_inside_its_cell() {
        let mut canvas = Canvas::new(512);
        canvas.draw(&scene());
        let px = canvas.pixels();

        // Corner of the agent cell is outside the circle.
        assert_eq!(px.slice(s![135, 135, ..]).to_vec(), WHITE);
        // Just inside the radius (128 / 3 ~ 42.7) along the column axis.
        assert_eq!(px.slice(s![192, 232, ..]).to_vec(), BLUE);
        assert_eq!(px.slice(s![192, 238, ..]).to_vec(), WHITE);
    }

    #[test]
    fn fresh_canvas_is_white() {
        let canvas = Canvas::new(16);
        assert!(canvas
            .pixels()
            .outer_iter()
            .all(|row| row.outer_iter().all(|px| px.to_vec() == WHITE)));
    }

    #[test]
    fn redraw_clears_previous_agent() {
        let mut canvas = Canvas::new(512);
        canvas.draw(&scene());
        canvas.draw(&Scene {
            agent: (2, 2),
            ..scene()
        });
        let px = canvas.pixels();

        assert_eq!(px.slice(s![192, 192, ..]).to_vec(), WHITE);
        assert_eq!(px.slice(s![320, 320, ..]).to_vec(), BLUE);
    }
}
