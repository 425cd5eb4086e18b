use crate::error::{GridWorldError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_SIZE: usize = 4;
pub const DEFAULT_WINDOW_SIZE: usize = 512;
pub const DEFAULT_RENDER_FPS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Draw to an on-screen window on every reset and step.
    Human,
    /// Return the frame from `render()`.
    RgbArray,
}

impl RenderMode {
    pub const ALL: [RenderMode; 2] = [RenderMode::Human, RenderMode::RgbArray];

    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::Human => "human",
            RenderMode::RgbArray => "rgb_array",
        }
    }
}

impl FromStr for RenderMode {
    type Err = GridWorldError;

    fn from_str(s: &str) -> Result<Self> {
        RenderMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| GridWorldError::UnsupportedRenderMode(s.to_string()))
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Construction parameters of a grid world.
///
/// `render_mode` stays a plain string so that an unknown mode is rejected
/// when the environment is built, not when the config is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridWorldConfig {
    pub render_mode: Option<String>,
    /// Edge length of the square grid.
    pub size: usize,
    /// Edge length of the canvas in pixels.
    pub window_size: usize,
    pub render_fps: u32,
}

impl Default for GridWorldConfig {
    fn default() -> Self {
        Self {
            render_mode: None,
            size: DEFAULT_SIZE,
            window_size: DEFAULT_WINDOW_SIZE,
            render_fps: DEFAULT_RENDER_FPS,
        }
    }
}

impl GridWorldConfig {
    pub fn new(render_mode: Option<&str>, size: usize) -> Self {
        Self {
            render_mode: render_mode.map(str::to_string),
            size,
            ..Self::default()
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn parsed_render_mode(&self) -> Result<Option<RenderMode>> {
        self.render_mode.as_deref().map(RenderMode::from_str).transpose()
    }

    /// Checks everything construction depends on.
    pub fn validate(&self) -> Result<Option<RenderMode>> {
        let mode = self.parsed_render_mode()?;
        // Both targets collapse onto the single cell below size 2 and
        // reset could never place the agent.
        if self.size < 2 {
            return Err(GridWorldError::InvalidSize(self.size));
        }

        Ok(mode)
    }
}
