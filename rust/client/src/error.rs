use crate::Discrete;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridWorldError {
    #[error("unsupported render mode '{0}', expected one of: human, rgb_array")]
    UnsupportedRenderMode(String),

    #[error("render mode '{0}' is not available in this build")]
    RenderModeUnavailable(String),

    #[error("grid size must be at least 2, got {0}")]
    InvalidSize(usize),

    #[error("invalid action {0}, expected 0 (up), 1 (right), 2 (down) or 3 (left)")]
    InvalidAction(Discrete),

    #[error("state {0} is outside the grid")]
    InvalidState(Discrete),

    #[error("render failed: {0}")]
    Render(String),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GridWorldError>;
