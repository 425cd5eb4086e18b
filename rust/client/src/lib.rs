extern crate ndarray;
extern crate rand;
extern crate serde;
extern crate serde_json;

pub mod common;
pub mod config;
pub mod envs;
pub mod error;
pub mod hyperparams;
pub mod mdps;
pub mod render;
#[cfg(feature = "gui")]
pub mod ui;

pub use common::defs::*;
pub use config::{GridWorldConfig, RenderMode};
pub use envs::grid_world::*;
pub use error::{GridWorldError, Result};
pub use hyperparams::{HyperparamTable, PpoHyperparams};
pub use mdps::*;

use ndarray::Array3;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Space {
    /// Refer: https://gymnasium.farama.org/api/spaces/fundamental/#discrete
    Discrete { n: Discrete },
}

impl Space {
    pub fn n(&self) -> Discrete {
        match self {
            Space::Discrete { n } => *n,
        }
    }

    pub fn contains(&self, x: Discrete) -> bool {
        x < self.n()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderFrame {
    Ansi(String),
    /// Pixels laid out as rows x cols x RGB.
    Rgb(Array3<u8>),
}

impl RenderFrame {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RenderFrame::Ansi(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_rgb(&self) -> Option<&Array3<u8>> {
        match self {
            RenderFrame::Rgb(pixels) => Some(pixels),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub next_state: Discrete,
    pub probability: Continous,
    pub reward: f64,
    pub done: bool,
}

/// Keyed by (state, action).
pub type Transitions = HashMap<(Discrete, Discrete), Vec<Transition>>;

#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo<O, I> {
    pub observation: O,
    pub reward: f64,
    pub terminated: bool,
    pub truncated: bool,
    pub info: I,
}

/// The gymnasium environment contract.
///
/// Implementations are stateful and single threaded: callers serialize
/// reset/step/render/close per instance. Stepping before the first reset,
/// or after an episode terminated, is the caller's responsibility.
/// Refer: https://gymnasium.farama.org/api/env/
pub trait Env {
    type Observation;
    type Action;
    type Info;

    /// The Space object corresponding to valid observations.
    fn observation_space(&self) -> Space;

    /// The Space object corresponding to valid actions.
    fn action_space(&self) -> Space;

    /// Start a new episode. A seed reseeds the environment's own generator.
    fn reset(&mut self, seed: Option<u64>) -> (Self::Observation, Self::Info);

    fn step(&mut self, action: Self::Action) -> StepInfo<Self::Observation, Self::Info>;

    /// Produce a frame in "rgb_array" mode, nothing otherwise.
    fn render(&mut self) -> Result<Option<RenderFrame>>;

    /// Release display resources. Safe to call any number of times.
    fn close(&mut self);
}
