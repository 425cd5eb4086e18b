use crate::common::{defs::*, utils::*};
use crate::config::{GridWorldConfig, RenderMode};
use crate::error::{GridWorldError, Result};
use crate::render::{self, Renderer, Scene};
use crate::{Env, RenderFrame, Space, StepInfo, Transition, Transitions};
use itertools::iproduct;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

/// (row, col) displacement, indexed by action.
const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

impl Action {
    pub const ALL: [Action; 4] = [Action::Up, Action::Right, Action::Down, Action::Left];

    pub fn direction(self) -> (isize, isize) {
        DIRECTIONS[self as usize]
    }

    pub fn index(self) -> Discrete {
        self as Discrete
    }
}

impl TryFrom<Discrete> for Action {
    type Error = GridWorldError;

    fn try_from(a: Discrete) -> Result<Self> {
        Action::ALL
            .get(a)
            .copied()
            .ok_or(GridWorldError::InvalidAction(a))
    }
}

impl From<Action> for Discrete {
    fn from(a: Action) -> Self {
        a.index()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridInfo {
    /// L1 distance from the agent to the nearer target.
    pub distance: usize,
}

/// Square grid world from Sutton & Barto 2018, chapter 4.
///
/// The agent moves UP, RIGHT, DOWN or LEFT; moves into a wall leave that axis
/// unchanged. The top-left and bottom-right cells are terminal. Every step
/// taken from a non-terminal cell costs -1.
pub struct GridWorldEnv {
    size: usize,
    targets: [Discrete; 2],
    agent: Discrete,
    render_mode: Option<RenderMode>,
    renderer: Box<dyn Renderer>,
    rng: StdRng,
}

impl GridWorldEnv {
    pub fn new(render_mode: Option<&str>, size: usize) -> Result<Self> {
        Self::from_config(&GridWorldConfig::new(render_mode, size))
    }

    pub fn from_config(config: &GridWorldConfig) -> Result<Self> {
        let render_mode = config.validate()?;
        let renderer = render::renderer_for(render_mode, config)?;
        let size = config.size;

        debug!(size, render_mode = ?render_mode, "created grid world");
        Ok(Self {
            size,
            targets: [0, size * size - 1],
            // Undefined until the first reset. Starting on a target makes a
            // premature step behave like a step after termination.
            agent: 0,
            render_mode,
            renderer,
            rng: StdRng::from_entropy(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn n_s(&self) -> usize {
        self.size * self.size
    }

    pub fn n_a(&self) -> usize {
        Action::ALL.len()
    }

    pub fn targets(&self) -> [Discrete; 2] {
        self.targets
    }

    pub fn agent(&self) -> Discrete {
        self.agent
    }

    pub fn render_mode(&self) -> Option<RenderMode> {
        self.render_mode
    }

    /// Put the agent on `state` without starting a new episode.
    pub fn set_agent(&mut self, state: Discrete) -> Result<()> {
        if state >= self.n_s() {
            return Err(GridWorldError::InvalidState(state));
        }

        self.agent = state;
        Ok(())
    }

    pub fn is_terminal(&self, state: Discrete) -> bool {
        self.targets.contains(&state)
    }

    pub fn distance_to_target(&self, state: Discrete) -> usize {
        let coords = to_coords(state, self.size);
        self.targets
            .iter()
            .map(|&t| manhattan(to_coords(t, self.size), coords))
            .min()
            .unwrap_or_default()
    }

    /// Cell reached from `state` by `action`, ignoring termination.
    pub fn next_state(&self, state: Discrete, action: Action) -> Discrete {
        let coords = clamp_move(to_coords(state, self.size), action.direction(), self.size);
        to_index(coords, self.size)
    }

    /// The full model for dynamic programming. Terminal cells are absorbing
    /// with zero reward.
    pub fn transitions(&self) -> Rc<Transitions> {
        let transitions = iproduct!(0..self.n_s(), Action::ALL)
            .map(|(s, a)| ((s, a.index()), vec![self.transition(s, a)]))
            .collect();

        Rc::new(transitions)
    }

    fn transition(&self, state: Discrete, action: Action) -> Transition {
        if self.is_terminal(state) {
            return Transition {
                next_state: state,
                probability: 1.0,
                reward: 0.,
                done: true,
            };
        }

        let next_state = self.next_state(state, action);
        Transition {
            next_state,
            probability: 1.0,
            reward: -1.,
            done: self.is_terminal(next_state),
        }
    }

    pub fn scene(&self) -> Scene {
        Scene {
            size: self.size,
            agent: to_coords(self.agent, self.size),
            targets: self.targets.map(|t| to_coords(t, self.size)),
        }
    }

    /// Text view of the grid: `x` agent, `T` target, `o` empty.
    pub fn render_ansi(&self) -> String {
        render::ansi::render(&self.scene())
    }

    fn info(&self) -> GridInfo {
        GridInfo {
            distance: self.distance_to_target(self.agent),
        }
    }

    fn render_transition(&mut self) {
        let scene = self.scene();
        if let Err(e) = self.renderer.on_transition(&scene) {
            warn!(error = %e, "failed to draw frame");
        }
    }
}

impl Env for GridWorldEnv {
    type Observation = Discrete;
    type Action = Action;
    type Info = GridInfo;

    fn observation_space(&self) -> Space {
        Space::Discrete { n: self.n_s() }
    }

    fn action_space(&self) -> Space {
        Space::Discrete { n: self.n_a() }
    }

    fn reset(&mut self, seed: Option<u64>) -> (Discrete, GridInfo) {
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }

        // Rejection sample until the agent is off both targets.
        self.agent = self.rng.gen_range(0..self.n_s());
        while self.is_terminal(self.agent) {
            self.agent = self.rng.gen_range(0..self.n_s());
        }

        let info = self.info();
        debug!(agent = self.agent, distance = info.distance, "reset");
        self.render_transition();

        (self.agent, info)
    }

    fn step(&mut self, action: Action) -> StepInfo<Discrete, GridInfo> {
        let current = self.agent;
        self.agent = self.next_state(current, action);

        let terminated = self.is_terminal(self.agent);
        let reward = if self.is_terminal(current) { 0. } else { -1. };
        let info = self.info();
        debug!(from = current, to = self.agent, ?action, terminated, "step");
        self.render_transition();

        StepInfo {
            observation: self.agent,
            reward,
            terminated,
            truncated: false,
            info,
        }
    }

    fn render(&mut self) -> Result<Option<RenderFrame>> {
        let scene = self.scene();
        self.renderer.render(&scene)
    }

    fn close(&mut self) {
        self.renderer.close();
    }
}

impl fmt::Debug for GridWorldEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridWorldEnv")
            .field("size", &self.size)
            .field("targets", &self.targets)
            .field("agent", &self.agent)
            .field("render_mode", &self.render_mode)
            .finish_non_exhaustive()
    }
}
