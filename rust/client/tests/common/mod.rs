#![allow(dead_code)]

use gridworld::*;

pub fn make_env(size: usize) -> GridWorldEnv {
    GridWorldEnv::new(None, size).unwrap()
}

/// An env with the agent placed on `state`, as if an episode were running.
pub fn env_at(size: usize, state: Discrete) -> GridWorldEnv {
    let mut env = make_env(size);
    env.reset(Some(0));
    env.set_agent(state).unwrap();
    env
}

pub fn rgb_env(size: usize) -> GridWorldEnv {
    GridWorldEnv::new(Some("rgb_array"), size).unwrap()
}
