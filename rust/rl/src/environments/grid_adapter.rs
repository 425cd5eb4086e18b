use crate::mdps::mdp::Mdp;
use gridworld::*;
use std::rc::Rc;

/// Snapshot of a grid world's model, for the dynamic programming solvers.
pub struct GridAdapter {
    n_s: usize,
    n_a: usize,
    gamma: f64,
    transitions: Rc<Transitions>,
}

impl GridAdapter {
    pub fn new(env: &GridWorldEnv, gamma: f64) -> Self {
        Self {
            n_s: env.n_s(),
            n_a: env.n_a(),
            gamma,
            transitions: env.transitions(),
        }
    }
}

impl Mdp for GridAdapter {
    fn n_s(&self) -> usize {
        self.n_s
    }

    fn n_a(&self) -> usize {
        self.n_a
    }

    fn transitions(&self) -> Rc<Transitions> {
        Rc::clone(&self.transitions)
    }

    fn gamma(&self) -> f64 {
        self.gamma
    }
}
