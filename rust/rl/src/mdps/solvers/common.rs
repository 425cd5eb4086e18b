use super::super::mdp::Mdp;
use gridworld::{Discrete, Transitions};

/// Expected return of taking `a` in `s` and following `v` afterwards.
/// Nothing is bootstrapped past a transition that ends the episode.
pub fn q_value(mdp: &dyn Mdp, transitions: &Transitions, v: &[f64], s: Discrete, a: Discrete) -> f64 {
    transitions.get(&(s, a)).map_or(0., |ts| {
        ts.iter()
            .map(|t| {
                let next = if t.done { 0. } else { v[t.next_state] };
                t.probability * (t.reward + mdp.gamma() * next)
            })
            .sum()
    })
}

/// pi[s][a] = 1 / n_a for every state.
pub fn equiprobable_policy(n_s: usize, n_a: usize) -> Vec<Vec<f64>> {
    vec![vec![1. / n_a as f64; n_a]; n_s]
}
