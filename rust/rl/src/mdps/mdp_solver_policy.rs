use super::{mdp::Mdp, solvers::common::q_value};
use gridworld::*;

/// Acts greedily with respect to `v`. Ties go to the first action in
/// UP, RIGHT, DOWN, LEFT order.
pub fn greedy_policy(mdp: &dyn Mdp, v: &[f64]) -> TabularPolicy {
    let transitions = mdp.transitions();
    let actions = (0..mdp.n_s())
        .map(|s| {
            let mut best = (Action::Up, f64::NEG_INFINITY);
            for a in Action::ALL.into_iter().take(mdp.n_a()) {
                let q = q_value(mdp, &transitions, v, s, a.index());
                if q > best.1 + 1e-12 {
                    best = (a, q);
                }
            }
            best.0
        })
        .collect();

    TabularPolicy::new(actions)
}
