use super::super::mdp::Mdp;
use super::common::*;
use tracing::debug;

/// Value iteration, in place. Returns the optimal values and the number of
/// sweeps.
/// Ref: Sutton & Barto 2018, section 4.4.
pub fn value_iteration(mdp: &dyn Mdp, theta: f64, max_sweeps: Option<usize>) -> (Vec<f64>, usize) {
    let transitions = mdp.transitions();
    let mut v = vec![0.; mdp.n_s()];
    let mut sweeps = 0;

    loop {
        let mut delta: f64 = 0.;
        for s in 0..mdp.n_s() {
            let v_new = (0..mdp.n_a())
                .map(|a| q_value(mdp, &transitions, &v, s, a))
                .fold(f64::NEG_INFINITY, f64::max);
            delta = delta.max((v_new - v[s]).abs());
            v[s] = v_new;
        }
        sweeps += 1;

        if delta < theta || max_sweeps.map_or(false, |m| sweeps >= m) {
            debug!(sweeps, delta, "value iteration done");
            break;
        }
    }

    (v, sweeps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environments::grid_adapter::GridAdapter;
    use float_eq::*;
    use gridworld::GridWorldEnv;
    use rstest::rstest;

    #[rstest]
    #[case(2)]
    #[case(4)]
    #[case(7)]
    fn optimal_value_is_minus_distance(#[case] size: usize) {
        let env = GridWorldEnv::new(None, size).unwrap();
        let mdp = GridAdapter::new(&env, 1.0);

        let (v, _) = value_iteration(&mdp, 1e-9, None);

        let expected = (0..env.n_s())
            .map(|s| -(env.distance_to_target(s) as f64))
            .collect::<Vec<_>>();
        assert_float_eq!(v, expected, abs_all <= 1e-9);
    }

    #[test]
    fn converges_in_a_few_sweeps() {
        let env = GridWorldEnv::new(None, 4).unwrap();
        let mdp = GridAdapter::new(&env, 1.0);

        let (_, sweeps) = value_iteration(&mdp, 1e-9, None);

        assert!(sweeps <= 8, "took {sweeps} sweeps");
    }
}
