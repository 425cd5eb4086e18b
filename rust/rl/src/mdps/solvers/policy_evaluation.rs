use super::super::mdp::Mdp;
use super::common::*;
use tracing::debug;

/// Iterative policy evaluation, in place. Sweeps until the largest update
/// is below `theta` or `max_sweeps` is hit.
///
/// `pi[s][a]` is the probability of taking `a` in `s`.
/// Returns the values and the number of sweeps.
/// Ref: Sutton & Barto 2018, section 4.1.
pub fn policy_evaluation(
    mdp: &dyn Mdp,
    pi: &[Vec<f64>],
    theta: f64,
    max_sweeps: Option<usize>,
) -> (Vec<f64>, usize) {
    let transitions = mdp.transitions();
    let mut v = vec![0.; mdp.n_s()];
    let mut sweeps = 0;

    loop {
        let mut delta: f64 = 0.;
        for s in 0..mdp.n_s() {
            let v_new = (0..mdp.n_a())
                .map(|a| pi[s][a] * q_value(mdp, &transitions, &v, s, a))
                .sum::<f64>();
            delta = delta.max((v_new - v[s]).abs());
            v[s] = v_new;
        }
        sweeps += 1;

        if delta < theta || max_sweeps.map_or(false, |m| sweeps >= m) {
            debug!(sweeps, delta, "policy evaluation done");
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

    /// Figure 4.1, k = infinity.
    #[test]
    fn equiprobable_policy_on_4x4_grid() {
        let env = GridWorldEnv::new(None, 4).unwrap();
        let mdp = GridAdapter::new(&env, 1.0);

        let (v, sweeps) = policy_evaluation(&mdp, &equiprobable_policy(16, 4), 1e-10, None);

        assert!(sweeps > 1);
        assert_float_eq!(
            v,
            vec![
                0., -14., -20., -22., //
                -14., -18., -20., -20., //
                -20., -20., -18., -14., //
                -22., -20., -14., 0.,
            ],
            abs_all <= 1e-4
        );
    }

    #[test]
    fn sweep_cap_is_honoured() {
        let env = GridWorldEnv::new(None, 4).unwrap();
        let mdp = GridAdapter::new(&env, 1.0);

        let (v, sweeps) = policy_evaluation(&mdp, &equiprobable_policy(16, 4), 1e-10, Some(1));

        assert_eq!(sweeps, 1);
        // First in-place sweep: state 1 sees only zeros.
        assert_float_eq!(v[1], -1., abs <= 1e-12);
        assert_float_eq!(v[0], 0., abs <= 1e-12);
    }

    #[test]
    fn discounting_shrinks_values() {
        let env = GridWorldEnv::new(None, 4).unwrap();
        let undiscounted = policy_evaluation(&GridAdapter::new(&env, 1.0), &equiprobable_policy(16, 4), 1e-8, None).0;
        let discounted = policy_evaluation(&GridAdapter::new(&env, 0.9), &equiprobable_policy(16, 4), 1e-8, None).0;

        for s in 1..15 {
            assert!(discounted[s] > undiscounted[s]);
            assert!(discounted[s] < 0.);
        }
    }
}
