use anyhow::Result;
use gridworld::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeStats {
    pub start: Discrete,
    pub steps: usize,
    pub total_reward: f64,
    pub terminated: bool,
}

/// Run one episode from a fresh reset until it terminates or `max_steps`
/// steps were taken. A terminated episode is never stepped again.
///
/// `on_step` sees the environment after the reset (step 0) and after each
/// step.
pub fn run_episode<E, F>(
    env: &mut E,
    policy: &mut dyn Policy,
    seed: Option<u64>,
    max_steps: usize,
    mut on_step: F,
) -> Result<EpisodeStats>
where
    E: Env<Observation = Discrete, Action = Action>,
    F: FnMut(&mut E, usize) -> Result<()>,
{
    let (start, _) = env.reset(seed);
    on_step(env, 0)?;

    let mut stats = EpisodeStats {
        start,
        steps: 0,
        total_reward: 0.,
        terminated: false,
    };
    let mut s = start;
    while stats.steps < max_steps {
        let si = env.step(policy.policy(s));
        stats.steps += 1;
        stats.total_reward += si.reward;
        s = si.observation;
        on_step(env, stats.steps)?;

        if si.terminated || si.truncated {
            stats.terminated = si.terminated;
            break;
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environments::grid_adapter::GridAdapter;
    use crate::mdps::{mdp_solver_policy::greedy_policy, solvers::value_iteration};
    use float_eq::*;

    #[test]
    fn optimal_episodes_cost_the_start_distance() {
        let mut env = GridWorldEnv::new(None, 4).unwrap();
        let mdp = GridAdapter::new(&env, 1.0);
        let (v, _) = value_iteration(&mdp, 1e-9, None);
        let mut policy = greedy_policy(&mdp, &v);

        for seed in 0..50 {
            let stats = run_episode(&mut env, &mut policy, Some(seed), 100, |_, _| Ok(())).unwrap();
            let distance = env.distance_to_target(stats.start);
            assert!(stats.terminated);
            assert_eq!(stats.steps, distance);
            assert_float_eq!(stats.total_reward, -(distance as f64), abs <= 1e-12);
        }
    }

    #[test]
    fn step_budget_cuts_episodes_short() {
        let mut env = GridWorldEnv::new(None, 8).unwrap();
        // Pushing into the top-right corner never terminates.
        let mut policy = TabularPolicy::new(vec![Action::Right; 64]);
        let stats = run_episode(&mut env, &mut policy, Some(1), 5, |e, i| {
            if i == 0 {
                e.set_agent(7)?;
            }
            Ok(())
        })
        .unwrap();

        assert_eq!(stats.steps, 5);
        assert!(!stats.terminated);
        assert_float_eq!(stats.total_reward, -5., abs <= 1e-12);
    }

    #[test]
    fn callback_sees_every_step() {
        let mut env = GridWorldEnv::new(None, 4).unwrap();
        let mut policy = RandomPolicy::new(Some(11));
        let mut seen = vec![];
        let stats = run_episode(&mut env, &mut policy, Some(3), 1000, |_, i| {
            seen.push(i);
            Ok(())
        })
        .unwrap();

        assert_eq!(seen, (0..=stats.steps).collect::<Vec<_>>());
    }
}
