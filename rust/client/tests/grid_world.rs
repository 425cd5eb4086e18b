extern crate gridworld;
extern crate rstest;
mod common;

use assertor::*;
use common::*;
use gridworld::common::utils::*;
use gridworld::*;
use rstest::rstest;

#[test]
fn construction_defaults() {
    let env = make_env(4);
    assert_eq!(env.size(), 4);
    assert_eq!(env.targets(), [0, 15]);
    assert_eq!(env.observation_space(), Space::Discrete { n: 16 });
    assert_eq!(env.action_space(), Space::Discrete { n: 4 });
    assert_eq!(env.render_mode(), None);
}

#[rstest]
#[case("ansi")]
#[case("Human")]
#[case("")]
fn unknown_render_mode_fails_fast(#[case] mode: &str) {
    let err = GridWorldEnv::new(Some(mode), 4).unwrap_err();
    assert!(matches!(err, GridWorldError::UnsupportedRenderMode(m) if m == mode));
}

#[cfg(not(feature = "human"))]
#[test]
fn human_mode_needs_the_window_feature() {
    let err = GridWorldEnv::new(Some("human"), 4).unwrap_err();
    assert!(matches!(err, GridWorldError::RenderModeUnavailable(_)));
}

#[test]
fn reset_never_lands_on_a_target() {
    for size in 2..=5 {
        let mut env = make_env(size);
        for seed in 0..10_000 {
            let (s, info) = env.reset(Some(seed));
            assert!(!env.targets().contains(&s), "size {size} seed {seed}");
            assert!(env.observation_space().contains(s));
            assert!(info.distance > 0);
        }
    }
}

#[test]
fn reset_is_deterministic_for_a_seed() {
    let mut a = make_env(6);
    let mut b = make_env(6);
    for seed in [0, 1, 42, 2718] {
        assert_eq!(a.reset(Some(seed)), b.reset(Some(seed)));
    }
}

#[test]
fn unseeded_reset_continues_the_seeded_stream() {
    let mut a = make_env(6);
    let mut b = make_env(6);
    a.reset(Some(2718));
    b.reset(Some(2718));
    let xs = (0..20).map(|_| a.reset(None).0).collect::<Vec<_>>();
    let ys = (0..20).map(|_| b.reset(None).0).collect::<Vec<_>>();
    assert_eq!(xs, ys);
}

#[test]
fn reset_covers_every_non_target_cell() {
    let mut env = make_env(3);
    let mut seen = (0..2_000)
        .map(|seed| env.reset(Some(seed)).0)
        .collect::<Vec<_>>();
    seen.sort();
    seen.dedup();
    assert_that!(seen).contains_exactly(vec![1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn reset_info_is_distance_to_nearer_target() {
    let mut env = make_env(4);
    for seed in 0..200 {
        let (s, info) = env.reset(Some(seed));
        let (row, col) = to_coords(s, 4);
        let expected = (row + col).min((3 - row) + (3 - col));
        assert_eq!(info.distance, expected);
    }
}

#[test]
fn step_up_from_five() {
    let mut env = env_at(4, 5);
    let si = env.step(Action::Up);
    assert_eq!(si.observation, 1);
    assert_eq!(si.reward, -1.);
    assert!(!si.terminated);
    assert!(!si.truncated);
    assert_eq!(si.info.distance, 1);
}

#[test]
fn step_left_into_target_terminates() {
    let mut env = env_at(4, 1);
    let si = env.step(Action::Left);
    assert_eq!(si.observation, 0);
    assert_eq!(si.reward, -1.);
    assert!(si.terminated);
    assert!(!si.truncated);
    assert_eq!(si.info.distance, 0);
}

#[test]
fn stepping_from_a_target_costs_nothing() {
    let mut env = env_at(4, 15);
    let si = env.step(Action::Up);
    assert_eq!(si.observation, 11);
    assert_eq!(si.reward, 0.);
    assert!(!si.terminated);

    let mut env = env_at(4, 0);
    let si = env.step(Action::Left);
    assert_eq!(si.observation, 0);
    assert_eq!(si.reward, 0.);
    assert!(si.terminated);
}

#[rstest]
#[case(0, Action::Up, 0)]
#[case(3, Action::Up, 3)]
#[case(3, Action::Right, 3)]
#[case(7, Action::Right, 7)]
#[case(12, Action::Down, 12)]
#[case(12, Action::Left, 12)]
#[case(8, Action::Left, 8)]
#[case(14, Action::Down, 14)]
fn walls_block_movement(#[case] from: Discrete, #[case] action: Action, #[case] to: Discrete) {
    let mut env = env_at(4, from);
    assert_eq!(env.step(action).observation, to);
}

#[test]
fn every_move_stays_on_the_grid() {
    for size in 2..=6 {
        let mut env = make_env(size);
        env.reset(Some(1));
        for s in 0..size * size {
            for a in Action::ALL {
                env.set_agent(s).unwrap();
                let si = env.step(a);
                let (row, col) = to_coords(si.observation, size);
                assert!(row < size && col < size);
                assert_eq!(si.terminated, env.targets().contains(&si.observation));
                assert!(!si.truncated);
                let expected_reward = if env.targets().contains(&s) { 0. } else { -1. };
                assert_eq!(si.reward, expected_reward);
                assert_eq!(si.info.distance == 0, si.terminated);
            }
        }
    }
}

#[test]
fn random_walk_eventually_terminates() {
    let mut env = make_env(4);
    let mut policy = RandomPolicy::new(Some(3));
    for seed in 0..20 {
        let (mut s, _) = env.reset(Some(seed));
        let mut steps = 0;
        loop {
            let si = env.step(policy.policy(s));
            steps += 1;
            s = si.observation;
            if si.terminated {
                break;
            }
            assert!(steps < 10_000, "episode did not terminate");
        }
    }
}

#[test]
fn close_is_idempotent() {
    let mut env = make_env(4);
    env.close();
    env.close();

    let mut env = rgb_env(4);
    env.reset(Some(0));
    env.close();
    env.close();
}
