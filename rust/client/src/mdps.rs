use super::*;
use rand::prelude::*;

pub trait Policy {
    fn policy(&mut self, s: Discrete) -> Action;
}

/// Uniform over the four actions.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self { rng }
    }
}

impl Policy for RandomPolicy {
    fn policy(&mut self, _s: Discrete) -> Action {
        Action::ALL[self.rng.gen_range(0..Action::ALL.len())]
    }
}

/// One fixed action per state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularPolicy {
    actions: Vec<Action>,
}

impl TabularPolicy {
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Panics if `s` has no entry.
    pub fn action(&self, s: Discrete) -> Action {
        self.actions[s]
    }
}

impl Policy for TabularPolicy {
    fn policy(&mut self, s: Discrete) -> Action {
        self.action(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_random_policy_is_reproducible() {
        let mut a = RandomPolicy::new(Some(2718));
        let mut b = RandomPolicy::new(Some(2718));
        let xs = (0..50).map(|s| a.policy(s)).collect::<Vec<_>>();
        let ys = (0..50).map(|s| b.policy(s)).collect::<Vec<_>>();
        assert_eq!(xs, ys);
    }

    #[test]
    fn random_policy_covers_all_actions() {
        let mut p = RandomPolicy::new(Some(7));
        let mut seen = [false; 4];
        for _ in 0..1000 {
            seen[p.policy(0).index()] = true;
        }
        assert_eq!(seen, [true; 4]);
    }
}
