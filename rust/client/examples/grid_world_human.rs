extern crate gridworld;

use gridworld::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut env = GridWorldEnv::new(Some("human"), 5)?;
    let mut policy = RandomPolicy::new(None);

    for _ in 0..3 {
        let (mut s, _) = env.reset(None);
        loop {
            let si = env.step(policy.policy(s));
            s = si.observation;
            if si.terminated || si.truncated {
                break;
            }
        }
    }

    env.close();
    env.close();
    Ok(())
}
