extern crate gridworld;

use gridworld::*;

fn main() -> Result<()> {
    let mut env = GridWorldEnv::new(None, 4)?;

    println!("observation space:\n{:?}\n", env.observation_space());
    println!("action space:\n{:?}\n", env.action_space());
    let transitions = env.transitions();
    println!("transition:\n{:?}\n", transitions[&(5, Action::Up.index())]);

    let mut policy = RandomPolicy::new(Some(2718));
    for ep in 0..10 {
        let (mut s, info) = env.reset(if ep == 0 { Some(2718) } else { None });
        println!("Start of episode {} at {} (distance {})", ep, s, info.distance);
        let mut tot_reward = 0.;
        loop {
            let si = env.step(policy.policy(s));
            print!("{esc}[2J{esc}[1;1H", esc = 27 as char);
            println!("{}", env.render_ansi());
            tot_reward += si.reward;
            s = si.observation;

            if si.truncated || si.terminated {
                break;
            }
        }
        println!("Finished episode {} with total reward {}", ep, tot_reward);
    }

    env.close();
    Ok(())
}
