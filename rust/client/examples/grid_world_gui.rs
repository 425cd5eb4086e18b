extern crate gridworld;

use gridworld::*;

// NOTE: Swap in a TabularPolicy to watch a solved grid.

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = GridWorldConfig {
        size: 6,
        ..GridWorldConfig::default()
    };

    ui::GridWorldApp::run(&config, Some(2718), Box::new(RandomPolicy::new(None)))
}
