mod environments;
mod frames;
mod mdps;
mod runner;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use environments::grid_adapter::*;
use frames::FrameWriter;
use gridworld::{hyperparams::HyperparamTable, *};
use itertools::Itertools;
use mdps::{mdp_solver_policy::*, solvers::*};
use runner::*;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyKind {
    /// Uniformly random actions.
    Random,
    /// Greedy with respect to value iteration.
    Optimal,
}

/// Runs grid world episodes.
#[derive(Parser, Debug)]
#[command(name = "gridworld-rl")]
struct Cli {
    /// Edge length of the grid.
    #[arg(long, default_value_t = 4)]
    size: usize,

    #[arg(long, default_value_t = 10)]
    episodes: usize,

    /// Seeds the first reset and the random policy.
    #[arg(long)]
    seed: Option<u64>,

    /// "human" or "rgb_array".
    #[arg(long)]
    render_mode: Option<String>,

    #[arg(long, value_enum, default_value_t = PolicyKind::Random)]
    policy: PolicyKind,

    /// Discount used to solve for the optimal policy.
    #[arg(long, default_value_t = 1.0)]
    gamma: f64,

    /// Episodes longer than this are cut off.
    #[arg(long, default_value_t = 1000)]
    max_steps: usize,

    /// Write every rgb_array frame as PNG into this directory.
    #[arg(long)]
    frames_dir: Option<PathBuf>,

    /// Print the PPO hyperparameter table from this JSON file and exit.
    #[arg(long)]
    hyperparams: Option<PathBuf>,

    /// Print the built-in PPO hyperparameter table and exit.
    #[arg(long)]
    show_hyperparams: bool,

    /// Print the state values of the equiprobable random policy and exit.
    #[arg(long)]
    values: bool,

    /// Watch the policy in the interactive viewer instead (needs the `gui`
    /// feature).
    #[arg(long)]
    gui: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    if cli.show_hyperparams || cli.hyperparams.is_some() {
        return print_hyperparams(cli.hyperparams.as_deref());
    }

    let config = GridWorldConfig {
        render_mode: cli.render_mode.clone(),
        size: cli.size,
        ..GridWorldConfig::default()
    };
    let mut env = GridWorldEnv::from_config(&config).context("failed to create grid world")?;

    if cli.values {
        print_values(&env, cli.gamma);
        return Ok(());
    }

    let policy = build_policy(&cli, &env);

    if cli.gui {
        env.close();
        return run_gui(&config, cli.seed, policy);
    }

    let mut frames = match &cli.frames_dir {
        Some(dir) if env.render_mode() == Some(RenderMode::RgbArray) => Some(FrameWriter::create(dir)?),
        Some(_) => bail!("--frames-dir needs --render-mode rgb_array"),
        None => None,
    };

    let result = run(&cli, &mut env, policy, frames.as_mut());
    env.close();
    result?;

    if let Some(frames) = frames {
        info!(written = frames.written(), "saved frames");
    }

    Ok(())
}

fn build_policy(cli: &Cli, env: &GridWorldEnv) -> Box<dyn Policy> {
    match cli.policy {
        PolicyKind::Random => Box::new(RandomPolicy::new(cli.seed)),
        PolicyKind::Optimal => {
            let mdp = GridAdapter::new(env, cli.gamma);
            let (v, sweeps) = value_iteration(&mdp, 1e-9, None);
            info!(sweeps, "solved grid world");
            Box::new(greedy_policy(&mdp, &v))
        }
    }
}

fn run(
    cli: &Cli,
    env: &mut GridWorldEnv,
    mut policy: Box<dyn Policy>,
    mut frames: Option<&mut FrameWriter>,
) -> Result<()> {
    let mut returns = Vec::with_capacity(cli.episodes);
    for episode in 0..cli.episodes {
        // Only the first reset is seeded; later ones continue its stream.
        let seed = cli.seed.filter(|_| episode == 0);
        let stats = run_episode(env, policy.as_mut(), seed, cli.max_steps, |env, step| {
            if let Some(frames) = frames.as_deref_mut() {
                if let Some(frame) = env.render()? {
                    frames.write(&frame, episode, step)?;
                }
            }
            Ok(())
        })?;

        info!(
            episode,
            start = stats.start,
            steps = stats.steps,
            total_reward = stats.total_reward,
            terminated = stats.terminated,
            "finished episode"
        );
        returns.push(stats.total_reward);
    }

    if !returns.is_empty() {
        let mean = returns.iter().sum::<f64>() / returns.len() as f64;
        info!(episodes = returns.len(), mean_return = mean, "done");
    }

    Ok(())
}

fn print_values(env: &GridWorldEnv, gamma: f64) {
    let mdp = GridAdapter::new(env, gamma);
    let pi = equiprobable_policy(env.n_s(), env.n_a());
    let (v, sweeps) = policy_evaluation(&mdp, &pi, 1e-9, None);
    info!(sweeps, "evaluated equiprobable policy");

    for row in v.chunks(env.size()) {
        println!("{}", row.iter().map(|x| format!("{x:7.2}")).join(" "));
    }
}

#[cfg(feature = "gui")]
fn run_gui(config: &GridWorldConfig, seed: Option<u64>, policy: Box<dyn Policy>) -> Result<()> {
    ui::GridWorldApp::run(config, seed, policy).context("viewer failed")
}

#[cfg(not(feature = "gui"))]
fn run_gui(_config: &GridWorldConfig, _seed: Option<u64>, _policy: Box<dyn Policy>) -> Result<()> {
    bail!("built without the gui feature")
}

fn print_hyperparams(path: Option<&std::path::Path>) -> Result<()> {
    let table = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            HyperparamTable::from_json_str(&text)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => HyperparamTable::builtin(),
    };

    println!("{}", table.to_json_string()?);
    Ok(())
}
