use gravsim::{load_scenario, Scenario, ScenarioConfig};
use gravsim::run_2d;
use gravsim::bench_step;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Interactive 2D gravitational N-body toy")]
struct Args {
    /// Scenario file, looked up under `scenarios/`
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Run this many ticks without a window and print a summary
    #[arg(long)]
    headless: Option<u64>,

    /// Time `step()` over a range of population sizes and exit
    #[arg(long)]
    bench: bool,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    load_scenario(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))
}

fn run_headless(mut scenario: Scenario, ticks: u64) {
    let world = &mut scenario.world;
    let mut merges = 0;
    let mut explosions = 0;
    for _ in 0..ticks {
        let report = world.step();
        merges += report.merges;
        explosions += report.explosions;
    }
    let p = world.total_momentum();
    println!(
        "ticks={} bodies={} total_mass={:.3} momentum=({:.6}, {:.6}) merges={} explosions={}",
        world.tick_count(),
        world.body_count(),
        world.total_mass(),
        p.x,
        p.y,
        merges,
        explosions
    );
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    if args.bench {
        bench_step()?;
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let scenario = Scenario::build_scenario(&scenario_cfg)?;

    match args.headless {
        Some(ticks) => run_headless(scenario, ticks),
        None => run_2d(scenario),
    }

    Ok(())
}
