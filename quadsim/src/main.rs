use quadsim::{bench_curve, ScenarioConfig, Scenario};
use quadsim::simulation::states::{center_of_mass, kinetic_energy, total_momentum};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file inside the crate's `scenarios/` directory
    #[arg(short, default_value = "galaxy.yaml")]
    file_name: String,

    /// Override the number of steps from the scenario
    #[arg(long)]
    steps: Option<usize>,

    /// Print a pairwise vs Barnes–Hut timing curve instead of running the scenario
    #[arg(long)]
    bench: bool,

    #[arg(short, long)]
    verbose: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let scenario_cfg = ScenarioConfig::from_yaml_file(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;
    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)?;

    if args.bench {
        bench_curve(&[200, 400, 800, 1600, 3200, 6400], 3)?;
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg)?;
    let steps = args.steps.unwrap_or(scenario.steps);

    let p0 = total_momentum(&scenario.bodies);
    scenario.run(steps);
    let p1 = total_momentum(&scenario.bodies);

    info!("t = {:.3} after {} steps", scenario.time, steps);
    info!("momentum drift = {:.3e}", (p1 - p0).norm());
    info!("kinetic energy = {:.6e}", kinetic_energy(&scenario.bodies));
    if let Some(com) = center_of_mass(&scenario.bodies) {
        info!("center of mass = ({:.3}, {:.3})", com.x, com.y);
    }

    Ok(())
}
