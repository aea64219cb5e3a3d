use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;

use army_planner::{run, ParamOverrides, RunnerConfig, SolverBackend, SolverConfig};

/// Compute offensive army compositions under every objective priority ordering
#[derive(Debug, Parser)]
#[command(name = "army-planner", version, about)]
struct Cli {
    /// Directory containing params.csv
    #[arg(long, default_value = ".")]
    input_dir: PathBuf,

    /// Directory solution.csv is written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Solver backend: auto, cbc, highs or microlp
    #[arg(long, default_value = "auto")]
    solver: SolverBackend,

    /// Per-solve time limit in seconds, for engines that support it
    #[arg(long)]
    time_limit: Option<f64>,

    /// Relative MIP gap, for engines that support it
    #[arg(long)]
    gap: Option<f64>,

    /// Axe strength weight (overrides params.csv)
    #[arg(long)]
    axe: Option<f64>,

    /// Light cavalry strength weight (overrides params.csv)
    #[arg(long)]
    lc: Option<f64>,

    /// Mounted archer strength weight (overrides params.csv)
    #[arg(long)]
    ma: Option<f64>,

    /// Build time ceiling per facility in seconds (overrides params.csv)
    #[arg(long)]
    build_time_limit: Option<u64>,

    /// Debug logging and solver output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins if set
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let config = RunnerConfig::new(&cli.input_dir, &cli.output_dir)
        .with_overrides(ParamOverrides {
            axe_strength: cli.axe,
            lc_strength: cli.lc,
            ma_strength: cli.ma,
            build_time_limit_seconds: cli.build_time_limit,
        })
        .with_solver(SolverConfig {
            backend: cli.solver,
            time_limit: cli.time_limit,
            gap_tolerance: cli.gap,
            verbose: cli.verbose,
        });

    let (path, records) = run(&config)
        .inspect_err(|e| error!("Planning failed: {e}"))
        .with_context(|| format!("planning with inputs from {}", cli.input_dir.display()))?;

    info!("{} solutions written to {}", records.len(), path.display());
    Ok(())
}
