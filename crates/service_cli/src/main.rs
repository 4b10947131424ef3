//! riskq - Command Line Risk Register Quantification
//!
//! This is the operational entry point for the Monte Carlo quantification
//! of a risk register.
//!
//! # Commands
//!
//! - `riskq run` - Simulate the register and report horizon statistics
//! - `riskq gbm` - Simulate exponential drift (GBM) paths
//! - `riskq vasicek` - Simulate mean reverting (Vasicek) paths
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate orchestrates the register
//! adapter and the quantification layers behind a unified command-line
//! interface. Configuration is read from `riskq.toml` (if present), then
//! `RISKQ_*` environment variables, then command line flags.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod artifacts;
mod commands;
mod config;
mod error;
mod output;
mod report;

pub use error::{CliError, Result};

use commands::process::ProcessRun;
use commands::run::RunOverrides;
use config::RunConfig;

/// Risk register quantification CLI
#[derive(Parser)]
#[command(name = "riskq")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "riskq.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate the risk register and report horizon statistics
    Run {
        /// Path to the risk register CSV
        #[arg(short, long)]
        register: Option<PathBuf>,

        /// Number of Monte Carlo scenarios
        #[arg(short = 'n', long)]
        scenarios: Option<usize>,

        /// Number of periods up to the horizon
        #[arg(short, long)]
        periods: Option<usize>,

        /// Base seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Cap each stochastic factor's impact at this value
        #[arg(long, conflicts_with = "no_cap")]
        cap: Option<f64>,

        /// Disable the impact cap
        #[arg(long)]
        no_cap: bool,

        /// Do not multiply severities by the materialization mask
        #[arg(long)]
        dependent: bool,

        /// Root directory for timestamped outputs
        #[arg(short, long)]
        output_root: Option<PathBuf>,

        /// Skip writing CSV artefacts
        #[arg(long)]
        no_save: bool,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Simulate exponential drift (GBM) paths
    Gbm {
        /// Drift
        #[arg(long, default_value = "0.05")]
        drift: f64,

        /// Volatility
        #[arg(long, default_value = "0.2")]
        volatility: f64,

        /// Initial value
        #[arg(long, default_value = "100.0")]
        initial_value: f64,

        #[command(flatten)]
        grid: GridArgs,
    },

    /// Simulate mean reverting (Vasicek) paths
    Vasicek {
        /// Long-run mean
        #[arg(long, default_value = "0.03")]
        long_run_mean: f64,

        /// Volatility
        #[arg(long, default_value = "0.01")]
        volatility: f64,

        /// Speed of reversion
        #[arg(long, default_value = "0.5")]
        reversion_rate: f64,

        /// Initial value
        #[arg(long, default_value = "0.02")]
        initial_value: f64,

        #[command(flatten)]
        grid: GridArgs,
    },
}

/// Grid and output flags shared by the process commands
#[derive(clap::Args)]
struct GridArgs {
    /// Horizon in years
    #[arg(long, default_value = "1.0")]
    horizon: f64,

    /// Number of time points
    #[arg(long, default_value = "252")]
    steps: usize,

    /// Number of scenarios
    #[arg(short = 'n', long, default_value = "1000")]
    scenarios: usize,

    /// Generator seed (defaults to the configured seed)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Root directory for timestamped outputs
    #[arg(short, long)]
    output_root: Option<PathBuf>,
}

impl GridArgs {
    fn into_run(self, config: &RunConfig) -> ProcessRun {
        ProcessRun {
            horizon: self.horizon,
            steps: self.steps,
            scenarios: self.scenarios,
            seed: self.seed.unwrap_or(config.seed),
            output_root: self.output_root.unwrap_or_else(|| config.output_root.clone()),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    init_tracing(&config.log_level, cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Run {
            register,
            scenarios,
            periods,
            seed,
            cap,
            no_cap,
            dependent,
            output_root,
            no_save,
            format,
        } => {
            let overrides = RunOverrides {
                register,
                scenarios,
                periods,
                seed,
                cap,
                no_cap,
                dependent,
                output_root,
                no_save,
            };
            commands::run::run(&overrides.apply(config), &format)
        }
        Commands::Gbm {
            drift,
            volatility,
            initial_value,
            grid,
        } => {
            let model = commands::process::exponential_drift(drift, volatility, initial_value)?;
            commands::process::run(&model, &grid.into_run(&config)).map(|_| ())
        }
        Commands::Vasicek {
            long_run_mean,
            volatility,
            reversion_rate,
            initial_value,
            grid,
        } => {
            let model = commands::process::mean_reverting(
                long_run_mean,
                volatility,
                reversion_rate,
                initial_value,
            )?;
            commands::process::run(&model, &grid.into_run(&config)).map(|_| ())
        }
    }
}

fn load_config(path: &Path) -> Result<RunConfig> {
    Ok(RunConfig::load_or_default(path)?.with_env_override())
}

/// `RUST_LOG` wins; otherwise the configured level, or `debug` when verbose.
fn init_tracing(log_level: &str, verbose: bool) {
    let default_level = if verbose { "debug" } else { log_level };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_lowercase()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}
