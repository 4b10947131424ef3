//! Process command implementation
//!
//! Simulates one of the auxiliary continuous-time processes and saves its
//! paths as CSV.

use std::path::{Path, PathBuf};

use quant_core::SimulationRng;
use quant_models::{
    ExponentialDriftParams, ExponentialDriftProcess, MeanRevertingParams, MeanRevertingProcess,
    ProcessGrid, ProcessModel, ProcessPaths, StochasticProcess,
};
use tracing::info;

use crate::artifacts::CsvArtifactWriter;
use crate::output::create_timestamped_dir;
use crate::Result;

/// Simulation grid and output settings shared by both process commands
#[derive(Debug, Clone)]
pub struct ProcessRun {
    /// Horizon in years
    pub horizon: f64,
    /// Number of time points
    pub steps: usize,
    /// Number of scenarios
    pub scenarios: usize,
    /// Generator seed
    pub seed: u64,
    /// Root of the timestamped output directory
    pub output_root: PathBuf,
}

/// Build an exponential drift (GBM) model
pub fn exponential_drift(drift: f64, volatility: f64, initial_value: f64) -> Result<ProcessModel> {
    let params = ExponentialDriftParams::new(drift, volatility, initial_value)?;
    Ok(ExponentialDriftProcess::new(params).into())
}

/// Build a mean reverting (Vasicek) model
pub fn mean_reverting(
    long_run_mean: f64,
    volatility: f64,
    reversion_rate: f64,
    initial_value: f64,
) -> Result<ProcessModel> {
    let params =
        MeanRevertingParams::new(long_run_mean, volatility, reversion_rate, initial_value)?;
    Ok(MeanRevertingProcess::new(params).into())
}

/// Run the process command, returning the written CSV path
pub fn run(model: &ProcessModel, settings: &ProcessRun) -> Result<PathBuf> {
    let grid = ProcessGrid::new(settings.horizon, settings.steps, settings.scenarios)?;

    info!("Simulating {} process...", model.process_name());
    info!("  Horizon: {}", settings.horizon);
    info!("  Steps: {}", settings.steps);
    info!("  Scenarios: {}", settings.scenarios);

    let mut rng = SimulationRng::from_seed(settings.seed);
    let paths = model.simulate(&grid, &mut rng);

    let dir = create_timestamped_dir(&settings.output_root)?;
    let path = save(&dir, model, &paths)?;

    println!("{}", path.display());
    Ok(path)
}

fn save(dir: &Path, model: &ProcessModel, paths: &ProcessPaths) -> Result<PathBuf> {
    let writer = CsvArtifactWriter::new(dir);
    Ok(writer.write_process_paths(model.process_name(), paths)?)
}
