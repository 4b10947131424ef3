//! Run command implementation
//!
//! Quantifies a risk register: loads it, simulates every factor, writes
//! artefacts and prints the horizon statistics.

use std::path::{Path, PathBuf};

use adapter_register::RegisterReader;
use quant_core::{RiskError, RiskResult};
use quant_risk::{loss_exceedance_curve, taxonomy_breakdown, HorizonReport, StatisticsExtractor};
use quant_simulation::{ArtifactSink, SimulationAggregator};
use tracing::{info, warn};

use crate::artifacts::CsvArtifactWriter;
use crate::config::RunConfig;
use crate::output::create_timestamped_dir;
use crate::report::{self, OutputFormat};
use crate::Result;

/// Command line overrides applied on top of the loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    /// Risk register path
    pub register: Option<PathBuf>,
    /// Number of scenarios
    pub scenarios: Option<usize>,
    /// Number of periods
    pub periods: Option<usize>,
    /// Base seed
    pub seed: Option<u64>,
    /// Cap value (also enables the cap)
    pub cap: Option<f64>,
    /// Disable the cap
    pub no_cap: bool,
    /// Do not multiply severities by the materialization mask
    pub dependent: bool,
    /// Output root
    pub output_root: Option<PathBuf>,
    /// Skip writing artefacts
    pub no_save: bool,
}

impl RunOverrides {
    /// Apply the overrides to `config`
    pub fn apply(&self, mut config: RunConfig) -> RunConfig {
        if let Some(register) = &self.register {
            config.register_path = register.clone();
        }
        if let Some(scenarios) = self.scenarios {
            config.scenarios = scenarios;
        }
        if let Some(periods) = self.periods {
            config.periods = periods;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(cap) = self.cap {
            config.cap_enabled = true;
            config.cap_value = cap;
        }
        if self.no_cap {
            config.cap_enabled = false;
        }
        if self.dependent {
            config.independent_sampling = false;
        }
        if let Some(root) = &self.output_root {
            config.output_root = root.clone();
        }
        if self.no_save {
            config.save_interim_files = false;
        }
        config
    }
}

/// Outcome of a quantification run
#[derive(Debug)]
pub struct RunSummary {
    /// Horizon summary and statistics
    pub report: HorizonReport,
    /// Directory the artefacts were written to, if saving was enabled and
    /// the directory could be created
    pub output_dir: Option<PathBuf>,
    /// Artefacts that could not be persisted; the results are still complete
    pub persistence_errors: Vec<RiskError>,
}

/// Run the run command
pub fn run(config: &RunConfig, format: &str) -> Result<()> {
    let format = OutputFormat::parse(format)?;
    let summary = quantify(config)?;

    let breakdown = taxonomy_breakdown(&summary.report.summary);
    let rendered = report::render(
        format,
        &summary.report.statistics,
        &breakdown,
        summary.output_dir.as_deref(),
        &summary.persistence_errors,
    )?;
    println!("{}", rendered);

    Ok(())
}

/// Simulate the register described by `config` and write its artefacts
pub fn quantify(config: &RunConfig) -> Result<RunSummary> {
    config.validate()?;

    info!("Starting register quantification...");
    info!("  Register: {}", config.register_path.display());
    info!("  Scenarios: {}", config.scenarios);
    info!("  Periods: {}", config.periods);
    info!("  Seed: {}", config.seed);

    let register = RegisterReader::new().read_path(&config.register_path)?;
    let simulation_config = config.simulation_config()?;

    let mut persistence_errors = Vec::new();
    let writer = if config.save_interim_files {
        match open_writer(&config.output_root) {
            Ok(writer) => Some(writer),
            Err(error) => {
                warn!(error = %error, "Output directory unavailable, artefacts will not be written");
                persistence_errors.push(error);
                None
            }
        }
    } else {
        None
    };

    let aggregator = SimulationAggregator::new(simulation_config);
    let outcome = aggregator.run_with_sink(
        &register,
        writer.as_ref().map(|w| w as &dyn ArtifactSink),
    )?;
    for error in &outcome.persistence_errors {
        warn!(error = %error, "Artefact could not be persisted");
    }
    persistence_errors.extend(outcome.persistence_errors.iter().cloned());

    let report = StatisticsExtractor::new().extract_outcome(&outcome, &register)?;

    if let Some(writer) = &writer {
        persistence_errors.extend(write_horizon_artefacts(
            writer,
            &report,
            outcome.aggregate.last_row(),
        ));
    }

    info!(
        persistence_errors = persistence_errors.len(),
        "Register quantification complete"
    );
    Ok(RunSummary {
        report,
        output_dir: writer.map(|w| w.dir().to_path_buf()),
        persistence_errors,
    })
}

fn open_writer(output_root: &Path) -> RiskResult<CsvArtifactWriter> {
    let dir = create_timestamped_dir(output_root)
        .map_err(|e| RiskError::io(format!("{}: {}", output_root.display(), e)))?;
    Ok(CsvArtifactWriter::new(dir))
}

fn write_horizon_artefacts(
    writer: &CsvArtifactWriter,
    report: &HorizonReport,
    horizon: &[f64],
) -> Vec<RiskError> {
    let results = [
        writer.write_horizon_summary(&report.summary),
        writer.write_horizon_statistics(&report.statistics),
        writer.write_exceedance_curve(&loss_exceedance_curve(horizon)),
    ];
    results
        .into_iter()
        .filter_map(|result| result.err())
        .inspect(|error| warn!(error = %error, "Artefact could not be persisted"))
        .collect()
}
