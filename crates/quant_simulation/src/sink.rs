//! Artefact persistence side channel.

use quant_core::{PathMatrix, RiskResult};

use crate::sampler::FactorPaths;

/// Receives simulation artefacts once the numeric work has finished.
///
/// Implementations typically write tables to disk. Failures are reported
/// back through [`SimulationOutcome::persistence_errors`](crate::SimulationOutcome)
/// and never discard the in-memory results.
pub trait ArtifactSink {
    /// Persists one factor's impact and materialization matrices.
    fn persist_factor(&self, paths: &FactorPaths) -> RiskResult<()>;

    /// Persists the aggregate impact matrix.
    fn persist_aggregate(&self, aggregate: &PathMatrix) -> RiskResult<()>;
}
