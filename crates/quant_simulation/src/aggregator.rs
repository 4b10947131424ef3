//! Register-wide simulation and aggregation.
//!
//! Each risk factor is sampled as an independent rayon task with private
//! outputs. Results are collected in register order and reduced into the
//! aggregate sequentially, so the aggregate is identical regardless of
//! thread scheduling.

use std::collections::HashSet;

use quant_core::{PathMatrix, RiskError, RiskResult};
use quant_models::RiskFactorDefinition;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::cancel::CancellationToken;
use crate::config::SimulationConfig;
use crate::sampler::{FactorPaths, RiskFactorSampler};
use crate::sink::ArtifactSink;

/// Result of a register simulation.
#[derive(Clone, Debug)]
pub struct SimulationOutcome {
    /// Periods × scenarios sum of all factor impacts.
    pub aggregate: PathMatrix,
    /// Per-factor paths in register order.
    pub factors: Vec<FactorPaths>,
    /// Errors raised by the artefact sink, if any.
    pub persistence_errors: Vec<RiskError>,
}

impl SimulationOutcome {
    /// Returns true if every artefact was persisted.
    pub fn is_fully_persisted(&self) -> bool {
        self.persistence_errors.is_empty()
    }
}

/// Drives the sampler across a register and accumulates the aggregate.
///
/// # Examples
///
/// ```rust
/// use quant_models::{RiskFactorDefinition, RiskFactorId, SeverityModel};
/// use quant_simulation::{SimulationAggregator, SimulationConfig};
///
/// let register = vec![
///     RiskFactorDefinition::new(
///         RiskFactorId::new(1),
///         "Fraud",
///         "Financial",
///         0.1,
///         SeverityModel::Normal { mean: 100.0, std_dev: 10.0 },
///     )
///     .unwrap(),
///     RiskFactorDefinition::new(
///         RiskFactorId::new(2),
///         "Inflation",
///         "Market",
///         1.0,
///         SeverityModel::DeterministicTrend { mean: 5.0 },
///     )
///     .unwrap(),
/// ];
///
/// let config = SimulationConfig::builder().n_scenarios(500).n_periods(3).build().unwrap();
/// let outcome = SimulationAggregator::new(config).run(&register).unwrap();
///
/// assert_eq!(outcome.factors.len(), 2);
/// assert_eq!(outcome.aggregate.shape(), (3, 500));
/// ```
#[derive(Clone, Debug)]
pub struct SimulationAggregator {
    config: SimulationConfig,
    cancellation: CancellationToken,
}

impl SimulationAggregator {
    /// Creates an aggregator with a fresh cancellation token.
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            cancellation: CancellationToken::new(),
        }
    }

    /// Uses `token` for cooperative cancellation.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Returns a handle to the cancellation token.
    #[inline]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Simulates the register without persisting artefacts.
    ///
    /// # Errors
    ///
    /// See [`run_with_sink`](Self::run_with_sink).
    pub fn run(&self, register: &[RiskFactorDefinition]) -> RiskResult<SimulationOutcome> {
        self.run_with_sink(register, None)
    }

    /// Simulates the register and hands the artefacts to `sink`.
    ///
    /// Sink failures are logged and collected in
    /// [`SimulationOutcome::persistence_errors`]; they never abort the run.
    ///
    /// # Errors
    ///
    /// - [`RiskError::InvalidParameter`] for an invalid configuration or a
    ///   duplicated risk identifier (checked before any sampling)
    /// - any error raised while sampling a factor; no partial results are
    ///   returned
    /// - [`RiskError::Cancelled`] if cancellation was requested before every
    ///   factor task started
    pub fn run_with_sink(
        &self,
        register: &[RiskFactorDefinition],
        sink: Option<&dyn ArtifactSink>,
    ) -> RiskResult<SimulationOutcome> {
        self.config.validate()?;
        ensure_unique_ids(register)?;

        info!(
            factors = register.len(),
            periods = self.config.n_periods(),
            scenarios = self.config.n_scenarios(),
            seed = self.config.seed(),
            "Starting register simulation"
        );

        let sampler = RiskFactorSampler::new(&self.config);
        let factors = register
            .par_iter()
            .map(|factor| {
                if self.cancellation.is_cancelled() {
                    return Err(RiskError::Cancelled);
                }
                info!(risk_id = %factor.id(), "Simulating impact of risk factor {}", factor.id());
                let paths = sampler.sample(factor)?;
                info!(
                    risk_id = %factor.id(),
                    "Simulation of impact for risk factor {} completed", factor.id()
                );
                Ok(paths)
            })
            .collect::<RiskResult<Vec<_>>>()?;

        let mut aggregate = PathMatrix::zeros(self.config.n_periods(), self.config.n_scenarios());
        for paths in &factors {
            aggregate.add_assign_checked(paths.impacts())?;
        }
        debug!("Aggregate impact path reduced over {} factors", factors.len());

        let persistence_errors = match sink {
            Some(sink) => persist(sink, &factors, &aggregate),
            None => Vec::new(),
        };

        Ok(SimulationOutcome {
            aggregate,
            factors,
            persistence_errors,
        })
    }
}

fn ensure_unique_ids(register: &[RiskFactorDefinition]) -> RiskResult<()> {
    let mut seen = HashSet::with_capacity(register.len());
    for factor in register {
        if !seen.insert(factor.id()) {
            return Err(RiskError::invalid_factor_parameter(
                factor.id().value(),
                "id",
                "appears more than once in the register",
            ));
        }
    }
    Ok(())
}

fn persist(
    sink: &dyn ArtifactSink,
    factors: &[FactorPaths],
    aggregate: &PathMatrix,
) -> Vec<RiskError> {
    let mut errors = Vec::new();
    for paths in factors {
        if let Err(e) = sink.persist_factor(paths) {
            warn!(risk_id = %paths.id(), error = %e, "Failed to persist risk factor artefacts");
            errors.push(e);
        }
    }
    if let Err(e) = sink.persist_aggregate(aggregate) {
        warn!(error = %e, "Failed to persist aggregate impacts");
        errors.push(e);
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use quant_models::{RiskFactorId, SeverityModel};
    use std::sync::Mutex;

    fn factor(id: u64) -> RiskFactorDefinition {
        RiskFactorDefinition::new(
            RiskFactorId::new(id),
            "title",
            "taxonomy",
            0.5,
            SeverityModel::Uniform {
                min: 0.0,
                max: 10.0,
            },
        )
        .unwrap()
    }

    fn config() -> SimulationConfig {
        SimulationConfig::builder()
            .n_scenarios(64)
            .n_periods(3)
            .build()
            .unwrap()
    }

    #[derive(Default)]
    struct RecordingSink {
        factors: Mutex<Vec<RiskFactorId>>,
        aggregates: Mutex<usize>,
        fail_on: Option<RiskFactorId>,
    }

    impl ArtifactSink for RecordingSink {
        fn persist_factor(&self, paths: &FactorPaths) -> RiskResult<()> {
            if Some(paths.id()) == self.fail_on {
                return Err(RiskError::io("disk full"));
            }
            self.factors.lock().unwrap().push(paths.id());
            Ok(())
        }

        fn persist_aggregate(&self, _aggregate: &PathMatrix) -> RiskResult<()> {
            *self.aggregates.lock().unwrap() += 1;
            Ok(())
        }
    }

    #[test]
    fn test_results_in_register_order() {
        let register: Vec<_> = [9, 3, 7, 1].into_iter().map(factor).collect();
        let outcome = SimulationAggregator::new(config()).run(&register).unwrap();

        let ids: Vec<u64> = outcome.factors.iter().map(|f| f.id().value()).collect();
        assert_eq!(ids, vec![9, 3, 7, 1]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let register = vec![factor(1), factor(2), factor(1)];
        let err = SimulationAggregator::new(config()).run(&register).unwrap_err();

        match err {
            RiskError::InvalidParameter { subject, name, .. } => {
                assert_eq!(subject, "risk factor 1");
                assert_eq!(name, "id");
            }
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_register_yields_zero_aggregate() {
        let outcome = SimulationAggregator::new(config()).run(&[]).unwrap();

        assert!(outcome.factors.is_empty());
        assert!(outcome.aggregate.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_cancelled_before_start() {
        let token = CancellationToken::new();
        token.cancel();
        let aggregator = SimulationAggregator::new(config()).with_cancellation(token);

        assert_eq!(aggregator.run(&[factor(1)]).unwrap_err(), RiskError::Cancelled);
    }

    #[test]
    fn test_sink_receives_every_artefact() {
        let sink = RecordingSink::default();
        let register = vec![factor(4), factor(2)];
        let outcome = SimulationAggregator::new(config())
            .run_with_sink(&register, Some(&sink))
            .unwrap();

        assert!(outcome.is_fully_persisted());
        assert_eq!(
            *sink.factors.lock().unwrap(),
            vec![RiskFactorId::new(4), RiskFactorId::new(2)]
        );
        assert_eq!(*sink.aggregates.lock().unwrap(), 1);
    }

    #[test]
    fn test_sink_failure_is_isolated() {
        let sink = RecordingSink {
            fail_on: Some(RiskFactorId::new(2)),
            ..Default::default()
        };
        let register = vec![factor(1), factor(2), factor(3)];
        let outcome = SimulationAggregator::new(config())
            .run_with_sink(&register, Some(&sink))
            .unwrap();

        assert_eq!(outcome.factors.len(), 3);
        assert_eq!(outcome.persistence_errors.len(), 1);
        assert!(outcome.persistence_errors[0].is_io_failure());
        assert_eq!(*sink.aggregates.lock().unwrap(), 1);
    }
}
