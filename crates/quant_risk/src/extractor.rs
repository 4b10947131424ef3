//! Horizon statistics extraction.

use std::collections::HashMap;

use quant_core::{PathMatrix, RiskError, RiskResult};
use quant_models::RiskFactorDefinition;
use quant_simulation::{FactorPaths, SimulationOutcome};
use tracing::info;

use crate::statistics::HorizonStatistics;
use crate::summary::{HorizonSummaryRow, PerFactorHorizonSummary};

/// Per-factor summary and aggregate statistics at the horizon.
#[derive(Clone, Debug, PartialEq)]
pub struct HorizonReport {
    /// Per-factor horizon impacts, in register order.
    pub summary: PerFactorHorizonSummary,
    /// Statistics of the aggregate horizon impact.
    pub statistics: HorizonStatistics,
}

/// Extracts horizon-level results from a completed simulation.
#[derive(Clone, Copy, Debug, Default)]
pub struct StatisticsExtractor;

impl StatisticsExtractor {
    /// Creates an extractor.
    pub fn new() -> Self {
        Self
    }

    /// Builds the per-factor horizon summary and the aggregate statistics.
    ///
    /// Summary rows follow register order and take taxonomy and title from
    /// the register.
    ///
    /// # Errors
    ///
    /// - [`RiskError::InvalidParameter`] if a register factor has no paths
    ///   or the aggregate has no periods or scenarios
    /// - [`RiskError::DimensionMismatch`] if a factor's paths do not share
    ///   the aggregate's shape
    pub fn extract(
        &self,
        factors: &[FactorPaths],
        register: &[RiskFactorDefinition],
        aggregate: &PathMatrix,
    ) -> RiskResult<HorizonReport> {
        info!("Aggregating simulation results per risk factor at horizon");

        let by_id: HashMap<_, _> = factors.iter().map(|paths| (paths.id(), paths)).collect();

        let rows = register
            .iter()
            .map(|definition| {
                let paths = by_id.get(&definition.id()).ok_or_else(|| {
                    RiskError::invalid_factor_parameter(
                        definition.id().value(),
                        "id",
                        "has no simulated paths",
                    )
                })?;
                aggregate.ensure_same_shape(paths.impacts())?;
                Ok(HorizonSummaryRow {
                    risk_id: definition.id(),
                    taxonomy: definition.taxonomy().to_string(),
                    title: definition.title().to_string(),
                    horizon_impacts: paths.horizon_impacts().to_vec(),
                })
            })
            .collect::<RiskResult<Vec<_>>>()?;

        let statistics = HorizonStatistics::from_samples(aggregate.last_row())?;

        info!(
            factors = rows.len(),
            p99 = statistics.p99,
            mean = statistics.mean,
            "Simulation results per risk factor at horizon aggregated"
        );

        Ok(HorizonReport {
            summary: PerFactorHorizonSummary::new(rows),
            statistics,
        })
    }

    /// Convenience wrapper over [`extract`](Self::extract) for an aggregator outcome.
    ///
    /// # Errors
    ///
    /// See [`extract`](Self::extract).
    pub fn extract_outcome(
        &self,
        outcome: &SimulationOutcome,
        register: &[RiskFactorDefinition],
    ) -> RiskResult<HorizonReport> {
        self.extract(&outcome.factors, register, &outcome.aggregate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quant_models::{RiskFactorId, SeverityModel};
    use quant_simulation::{SimulationAggregator, SimulationConfig};

    fn register() -> Vec<RiskFactorDefinition> {
        vec![
            RiskFactorDefinition::new(
                RiskFactorId::new(2),
                "Data breach",
                "Technology",
                0.4,
                SeverityModel::Uniform {
                    min: 10.0,
                    max: 20.0,
                },
            )
            .unwrap(),
            RiskFactorDefinition::new(
                RiskFactorId::new(1),
                "Wage inflation",
                "Financial",
                1.0,
                SeverityModel::DeterministicTrend { mean: 3.0 },
            )
            .unwrap(),
        ]
    }

    fn outcome(register: &[RiskFactorDefinition]) -> SimulationOutcome {
        let config = SimulationConfig::builder()
            .n_scenarios(200)
            .n_periods(4)
            .build()
            .unwrap();
        SimulationAggregator::new(config).run(register).unwrap()
    }

    #[test]
    fn test_summary_follows_register_order() {
        let register = register();
        let report = StatisticsExtractor::new()
            .extract_outcome(&outcome(&register), &register)
            .unwrap();

        let rows = report.summary.rows();
        assert_eq!(rows[0].risk_id, RiskFactorId::new(2));
        assert_eq!(rows[0].title, "Data breach");
        assert_eq!(rows[1].taxonomy, "Financial");
        assert!(rows[1].horizon_impacts.iter().all(|&v| v == 9.0));
    }

    #[test]
    fn test_statistics_use_final_aggregate_row() {
        let register = register();
        let outcome = outcome(&register);
        let report = StatisticsExtractor::new()
            .extract_outcome(&outcome, &register)
            .unwrap();

        let expected = HorizonStatistics::from_samples(outcome.aggregate.last_row()).unwrap();
        assert_eq!(report.statistics, expected);
        assert!(report.statistics.mean >= 9.0);
    }

    #[test]
    fn test_missing_factor_paths() {
        let register = register();
        let outcome = outcome(&register[..1]);
        let err = StatisticsExtractor::new()
            .extract_outcome(&outcome, &register)
            .unwrap_err();

        assert!(err.to_string().contains("risk factor 1"));
    }

    #[test]
    fn test_shape_mismatch() {
        let register = register();
        let outcome = outcome(&register);
        let wrong = PathMatrix::zeros(2, 200);
        let err = StatisticsExtractor::new()
            .extract(&outcome.factors, &register, &wrong)
            .unwrap_err();

        assert!(matches!(err, RiskError::DimensionMismatch { .. }));
    }
}
