//! Register row schema.

use quant_core::{RiskError, RiskResult};
use quant_models::{DistributionKind, RiskFactorDefinition, RiskFactorId, SeverityFields, SeverityModel};
use serde::Deserialize;

/// Columns every register must provide.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "Risk",
    "Risk Title",
    "Taxonomy Level I",
    "Distribution",
    "Converted Likelihood",
    "Converted Lower Impact",
    "Converted Max Impact",
    "Mean",
    "Std",
];

/// One raw register row; empty numeric cells decode as `None`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RegisterRow {
    /// Risk identifier.
    #[serde(rename = "Risk")]
    pub risk: u64,
    /// Risk title.
    #[serde(rename = "Risk Title")]
    pub title: String,
    /// Top-level taxonomy.
    #[serde(rename = "Taxonomy Level I")]
    pub taxonomy: String,
    /// Distribution kind as written.
    #[serde(rename = "Distribution")]
    pub distribution: String,
    /// Per-period materialization probability.
    #[serde(rename = "Converted Likelihood")]
    pub likelihood: f64,
    /// Lower impact bound.
    #[serde(rename = "Converted Lower Impact")]
    pub lower_impact: Option<f64>,
    /// Upper impact bound.
    #[serde(rename = "Converted Max Impact")]
    pub max_impact: Option<f64>,
    /// Mean impact.
    #[serde(rename = "Mean")]
    pub mean: Option<f64>,
    /// Standard deviation of impact.
    #[serde(rename = "Std")]
    pub std: Option<f64>,
}

impl RegisterRow {
    /// Resolves the row into a validated definition.
    ///
    /// # Errors
    ///
    /// - [`RiskError::UnknownDistribution`] for an unsupported distribution
    /// - [`RiskError::InvalidParameter`] for missing or invalid parameters
    pub fn into_definition(self) -> RiskResult<RiskFactorDefinition> {
        let kind = DistributionKind::parse(&self.distribution)
            .ok_or_else(|| RiskError::unknown_distribution(self.risk, self.distribution.trim()))?;

        let fields = SeverityFields {
            mean: self.mean,
            std_dev: self.std,
            lower_impact: self.lower_impact,
            upper_impact: self.max_impact,
        };
        let severity = SeverityModel::from_fields(kind, &fields, self.risk)?;

        RiskFactorDefinition::new(
            RiskFactorId::new(self.risk),
            self.title,
            self.taxonomy,
            self.likelihood,
            severity,
        )
    }
}
