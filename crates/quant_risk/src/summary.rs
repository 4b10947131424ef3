//! Per-factor horizon summary.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use quant_models::RiskFactorId;

/// Final-period impacts of one risk factor, annotated from the register.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HorizonSummaryRow {
    /// Risk factor identifier.
    pub risk_id: RiskFactorId,
    /// `Taxonomy Level I` of the factor.
    pub taxonomy: String,
    /// `Risk Title` of the factor.
    pub title: String,
    /// Impact in each scenario at the horizon.
    pub horizon_impacts: Vec<f64>,
}

impl HorizonSummaryRow {
    /// Mean impact across scenarios (`0.0` for an empty row).
    pub fn mean_impact(&self) -> f64 {
        if self.horizon_impacts.is_empty() {
            return 0.0;
        }
        self.horizon_impacts.iter().sum::<f64>() / self.horizon_impacts.len() as f64
    }
}

/// Horizon impacts of every risk factor, in register order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PerFactorHorizonSummary {
    rows: Vec<HorizonSummaryRow>,
}

impl PerFactorHorizonSummary {
    /// Wraps rows already in register order.
    pub fn new(rows: Vec<HorizonSummaryRow>) -> Self {
        Self { rows }
    }

    /// Rows in register order.
    #[inline]
    pub fn rows(&self) -> &[HorizonSummaryRow] {
        &self.rows
    }

    /// Number of factors.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the register was empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up a factor's row.
    pub fn get(&self, risk_id: RiskFactorId) -> Option<&HorizonSummaryRow> {
        self.rows.iter().find(|row| row.risk_id == risk_id)
    }

    /// Number of scenarios per row (`0` when empty).
    pub fn n_scenarios(&self) -> usize {
        self.rows.first().map_or(0, |row| row.horizon_impacts.len())
    }
}
