//! Contribution of each taxonomy category to the horizon impact.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::summary::PerFactorHorizonSummary;

/// Mean horizon impact attributed to one taxonomy category.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TaxonomyContribution {
    /// `Taxonomy Level I` label.
    pub taxonomy: String,
    /// Sum over the category's factors of their mean horizon impact.
    pub average_impact: f64,
    /// Share of the total across categories, in percent.
    pub pct_of_total: f64,
}

/// Groups factor mean impacts by taxonomy, sorted by label.
///
/// When the total across categories is zero every share is reported as
/// `0.0`.
///
/// # Examples
///
/// ```rust
/// use quant_models::RiskFactorId;
/// use quant_risk::{taxonomy_breakdown, HorizonSummaryRow, PerFactorHorizonSummary};
///
/// let row = |id, taxonomy: &str, impacts: Vec<f64>| HorizonSummaryRow {
///     risk_id: RiskFactorId::new(id),
///     taxonomy: taxonomy.to_string(),
///     title: String::new(),
///     horizon_impacts: impacts,
/// };
/// let summary = PerFactorHorizonSummary::new(vec![
///     row(1, "Market", vec![10.0, 30.0]),
///     row(2, "Credit", vec![20.0, 20.0]),
///     row(3, "Market", vec![0.0, 20.0]),
/// ]);
///
/// let breakdown = taxonomy_breakdown(&summary);
/// assert_eq!(breakdown[0].taxonomy, "Credit");
/// assert_eq!(breakdown[1].average_impact, 30.0);
/// assert_eq!(breakdown[1].pct_of_total, 60.0);
/// ```
pub fn taxonomy_breakdown(summary: &PerFactorHorizonSummary) -> Vec<TaxonomyContribution> {
    let mut by_taxonomy: BTreeMap<&str, f64> = BTreeMap::new();
    for row in summary.rows() {
        *by_taxonomy.entry(row.taxonomy.as_str()).or_insert(0.0) += row.mean_impact();
    }

    let total: f64 = by_taxonomy.values().sum();
    by_taxonomy
        .into_iter()
        .map(|(taxonomy, average_impact)| TaxonomyContribution {
            taxonomy: taxonomy.to_string(),
            average_impact,
            pct_of_total: if total == 0.0 {
                0.0
            } else {
                100.0 * average_impact / total
            },
        })
        .collect()
}
