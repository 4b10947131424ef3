//! Console rendering of horizon results.

use std::path::Path;

use quant_core::RiskError;
use quant_risk::{HorizonStatistics, TaxonomyContribution};
use serde_json::json;

use crate::{CliError, Result};

/// Console output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Boxed text tables
    Table,
    /// A single JSON document
    Json,
}

impl OutputFormat {
    /// Parse a `--format` value
    pub fn parse(format: &str) -> Result<Self> {
        match format {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(CliError::invalid_argument(format!(
                "Unknown format: {}. Supported: table, json",
                other
            ))),
        }
    }
}

/// Render statistics, the taxonomy breakdown and any persistence failures
/// in `format`.
pub fn render(
    format: OutputFormat,
    statistics: &HorizonStatistics,
    breakdown: &[TaxonomyContribution],
    output_dir: Option<&Path>,
    persistence_errors: &[RiskError],
) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(statistics, breakdown, persistence_errors)),
        OutputFormat::Json => {
            let errors: Vec<String> = persistence_errors.iter().map(ToString::to_string).collect();
            let document = json!({
                "output_dir": output_dir.map(|dir| dir.display().to_string()),
                "statistics": statistics,
                "taxonomy": breakdown,
                "persistence_errors": errors,
            });
            Ok(serde_json::to_string_pretty(&document)?)
        }
    }
}

fn render_table(
    statistics: &HorizonStatistics,
    breakdown: &[TaxonomyContribution],
    persistence_errors: &[RiskError],
) -> String {
    let mut out = String::new();

    out.push_str("\n┌───────────────────────────┬──────────────────────┐\n");
    out.push_str("│ Metric                    │ Value                │\n");
    out.push_str("├───────────────────────────┼──────────────────────┤\n");
    for (label, value) in statistics.labelled() {
        out.push_str(&format!("│ {:<25} │ {:>20.2} │\n", label, value));
    }
    out.push_str("└───────────────────────────┴──────────────────────┘\n");

    out.push_str("\n┌───────────────────────────┬──────────────────────┬──────────┐\n");
    out.push_str("│ Taxonomy                  │ Average impact       │ % total  │\n");
    out.push_str("├───────────────────────────┼──────────────────────┼──────────┤\n");
    if breakdown.is_empty() {
        out.push_str("│ (no data)                 │                      │          │\n");
    }
    for contribution in breakdown {
        out.push_str(&format!(
            "│ {:<25} │ {:>20.2} │ {:>7.2}% │\n",
            contribution.taxonomy, contribution.average_impact, contribution.pct_of_total
        ));
    }
    out.push_str("└───────────────────────────┴──────────────────────┴──────────┘\n");

    if !persistence_errors.is_empty() {
        out.push_str(&format!(
            "\n{} artefact(s) not persisted:\n",
            persistence_errors.len()
        ));
        for error in persistence_errors {
            out.push_str(&format!("  - {}\n", error));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statistics() -> HorizonStatistics {
        HorizonStatistics::from_samples(&[0.0, 0.0, 10.0, 20.0]).unwrap()
    }

    fn breakdown() -> Vec<TaxonomyContribution> {
        vec![TaxonomyContribution {
            taxonomy: "Operational".to_string(),
            average_impact: 7.5,
            pct_of_total: 100.0,
        }]
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(OutputFormat::parse("table").unwrap(), OutputFormat::Table);
        assert_eq!(OutputFormat::parse("json").unwrap(), OutputFormat::Json);
        assert!(matches!(
            OutputFormat::parse("xml"),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_table_lists_every_metric() {
        let text = render(OutputFormat::Table, &statistics(), &breakdown(), None, &[]).unwrap();
        for (label, _) in statistics().labelled() {
            assert!(text.contains(label), "missing {}", label);
        }
        assert!(text.contains("Operational"));
        assert!(text.contains("100.00%"));
        assert!(!text.contains("not persisted"));
    }

    #[test]
    fn test_table_lists_persistence_failures() {
        let errors = [RiskError::io("outputs: File exists")];
        let text = render(OutputFormat::Table, &statistics(), &breakdown(), None, &errors).unwrap();

        assert!(text.contains("1 artefact(s) not persisted"));
        assert!(text.contains("outputs: File exists"));
    }

    #[test]
    fn test_json_document() {
        let text = render(
            OutputFormat::Json,
            &statistics(),
            &breakdown(),
            Some(Path::new("outputs/run")),
            &[RiskError::io("horizon_results.csv: disk full")],
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["statistics"]["mean"], 7.5);
        assert_eq!(value["taxonomy"][0]["taxonomy"], "Operational");
        assert_eq!(value["output_dir"], "outputs/run");
        assert_eq!(value["persistence_errors"].as_array().unwrap().len(), 1);
        assert!(value["persistence_errors"][0]
            .as_str()
            .unwrap()
            .contains("disk full"));
    }
}
