//! CSV artefact tables.
//!
//! File names:
//!
//! | Artefact | File |
//! |---|---|
//! | factor impacts | `simulation_of_impacts_risk_<id>.csv` |
//! | factor materialization | `materialization_risk_<id>.csv` |
//! | aggregate impacts | `total_simulated_impacts.csv` |
//! | per-factor horizon summary | `horizon_results.csv` |
//! | horizon statistics | `total_impact_metrics_at_horizon.csv` |
//! | loss exceedance curve | `loss_exceedance_curve.csv` |
//! | process paths | `<process>_simulation_results.csv` |

use std::fmt::Display;
use std::path::{Path, PathBuf};

use quant_core::{Matrix, PathMatrix, RiskError, RiskResult};
use quant_models::ProcessPaths;
use quant_risk::{ExceedancePoint, HorizonStatistics, PerFactorHorizonSummary};
use quant_simulation::{ArtifactSink, FactorPaths};
use tracing::info;

/// Writes simulation artefacts as flat CSV tables into one directory.
#[derive(Clone, Debug)]
pub struct CsvArtifactWriter {
    dir: PathBuf,
}

impl CsvArtifactWriter {
    /// Creates a writer targeting an existing directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes the per-factor horizon summary.
    ///
    /// One row per factor: `risk`, one column per scenario, then
    /// `taxonomy` and `title`.
    pub fn write_horizon_summary(&self, summary: &PerFactorHorizonSummary) -> RiskResult<PathBuf> {
        let path = self.dir.join("horizon_results.csv");
        let mut header = vec!["risk".to_string()];
        header.extend((0..summary.n_scenarios()).map(|s| s.to_string()));
        header.push("taxonomy".to_string());
        header.push("title".to_string());

        let rows = summary.rows().iter().map(|row| {
            let mut record = Vec::with_capacity(row.horizon_impacts.len() + 3);
            record.push(row.risk_id.to_string());
            record.extend(row.horizon_impacts.iter().map(|v| v.to_string()));
            record.push(row.taxonomy.clone());
            record.push(row.title.clone());
            record
        });

        write_table(&path, &header, rows)?;
        Ok(path)
    }

    /// Writes the single-row horizon statistics table.
    pub fn write_horizon_statistics(&self, stats: &HorizonStatistics) -> RiskResult<PathBuf> {
        let path = self.dir.join("total_impact_metrics_at_horizon.csv");
        let labelled = stats.labelled();

        let mut header = vec![String::new()];
        header.extend(labelled.iter().map(|(label, _)| label.to_string()));
        let mut row = vec!["Horizon".to_string()];
        row.extend(labelled.iter().map(|(_, value)| value.to_string()));

        write_table(&path, &header, std::iter::once(row))?;
        Ok(path)
    }

    /// Writes the loss exceedance curve as `loss,probability` rows.
    pub fn write_exceedance_curve(&self, curve: &[ExceedancePoint]) -> RiskResult<PathBuf> {
        let path = self.dir.join("loss_exceedance_curve.csv");
        let header = ["loss".to_string(), "probability".to_string()];
        let rows = curve
            .iter()
            .map(|point| vec![point.loss.to_string(), point.probability.to_string()]);

        write_table(&path, &header, rows)?;
        Ok(path)
    }

    /// Writes process paths: one row per period, `time` then one column per scenario.
    pub fn write_process_paths(&self, process_name: &str, paths: &ProcessPaths) -> RiskResult<PathBuf> {
        let path = self.dir.join(format!("{}_simulation_results.csv", process_name));

        let mut header = vec!["time".to_string()];
        header.extend((0..paths.paths.n_scenarios()).map(|s| s.to_string()));

        let rows = paths.time.iter().zip(paths.paths.rows()).map(|(t, values)| {
            let mut record = Vec::with_capacity(values.len() + 1);
            record.push(t.to_string());
            record.extend(values.iter().map(|v| v.to_string()));
            record
        });

        write_table(&path, &header, rows)?;
        Ok(path)
    }

    fn write_matrix<T: Display>(&self, file_name: &str, matrix: &Matrix<T>) -> RiskResult<()> {
        let path = self.dir.join(file_name);

        let mut header = vec!["period".to_string()];
        header.extend((0..matrix.n_scenarios()).map(|s| s.to_string()));

        let rows = matrix.rows().enumerate().map(|(period, values)| {
            let mut record = Vec::with_capacity(values.len() + 1);
            record.push(period.to_string());
            record.extend(values.iter().map(|v| v.to_string()));
            record
        });

        write_table(&path, &header, rows)
    }
}

impl ArtifactSink for CsvArtifactWriter {
    fn persist_factor(&self, paths: &FactorPaths) -> RiskResult<()> {
        let id = paths.id();
        self.write_matrix(&format!("simulation_of_impacts_risk_{}.csv", id), paths.impacts())?;
        self.write_matrix(&format!("materialization_risk_{}.csv", id), paths.materialization())
    }

    fn persist_aggregate(&self, aggregate: &PathMatrix) -> RiskResult<()> {
        self.write_matrix("total_simulated_impacts.csv", aggregate)
    }
}

fn write_table<I>(path: &Path, header: &[String], rows: I) -> RiskResult<()>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let io_error = |e: csv::Error| RiskError::io(format!("{}: {}", path.display(), e));

    let mut writer = csv::Writer::from_path(path).map_err(io_error)?;
    writer.write_record(header).map_err(io_error)?;
    let mut n_rows = 0;
    for row in rows {
        writer.write_record(&row).map_err(io_error)?;
        n_rows += 1;
    }
    writer
        .flush()
        .map_err(|e| RiskError::io(format!("{}: {}", path.display(), e)))?;

    info!(path = %path.display(), rows = n_rows, "Artefact written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quant_core::{MaterializationMap, SimulationRng};
    use quant_models::{
        ExponentialDriftParams, ExponentialDriftProcess, ProcessGrid, RiskFactorDefinition,
        RiskFactorId, SeverityModel, StochasticProcess,
    };
    use quant_risk::HorizonSummaryRow;
    use quant_simulation::{SimulationAggregator, SimulationConfig};

    fn read(path: &Path) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap();
        reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_sink_writes_factor_and_aggregate_tables() {
        let tmp = tempfile::tempdir().unwrap();
        let writer = CsvArtifactWriter::new(tmp.path());
        let register = vec![RiskFactorDefinition::new(
            RiskFactorId::new(7),
            "Fraud",
            "Financial",
            0.5,
            SeverityModel::Uniform {
                min: 1.0,
                max: 2.0,
            },
        )
        .unwrap()];
        let config = SimulationConfig::builder()
            .n_scenarios(4)
            .n_periods(3)
            .build()
            .unwrap();

        let outcome = SimulationAggregator::new(config)
            .run_with_sink(&register, Some(&writer))
            .unwrap();
        assert!(outcome.is_fully_persisted());

        let impacts = read(&tmp.path().join("simulation_of_impacts_risk_7.csv"));
        assert_eq!(impacts.len(), 4);
        assert_eq!(impacts[0], vec!["period", "0", "1", "2", "3"]);
        assert_eq!(impacts[3][0], "2");

        let mask = read(&tmp.path().join("materialization_risk_7.csv"));
        assert!(mask[1..].iter().flat_map(|r| &r[1..]).all(|v| v == "0" || v == "1"));

        assert!(tmp.path().join("total_simulated_impacts.csv").exists());
    }

    #[test]
    fn test_missing_directory_is_io_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let writer = CsvArtifactWriter::new(tmp.path().join("absent"));

        let err = writer.persist_aggregate(&PathMatrix::zeros(1, 1)).unwrap_err();
        assert!(err.is_io_failure());
    }

    #[test]
    fn test_materialization_values_written_as_integers() {
        let tmp = tempfile::tempdir().unwrap();
        let writer = CsvArtifactWriter::new(tmp.path());
        let mask = MaterializationMap::from_rows(vec![vec![0, 1]]).unwrap();

        writer.write_matrix("mask.csv", &mask).unwrap();
        assert_eq!(read(&tmp.path().join("mask.csv"))[1], vec!["0", "0", "1"]);
    }

    #[test]
    fn test_horizon_summary_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let writer = CsvArtifactWriter::new(tmp.path());
        let summary = PerFactorHorizonSummary::new(vec![HorizonSummaryRow {
            risk_id: RiskFactorId::new(3),
            taxonomy: "Legal".to_string(),
            title: "Litigation".to_string(),
            horizon_impacts: vec![1.5, 0.0],
        }]);

        let path = writer.write_horizon_summary(&summary).unwrap();
        let table = read(&path);
        assert_eq!(table[0], vec!["risk", "0", "1", "taxonomy", "title"]);
        assert_eq!(table[1], vec!["3", "1.5", "0", "Legal", "Litigation"]);
    }

    #[test]
    fn test_horizon_statistics_single_row() {
        let tmp = tempfile::tempdir().unwrap();
        let writer = CsvArtifactWriter::new(tmp.path());
        let stats = HorizonStatistics::from_samples(&[1.0, 2.0, 3.0]).unwrap();

        let table = read(&writer.write_horizon_statistics(&stats).unwrap());
        assert_eq!(table.len(), 2);
        assert_eq!(table[1][0], "Horizon");
        assert_eq!(table[0][1], "90%-Percentile Impact");
        assert_eq!(table[0].len(), 12);
    }

    #[test]
    fn test_exceedance_curve_table() {
        let tmp = tempfile::tempdir().unwrap();
        let writer = CsvArtifactWriter::new(tmp.path());
        let curve = quant_risk::loss_exceedance_curve(&[5.0, 15.0]);

        let table = read(&writer.write_exceedance_curve(&curve).unwrap());
        assert_eq!(table[0], vec!["loss", "probability"]);
        assert_eq!(table[1], vec!["15", "0.5"]);
        assert_eq!(table[2], vec!["5", "1"]);
    }

    #[test]
    fn test_process_paths_table() {
        let tmp = tempfile::tempdir().unwrap();
        let writer = CsvArtifactWriter::new(tmp.path());
        let process =
            ExponentialDriftProcess::new(ExponentialDriftParams::new(0.05, 0.2, 100.0).unwrap());
        let grid = ProcessGrid::new(1.0, 3, 2).unwrap();
        let paths = process.simulate(&grid, &mut SimulationRng::from_seed(1));

        let path = writer.write_process_paths(process.process_name(), &paths).unwrap();
        assert!(path.ends_with("gbm_simulation_results.csv"));

        let table = read(&path);
        assert_eq!(table[0], vec!["time", "0", "1"]);
        assert_eq!(table.len(), 4);
        assert_eq!(table[1][0], "0");
    }
}
