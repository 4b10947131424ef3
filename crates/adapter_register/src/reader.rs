//! Register loading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use quant_core::RiskError;
use quant_models::RiskFactorDefinition;
use tracing::{debug, info};

use crate::error::RegisterError;
use crate::row::{RegisterRow, REQUIRED_COLUMNS};

/// Reads risk registers from delimited text.
///
/// # Examples
///
/// ```rust
/// use adapter_register::RegisterReader;
///
/// let csv = "\
/// Risk,Risk Title,Taxonomy Level I,Distribution,Converted Likelihood,Converted Lower Impact,Converted Max Impact,Mean,Std
/// 1,Flood,Physical,Lognormal,0.05,1000,10000,,
/// 2,Inflation,Financial,Deterministic Trend,1,,,250,
/// ";
///
/// let register = RegisterReader::new().read(csv.as_bytes()).unwrap();
/// assert_eq!(register.len(), 2);
/// assert_eq!(register[1].title(), "Inflation");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct RegisterReader {
    delimiter: u8,
}

impl Default for RegisterReader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl RegisterReader {
    /// Creates a comma-delimited reader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field delimiter.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Loads a register file.
    ///
    /// # Errors
    ///
    /// See [`read`](Self::read); additionally [`RegisterError::Io`] if the
    /// file cannot be opened.
    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<Vec<RiskFactorDefinition>, RegisterError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| RegisterError::Io {
            path: path.display().to_string(),
            source,
        })?;
        info!(path = %path.display(), "Reading risk register");
        self.read(file)
    }

    /// Parses a register, validating every row.
    ///
    /// Rows are returned in file order. Columns other than the required
    /// ones are ignored.
    ///
    /// # Errors
    ///
    /// - [`RiskError::MissingRiskFactorColumn`] if a required column is absent
    /// - [`RiskError::UnknownDistribution`] / [`RiskError::InvalidParameter`]
    ///   for the first invalid row
    /// - [`RegisterError::Csv`] for undecodable content
    pub fn read<R: Read>(&self, source: R) -> Result<Vec<RiskFactorDefinition>, RegisterError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .from_reader(source);

        let headers = reader.headers()?.clone();
        ensure_required_columns(&headers)?;

        let mut definitions = Vec::new();
        for record in reader.deserialize::<RegisterRow>() {
            let row = record?;
            debug!(risk_id = row.risk, distribution = %row.distribution, "Parsed register row");
            definitions.push(row.into_definition()?);
        }

        info!(factors = definitions.len(), "Risk register loaded");
        Ok(definitions)
    }
}

fn ensure_required_columns(headers: &StringRecord) -> Result<(), RiskError> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(RiskError::MissingRiskFactorColumn(column.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Risk,Risk Title,Taxonomy Level I,Distribution,Converted Likelihood,\
                          Converted Lower Impact,Converted Max Impact,Mean,Std";

    #[test]
    fn test_missing_column_reported_by_name() {
        let csv = "Risk,Risk Title,Distribution\n1,t,Normal\n";
        let err = RegisterReader::new().read(csv.as_bytes()).unwrap_err();

        assert_eq!(
            err.as_risk_error(),
            Some(&RiskError::MissingRiskFactorColumn("Taxonomy Level I".to_string()))
        );
    }

    #[test]
    fn test_extra_columns_ignored() {
        let csv = format!("{},Owner\n3,Strike,People,Uniform,0.5,10,20,,,HR\n", HEADER);
        let register = RegisterReader::new().read(csv.as_bytes()).unwrap();

        assert_eq!(register.len(), 1);
        assert_eq!(register[0].taxonomy(), "People");
    }

    #[test]
    fn test_semicolon_delimiter() {
        let csv = format!("{}\n4;Fire;Physical;normal;0.1;;;500;50\n", HEADER.replace(',', ";"));
        let register = RegisterReader::new()
            .delimiter(b';')
            .read(csv.as_bytes())
            .unwrap();

        assert_eq!(register[0].likelihood(), 0.1);
    }

    #[test]
    fn test_unknown_distribution() {
        let csv = format!("{}\n9,Quake,Physical,Weibull,0.1,1,2,,\n", HEADER);
        let err = RegisterReader::new().read(csv.as_bytes()).unwrap_err();

        assert_eq!(
            err.as_risk_error(),
            Some(&RiskError::unknown_distribution(9, "Weibull"))
        );
    }

    #[test]
    fn test_non_numeric_likelihood_is_csv_error() {
        let csv = format!("{}\n1,t,x,Normal,likely,,,1,1\n", HEADER);
        let err = RegisterReader::new().read(csv.as_bytes()).unwrap_err();

        assert!(matches!(err, RegisterError::Csv(_)));
    }
}
