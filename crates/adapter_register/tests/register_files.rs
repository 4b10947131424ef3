//! Filesystem tests for register loading.

use std::io::Write;

use adapter_register::{RegisterError, RegisterReader};
use quant_core::RiskError;
use quant_models::{DistributionKind, RiskFactorId};
use tempfile::NamedTempFile;

const REGISTER: &str = "\
Risk,Risk Title,Taxonomy Level I,Distribution,Converted Likelihood,Converted Lower Impact,Converted Max Impact,Mean,Std
1,Cyber attack,Technology,Lognormal,0.10,50000,2000000,,
2,Supplier default,Operational,Normal,0.25,,,300000,60000
3,Contract penalties,Operational,UNIFORM,0.40,10000,90000,,
4,Energy prices,Market,Deterministic Trend,1.00,,,15000,
";

fn write_register(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_read_register_from_file() {
    let file = write_register(REGISTER);
    let register = RegisterReader::new().read_path(file.path()).unwrap();

    let ids: Vec<_> = register.iter().map(|d| d.id()).collect();
    assert_eq!(
        ids,
        (1..=4).map(RiskFactorId::new).collect::<Vec<_>>()
    );

    let kinds: Vec<_> = register.iter().map(|d| d.severity().kind()).collect();
    assert_eq!(
        kinds,
        vec![
            DistributionKind::Lognormal,
            DistributionKind::Normal,
            DistributionKind::Uniform,
            DistributionKind::DeterministicTrend,
        ]
    );
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = RegisterReader::new()
        .read_path(dir.path().join("absent.csv"))
        .unwrap_err();

    assert!(matches!(err, RegisterError::Io { .. }));
}

#[test]
fn test_invalid_likelihood_names_factor() {
    let content = REGISTER.replace("2,Supplier default,Operational,Normal,0.25", "2,Supplier default,Operational,Normal,1.25");
    let file = write_register(&content);
    let err = RegisterReader::new().read_path(file.path()).unwrap_err();

    match err.as_risk_error() {
        Some(RiskError::InvalidParameter { subject, name, .. }) => {
            assert_eq!(subject, "risk factor 2");
            assert_eq!(*name, "likelihood");
        }
        other => panic!("Expected InvalidParameter, got {:?}", other),
    }
}

#[test]
fn test_non_positive_lognormal_bound() {
    let content = REGISTER.replace("0.10,50000,2000000", "0.10,0,2000000");
    let file = write_register(&content);
    let err = RegisterReader::new().read_path(file.path()).unwrap_err();

    assert!(err.to_string().contains("risk factor 1"));
}
