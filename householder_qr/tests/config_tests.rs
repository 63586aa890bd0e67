//! Loading benchmark settings from disk.

use std::io::Write;

use householder_qr::{BenchConfig, ConfigError, MatrixSource, Parallelism, QrError};
use pretty_assertions::assert_eq;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r#"
rows = 10
cols = 7
precision_digits = 40
seed = 99
source = "fixed"
concurrent = false
parallelism = "rayon"
"#,
    );
    let config = BenchConfig::load(file.path()).unwrap();
    assert_eq!(
        config,
        BenchConfig {
            rows: 10,
            cols: 7,
            precision_digits: 40,
            seed: 99,
            source: MatrixSource::Fixed,
            concurrent: false,
            parallelism: Parallelism::Rayon,
        }
    );
    let options = config.compare_options().unwrap();
    assert_eq!(options.precision.digits(), 40);
    assert!(!options.concurrent);
    assert_eq!(config.matrix().shape(), (10, 7));
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let err = BenchConfig::load(&path).unwrap_err();
    match &err {
        ConfigError::Io { path: p, .. } => assert_eq!(p, &path),
        other => panic!("expected Io error, got {:?}", other),
    }
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn test_malformed_file_is_a_parse_error() {
    let file = write_config("rows = \"many\"");
    let err = BenchConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)), "{:?}", err);
}

#[test]
fn test_invalid_shape_in_file() {
    let file = write_config("rows = 3\ncols = 8");
    let err = BenchConfig::load(file.path()).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"invalid config: invalid dimensions 3x8: expected rows >= cols >= 1");
    assert!(matches!(
        err,
        ConfigError::Invalid(QrError::InvalidDimension { rows: 3, cols: 8 })
    ));
}
