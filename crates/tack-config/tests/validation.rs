//! Tests for schema and filesystem validation.

use std::fs;
use tack_config::{
    BuildConfig, ConfigError, OutputFormat, TackConfig, validate_fs, validate_schema,
};
use tempfile::TempDir;

fn project_with_entry() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/main.js"), "console.log('hi');\n").unwrap();
    dir
}

#[test]
fn empty_entry_is_rejected() {
    let mut config = TackConfig::default();
    config.bundle.entry = "  ".to_string();
    assert!(matches!(
        validate_schema(&config),
        Err(ConfigError::MissingField("bundle.entry"))
    ));
}

#[test]
fn invalid_global_name_is_rejected() {
    let config = TackConfig {
        bundle: BuildConfig::default().name("my-lib"),
        ..TackConfig::default()
    };
    assert!(matches!(
        validate_schema(&config),
        Err(ConfigError::InvalidValue { .. })
    ));
}

#[test]
fn global_name_on_esm_is_allowed() {
    let config = TackConfig {
        bundle: BuildConfig::default().format(OutputFormat::Esm).name("App"),
        ..TackConfig::default()
    };
    assert!(validate_schema(&config).is_ok());
}

#[test]
fn bad_glob_is_rejected() {
    let mut config = TackConfig::default();
    config.watch.patterns = vec!["src/[*.js".to_string()];
    assert!(matches!(
        validate_schema(&config),
        Err(ConfigError::InvalidPattern { .. })
    ));
}

#[test]
fn empty_watch_patterns_are_rejected() {
    let mut config = TackConfig::default();
    config.watch.patterns.clear();
    assert!(matches!(
        validate_schema(&config),
        Err(ConfigError::MissingField("watch.patterns"))
    ));
}

#[test]
fn valid_project_passes_fs_validation() {
    let dir = project_with_entry();
    assert!(validate_fs(&TackConfig::default(), dir.path()).is_ok());
}

#[test]
fn missing_entry_is_reported() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();

    let err = validate_fs(&TackConfig::default(), dir.path()).unwrap_err();
    match err {
        ConfigError::EntryNotFound(path) => assert!(path.ends_with("src/main.js")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn missing_base_dir_is_reported() {
    let dir = TempDir::new().unwrap();
    let err = validate_fs(&TackConfig::default(), dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::BaseDirNotFound(_)));
}

#[test]
fn entry_directory_is_rejected() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("src/main.js")).unwrap();
    let err = validate_fs(&TackConfig::default(), dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::EntryNotAFile(_)));
}

#[test]
fn output_path_that_is_a_file_is_rejected() {
    let dir = project_with_entry();
    fs::write(dir.path().join("dist"), "not a directory").unwrap();

    let err = validate_fs(&TackConfig::default(), dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::OutputNotADirectory(_)));
}
