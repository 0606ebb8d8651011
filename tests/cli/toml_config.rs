//! CLI TOML configuration tests
//!
//! Config files are written to temporary directories and loaded through
//! `Args::load_config_file`.

use clap::Parser;
use prioq::app::cli::args::Args;
use prioq::app::cli::config::ConfigError;
use prioq::queue::Priority;
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("prioq.toml");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_explicit_config_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
producers = 2
consumers = 5
items = 40
priority = "crit"
log-format = "ext"
log-file = "none"
"#,
    );

    let mut args = Args::try_parse_from([
        "prioq",
        "--config-file",
        path.to_str().unwrap(),
    ])
    .unwrap();
    let loaded = args.load_config_file().unwrap();

    assert_eq!(loaded.as_deref(), Some(path.as_path()));
    assert_eq!(args.producers, Some(2));
    assert_eq!(args.consumers, Some(5));
    assert_eq!(args.items, Some(40));
    assert_eq!(args.priority, Some(Priority::Critical));
    assert_eq!(args.log_format.as_deref(), Some("ext"));
    assert_eq!(
        args.log_file.as_deref().and_then(|p| p.to_str()),
        Some("none")
    );
}

#[test]
fn test_command_line_wins_over_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "consumers = 5\nmiss-limit = 2\n");

    let mut args = Args::try_parse_from([
        "prioq",
        "--config-file",
        path.to_str().unwrap(),
        "--consumers",
        "1",
    ])
    .unwrap();
    args.load_config_file().unwrap();

    let settings = args.workload_settings().unwrap();
    assert_eq!(settings.consumers, 1);
    assert_eq!(settings.miss_limit, 2);
}

#[test]
fn test_malformed_config_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "producers = [unclosed");

    let mut args = Args::try_parse_from([
        "prioq",
        "--config-file",
        path.to_str().unwrap(),
    ])
    .unwrap();

    match args.load_config_file() {
        Err(ConfigError::Parse { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("Expected Parse error, got {:?}", other),
    }
}

#[test]
fn test_invalid_values_in_config_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "priority = \"someday\"\n");

    let mut args = Args::try_parse_from([
        "prioq",
        "--config-file",
        path.to_str().unwrap(),
    ])
    .unwrap();

    let err = args.load_config_file().unwrap_err();
    assert!(err.to_string().contains("priority"), "got: {}", err);
}

#[test]
fn test_missing_explicit_config_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.toml");

    let mut args = Args::try_parse_from([
        "prioq",
        "--config-file",
        missing.to_str().unwrap(),
    ])
    .unwrap();

    assert!(matches!(
        args.load_config_file(),
        Err(ConfigError::NotFound { .. })
    ));
}
