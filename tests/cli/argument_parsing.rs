//! Core CLI argument parsing tests

use clap::Parser;
use prioq::app::cli::args::Args;
use prioq::app::workload::PriorityMode;
use prioq::queue::Priority;
use std::time::Duration;

#[test]
fn test_full_argument_set() {
    let args = Args::try_parse_from([
        "prioq",
        "--producers",
        "6",
        "-C",
        "3",
        "-n",
        "250",
        "-m",
        "9",
        "--idle-timeout-ms",
        "15",
        "--priority",
        "Normal",
        "--json",
        "--log-level",
        "warn",
        "--log-format",
        "json",
    ])
    .unwrap();

    assert!(args.json);
    assert_eq!(args.log_level.as_deref(), Some("warn"));
    assert_eq!(args.log_format.as_deref(), Some("json"));

    let settings = args.workload_settings().unwrap();
    assert_eq!(settings.producers, 6);
    assert_eq!(settings.consumers, 3);
    assert_eq!(settings.items_per_producer, 250);
    assert_eq!(settings.miss_limit, 9);
    assert_eq!(settings.idle_timeout, Duration::from_millis(15));
    assert_eq!(settings.priority_mode, PriorityMode::Fixed(Priority::Normal));
}

#[test]
fn test_random_priorities_flag() {
    let args = Args::try_parse_from(["prioq", "-R"]).unwrap();
    assert!(args.random_priorities);
    assert_eq!(
        args.workload_settings().unwrap().priority_mode,
        PriorityMode::Random
    );
}

#[test]
fn test_invalid_log_format_rejected() {
    assert!(Args::try_parse_from(["prioq", "--log-format", "xml"]).is_err());
}

#[test]
fn test_invalid_log_level_rejected() {
    assert!(Args::try_parse_from(["prioq", "--log-level", "loud"]).is_err());
}

#[test]
fn test_non_numeric_counts_rejected() {
    assert!(Args::try_parse_from(["prioq", "--producers", "many"]).is_err());
    assert!(Args::try_parse_from(["prioq", "--items", "-1"]).is_err());
}

#[test]
fn test_zero_idle_timeout_rejected() {
    let args = Args::try_parse_from(["prioq", "--idle-timeout-ms", "0"]).unwrap();
    assert!(args.workload_settings().is_err());
}

#[test]
fn test_version_includes_build_metadata() {
    let version = prioq::long_version();
    assert!(version.starts_with(env!("CARGO_PKG_VERSION")));
    assert!(version.contains("commit"));
}
