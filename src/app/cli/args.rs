//! Command-line arguments for the stress runner
//!
//! Every workload option is optional here so a config file can fill the
//! gaps; [`Args::workload_settings`] applies defaults and validation.

use crate::app::cli::config::{ConfigError, ConfigResult};
use crate::app::workload::{PriorityMode, WorkloadSettings};
use crate::core::logging::LOG_FORMATS;
use crate::queue::Priority;
use clap::{ArgAction, Parser};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PRODUCERS: usize = 4;
pub const DEFAULT_CONSUMERS: usize = 4;
pub const DEFAULT_ITEMS: usize = 10_000;
pub const DEFAULT_MISS_LIMIT: usize = 3;
pub const DEFAULT_IDLE_TIMEOUT_MS: u64 = 50;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "prioq")]
#[command(about = "Multi-priority FIFO queue stress runner")]
#[command(version, long_version = crate::long_version())]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Number of producer threads
    #[arg(short = 'p', long = "producers", value_name = "COUNT")]
    pub producers: Option<usize>,

    /// Number of consumer tasks
    #[arg(short = 'C', long = "consumers", value_name = "COUNT")]
    pub consumers: Option<usize>,

    /// Items appended by each producer
    #[arg(short = 'n', long = "items", value_name = "COUNT")]
    pub items: Option<usize>,

    /// Consecutive empty polls after which a consumer stops
    #[arg(short = 'm', long = "miss-limit", value_name = "COUNT")]
    pub miss_limit: Option<usize>,

    /// How long a consumer waits on the readiness signal before re-polling
    #[arg(long = "idle-timeout-ms", value_name = "MILLIS")]
    pub idle_timeout_ms: Option<u64>,

    /// Append every item at this priority (low, normal, high, critical)
    #[arg(short = 'P', long = "priority", value_name = "LEVEL", conflicts_with = "random_priorities")]
    pub priority: Option<Priority>,

    /// Pick a random priority for every item
    #[arg(short = 'R', long = "random-priorities", action = ArgAction::SetTrue)]
    pub random_priorities: bool,

    /// Print the report as JSON
    #[arg(long = "json", action = ArgAction::SetTrue)]
    pub json: bool,

    /// Force colored output
    #[arg(long = "color", action = ArgAction::SetTrue, conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long = "no-color", action = ArgAction::SetTrue)]
    pub no_color: bool,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = LOG_FORMATS)]
    pub log_format: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Whether output should be colorized
    ///
    /// Explicit flags win, then `NO_COLOR`, then TTY detection.
    pub fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        if self.color {
            return true;
        }
        std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
    }

    /// Resolve defaults and validate the workload shape
    pub fn workload_settings(&self) -> ConfigResult<WorkloadSettings> {
        let producers = positive("producers", self.producers.unwrap_or(DEFAULT_PRODUCERS))?;
        let consumers = positive("consumers", self.consumers.unwrap_or(DEFAULT_CONSUMERS))?;
        let miss_limit = positive("miss-limit", self.miss_limit.unwrap_or(DEFAULT_MISS_LIMIT))?;
        let idle_timeout_ms = self.idle_timeout_ms.unwrap_or(DEFAULT_IDLE_TIMEOUT_MS);
        if idle_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "idle-timeout-ms".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        let priority_mode = match (self.random_priorities, self.priority) {
            (true, _) => PriorityMode::Random,
            (false, Some(priority)) => PriorityMode::Fixed(priority),
            (false, None) => PriorityMode::Random,
        };

        Ok(WorkloadSettings {
            producers,
            consumers,
            items_per_producer: self.items.unwrap_or(DEFAULT_ITEMS),
            miss_limit,
            idle_timeout: Duration::from_millis(idle_timeout_ms),
            priority_mode,
        })
    }
}

fn positive(key: &str, value: usize) -> ConfigResult<usize> {
    if value == 0 {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "must be greater than 0".to_string(),
        });
    }
    Ok(value)
}
