//! TOML configuration file parsing and loading
//!
//! Keys mirror the long command-line flags (`producers`, `miss-limit`, ...).
//! Values from the file only fill options the command line left unset.

use super::args::Args;
use crate::queue::Priority;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("The specified configuration file does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Error reading configuration file {}: {}", path.display(), source)]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error parsing configuration file {}: {}", path.display(), source)]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Default config location: `<config dir>/Prioq/prioq.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("Prioq").join("prioq.toml"))
}

impl Args {
    /// Locate, read and apply the config file
    ///
    /// An explicit `--config-file` must exist; otherwise the default path is
    /// used only if present. Returns the path that was applied, if any.
    pub fn load_config_file(&mut self) -> ConfigResult<Option<PathBuf>> {
        let config_path = match self.config_file.clone() {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound { path });
                }
                path
            }
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(None),
            },
        };

        let config = read_config_table(&config_path)?;
        self.apply_toml_values(&config)?;
        Ok(Some(config_path))
    }

    /// Apply TOML configuration values to unset options
    pub fn apply_toml_values(&mut self, config: &toml::Table) -> ConfigResult<()> {
        fill_count(config, "producers", &mut self.producers)?;
        fill_count(config, "consumers", &mut self.consumers)?;
        fill_count(config, "items", &mut self.items)?;
        fill_count(config, "miss-limit", &mut self.miss_limit)?;

        if self.idle_timeout_ms.is_none() {
            if let Some(value) = integer_value(config, "idle-timeout-ms")? {
                self.idle_timeout_ms = Some(value as u64);
            }
        }

        if let Some(value) = config.get("priority") {
            let text = value.as_str().ok_or_else(|| invalid_type("priority", "a string"))?;
            let priority: Priority = text.parse().map_err(|e| ConfigError::InvalidValue {
                key: "priority".to_string(),
                message: format!("{}", e),
            })?;
            if self.priority.is_none() && !self.random_priorities {
                self.priority = Some(priority);
            }
        }

        if let Some(value) = config.get("random-priorities") {
            let random = value
                .as_bool()
                .ok_or_else(|| invalid_type("random-priorities", "a boolean"))?;
            // A fixed priority from either source takes precedence
            if random && self.priority.is_none() {
                self.random_priorities = true;
            }
        }

        if let Some(value) = config.get("color") {
            let color = value.as_bool().ok_or_else(|| invalid_type("color", "a boolean"))?;
            if !self.color && !self.no_color {
                self.color = color;
                self.no_color = !color;
            }
        }

        fill_string(config, "log-level", &mut self.log_level)?;
        fill_string(config, "log-format", &mut self.log_format)?;
        if self.log_file.is_none() {
            if let Some(value) = config.get("log-file") {
                let text = value.as_str().ok_or_else(|| invalid_type("log-file", "a string"))?;
                self.log_file = Some(PathBuf::from(text));
            }
        }

        Ok(())
    }
}

fn read_config_table(path: &Path) -> ConfigResult<toml::Table> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<toml::Table>(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn invalid_type(key: &str, expected: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("expected {}", expected),
    }
}

fn integer_value(config: &toml::Table, key: &str) -> ConfigResult<Option<i64>> {
    match config.get(key) {
        None => Ok(None),
        Some(value) => {
            let n = value
                .as_integer()
                .ok_or_else(|| invalid_type(key, "an integer"))?;
            if n < 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "must not be negative".to_string(),
                });
            }
            Ok(Some(n))
        }
    }
}

fn fill_count(config: &toml::Table, key: &str, target: &mut Option<usize>) -> ConfigResult<()> {
    if let Some(n) = integer_value(config, key)? {
        if target.is_none() {
            *target = Some(n as usize);
        }
    }
    Ok(())
}

fn fill_string(config: &toml::Table, key: &str, target: &mut Option<String>) -> ConfigResult<()> {
    if let Some(value) = config.get(key) {
        let text = value.as_str().ok_or_else(|| invalid_type(key, "a string"))?;
        if target.is_none() {
            *target = Some(text.to_string());
        }
    }
    Ok(())
}
