//! Runtime configuration.
//!
//! Defaults can be overridden with `RECKON_*` environment variables and
//! again by command-line flags. Only `max_history_size` and
//! `max_undo_depth` reach the core; the rest configures the REPL and
//! persistence collaborators.

use std::env;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_MAX_HISTORY_SIZE: usize = 100;
const DEFAULT_MAX_UNDO_DEPTH: usize = 50;
const DEFAULT_MAX_INPUT_VALUE: f64 = 1e12;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Calculator and REPL settings.
#[derive(Clone, Debug)]
pub struct CalculatorConfig {
    /// Maximum number of history entries (>= 1)
    pub max_history_size: usize,
    /// Maximum number of undo snapshots (>= 1)
    pub max_undo_depth: usize,
    /// Largest accepted operand magnitude
    pub max_input_value: f64,
    /// Where history is saved and auto-saved
    pub history_file: PathBuf,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            max_history_size: DEFAULT_MAX_HISTORY_SIZE,
            max_undo_depth: DEFAULT_MAX_UNDO_DEPTH,
            max_input_value: DEFAULT_MAX_INPUT_VALUE,
            history_file: default_history_file(),
        }
    }
}

fn default_history_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("reckon")
        .join("history.csv")
}

impl CalculatorConfig {
    /// Load configuration from the environment on top of the defaults.
    ///
    /// Recognized variables: `RECKON_MAX_HISTORY_SIZE`,
    /// `RECKON_MAX_UNDO_DEPTH`, `RECKON_MAX_INPUT_VALUE`,
    /// `RECKON_HISTORY_FILE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = env_var("RECKON_MAX_HISTORY_SIZE") {
            config.max_history_size = parse_capacity("RECKON_MAX_HISTORY_SIZE", &value)?;
        }
        if let Some(value) = env_var("RECKON_MAX_UNDO_DEPTH") {
            config.max_undo_depth = parse_capacity("RECKON_MAX_UNDO_DEPTH", &value)?;
        }
        if let Some(value) = env_var("RECKON_MAX_INPUT_VALUE") {
            config.max_input_value =
                value
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| ConfigError::Invalid {
                        var: "RECKON_MAX_INPUT_VALUE",
                        value: value.clone(),
                        reason: "not a number",
                    })?;
        }
        if let Some(value) = env_var("RECKON_HISTORY_FILE") {
            config.history_file = PathBuf::from(value);
        }

        Ok(config)
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_capacity(var: &'static str, value: &str) -> Result<usize, ConfigError> {
    let parsed = value
        .trim()
        .parse::<usize>()
        .map_err(|_| ConfigError::Invalid {
            var,
            value: value.to_string(),
            reason: "not a non-negative integer",
        })?;
    if parsed == 0 {
        return Err(ConfigError::Invalid {
            var,
            value: value.to_string(),
            reason: "must be at least 1",
        });
    }
    Ok(parsed)
}
