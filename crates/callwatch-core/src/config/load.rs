//! Configuration loading from files and environment
//!
//! This module handles loading configuration from:
//! 1. Built-in defaults
//! 2. Global config: ~/.config/callwatch/config.toml
//! 3. Environment variables
//!
//! All operations return new instances rather than mutating in place.

use std::path::{Path, PathBuf};

use super::types::{Config, Settings};
use crate::{Error, Result};

pub const ENV_BROKER: &str = "MQTT_BROKER";
pub const ENV_CLIENT_ID: &str = "MQTT_CLIENT_ID";
pub const ENV_USERNAME: &str = "MQTT_USERNAME";
pub const ENV_PASSWORD: &str = "MQTT_PASSWORD";

const ENV_CONFIG: &str = "CALLWATCH_CONFIG";
const ENV_LOG_FILE: &str = "CALLWATCH_LOG_FILE";
const ENV_TOPIC_PREFIX: &str = "CALLWATCH_TOPIC_PREFIX";
const ENV_POLL_MS: &str = "CALLWATCH_POLL_MS";
const ENV_DEBOUNCE_MS: &str = "CALLWATCH_DEBOUNCE_MS";

// ═══════════════════════════════════════════════════════════════════════════
// PUBLIC API
// ═══════════════════════════════════════════════════════════════════════════

/// Load configuration from all sources and resolve it into [`Settings`].
///
/// # Errors
///
/// Returns error if:
/// - The config file exists but is unreadable or malformed TOML
/// - A required broker value is missing ([`Error::MissingConfig`])
/// - A value fails validation
pub fn load_config() -> Result<Settings> {
    // 1. Built-in defaults, overlaid by the global file when present
    let config = match config_file_path() {
        Some(path) if path.exists() => load_toml_file(&path)?,
        _ => Config::default(),
    };

    // 2. Environment overrides
    let config = config.apply_env_vars()?;

    // 3. Validate and resolve
    config.resolve()
}

// ═══════════════════════════════════════════════════════════════════════════
// PATH HELPERS
// ═══════════════════════════════════════════════════════════════════════════

/// Get path to global config file
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "callwatch")
        .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
}

/// `CALLWATCH_CONFIG` if set, otherwise the global config path.
fn config_file_path() -> Option<PathBuf> {
    std::env::var_os(ENV_CONFIG)
        .map(PathBuf::from)
        .or_else(global_config_path)
}

/// Load a TOML file into a Config. Keys absent from the file keep their
/// defaults.
///
/// # Errors
///
/// Returns error if:
/// - File cannot be read
/// - Path is a directory instead of a file
/// - TOML is malformed
pub fn load_toml_file(path: &Path) -> Result<Config> {
    if path.is_dir() {
        return Err(Error::invalid_config(format!(
            "Config path is a directory, not a file: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, &e))?;

    toml::from_str(&content).map_err(|e| {
        Error::parse_error(format!(
            "Failed to parse config file {}: {e}",
            path.display()
        ))
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// ENVIRONMENT VARIABLE OVERRIDES (Immutable pattern)
// ═══════════════════════════════════════════════════════════════════════════

impl Config {
    /// Apply overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns error if a numeric variable does not parse.
    pub fn apply_env_vars(self) -> Result<Self> {
        self.apply_env(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns error if a numeric variable does not parse.
    pub fn apply_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // Broker connection (required, checked during resolution)
        if let Some(value) = lookup(ENV_BROKER) {
            self.broker.host = Some(value);
        }
        if let Some(value) = lookup(ENV_CLIENT_ID) {
            self.broker.client_id = Some(value);
        }
        if let Some(value) = lookup(ENV_USERNAME) {
            self.broker.username = Some(value);
        }
        if let Some(value) = lookup(ENV_PASSWORD) {
            self.broker.password = Some(value);
        }

        // CALLWATCH_LOG_FILE
        if let Some(value) = lookup(ENV_LOG_FILE) {
            if !value.is_empty() {
                self.watch.log_file = Some(PathBuf::from(value));
            }
        }

        // CALLWATCH_TOPIC_PREFIX
        if let Some(value) = lookup(ENV_TOPIC_PREFIX) {
            self.topics.prefix = value;
        }

        // CALLWATCH_POLL_MS
        if let Some(value) = lookup(ENV_POLL_MS) {
            self.watch.poll_ms = value.parse().map_err(|e| {
                Error::invalid_config(format!("Invalid {ENV_POLL_MS} value: {e}"))
            })?;
        }

        // CALLWATCH_DEBOUNCE_MS
        if let Some(value) = lookup(ENV_DEBOUNCE_MS) {
            self.watch.debounce_ms = value.parse().map_err(|e| {
                Error::invalid_config(format!("Invalid {ENV_DEBOUNCE_MS} value: {e}"))
            })?;
        }

        Ok(self)
    }
}
