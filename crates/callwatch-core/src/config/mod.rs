//! Configuration loading and management
//!
//! # Hierarchy
//!
//! Configuration is loaded in this order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Global config: ~/.config/callwatch/config.toml (or `CALLWATCH_CONFIG`)
//! 3. Environment variables: `MQTT_*` and `CALLWATCH_*`
//!
//! The broker endpoint, client id, username and password have no defaults.
//! Startup fails with a message naming the missing variable.
//!
//! # Example Config
//!
//! ```toml
//! [watch]
//! log_file = "/Users/me/Library/Application Support/Microsoft/Teams/logs.txt"
//! debounce_ms = 1000
//!
//! [topics]
//! prefix = "in_teams_call"
//!
//! [broker]
//! host = "homeassistant.local:1883"
//! client_id = "callwatch"
//! ```
//!
//! # Module Structure
//!
//! - `types`: raw (file/env) and resolved configuration structures
//! - `defaults`: default values, including the platform log path
//! - `endpoint`: `host[:port]` broker address parsing
//! - `load`: loading from file and environment
//! - `validate`: validation and resolution into [`Settings`]

// Module declarations
mod defaults;
mod endpoint;
mod load;
mod types;
mod validate;

// Test modules (organized by concern)
#[cfg(test)]
mod tests_loading;
#[cfg(test)]
mod tests_validation;

// Re-export public API
pub use defaults::{default_log_file, DEFAULT_TOPIC_PREFIX};
pub use endpoint::{BrokerEndpoint, DEFAULT_MQTT_PORT};
pub use load::{global_config_path, load_config, load_toml_file, ENV_BROKER, ENV_CLIENT_ID, ENV_PASSWORD, ENV_USERNAME};
pub use types::{BrokerConfig, BrokerSettings, Config, Settings, TopicsConfig, WatchConfig};
