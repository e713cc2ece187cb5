//! Configuration type definitions
//!
//! [`Config`] is the raw, partially filled shape read from TOML and the
//! environment. [`Settings`] is what the rest of the crate consumes: every
//! required value present, intervals as [`Duration`]s.

use std::{fmt, path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

use super::endpoint::BrokerEndpoint;

// ═══════════════════════════════════════════════════════════════════════════
// RAW CONFIGURATION
// ═══════════════════════════════════════════════════════════════════════════

/// Root configuration structure
///
/// Loaded from defaults → global file → env vars
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Config {
    pub watch: WatchConfig,
    pub topics: TopicsConfig,
    pub broker: BrokerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WatchConfig {
    /// Teams log file. `None` only when no home directory could be found.
    pub log_file: Option<PathBuf>,
    pub poll_ms: u32,
    pub debounce_ms: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TopicsConfig {
    pub prefix: String,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BrokerConfig {
    /// `host` or `host:port`, optionally with an `mqtt://` scheme.
    pub host: Option<String>,
    pub client_id: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub keep_alive_secs: u16,
    pub reconnect_delay_ms: u32,
}

impl fmt::Debug for BrokerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrokerConfig")
            .field("host", &self.host)
            .field("client_id", &self.client_id)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("keep_alive_secs", &self.keep_alive_secs)
            .field("reconnect_delay_ms", &self.reconnect_delay_ms)
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// RESOLVED SETTINGS
// ═══════════════════════════════════════════════════════════════════════════

/// Validated configuration, ready to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_file: PathBuf,
    pub poll_interval: Duration,
    pub debounce_window: Duration,
    pub topic_prefix: String,
    pub broker: BrokerSettings,
}

#[derive(Clone, PartialEq, Eq)]
pub struct BrokerSettings {
    pub endpoint: BrokerEndpoint,
    pub client_id: String,
    pub username: String,
    pub password: String,
    pub keep_alive: Duration,
    pub reconnect_delay: Duration,
}

impl fmt::Debug for BrokerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrokerSettings")
            .field("endpoint", &self.endpoint)
            .field("client_id", &self.client_id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("keep_alive", &self.keep_alive)
            .field("reconnect_delay", &self.reconnect_delay)
            .finish()
    }
}
