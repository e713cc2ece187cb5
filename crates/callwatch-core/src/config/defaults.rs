//! Default configuration values

use std::path::PathBuf;

use super::types::{BrokerConfig, TopicsConfig, WatchConfig};

pub const DEFAULT_TOPIC_PREFIX: &str = "in_teams_call";

const DEFAULT_POLL_MS: u32 = 1000;
const DEFAULT_DEBOUNCE_MS: u32 = 1000;
const DEFAULT_KEEP_ALIVE_SECS: u16 = 30;
const DEFAULT_RECONNECT_DELAY_MS: u32 = 1000;

// ═══════════════════════════════════════════════════════════════════════════
// DEFAULT IMPLEMENTATIONS
// ═══════════════════════════════════════════════════════════════════════════

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            poll_ms: DEFAULT_POLL_MS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl Default for TopicsConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_TOPIC_PREFIX.to_string(),
        }
    }
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            host: None,
            client_id: None,
            username: None,
            password: None,
            keep_alive_secs: DEFAULT_KEEP_ALIVE_SECS,
            reconnect_delay_ms: DEFAULT_RECONNECT_DELAY_MS,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// PLATFORM LOG LOCATION
// ═══════════════════════════════════════════════════════════════════════════

/// Where the Teams desktop client writes `logs.txt` on this platform.
///
/// Returns `None` if the home directory cannot be determined.
pub fn default_log_file() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| teams_log_path(&dirs))
}

// ~/Library/Application Support/Microsoft/Teams/logs.txt
#[cfg(target_os = "macos")]
fn teams_log_path(dirs: &directories::BaseDirs) -> PathBuf {
    dirs.data_dir().join("Microsoft").join("Teams").join("logs.txt")
}

// %APPDATA%\Microsoft\Teams\logs.txt
#[cfg(windows)]
fn teams_log_path(dirs: &directories::BaseDirs) -> PathBuf {
    dirs.data_dir().join("Microsoft").join("Teams").join("logs.txt")
}

// ~/.config/Microsoft/Microsoft Teams/logs.txt
#[cfg(not(any(target_os = "macos", windows)))]
fn teams_log_path(dirs: &directories::BaseDirs) -> PathBuf {
    dirs.config_dir()
        .join("Microsoft")
        .join("Microsoft Teams")
        .join("logs.txt")
}
