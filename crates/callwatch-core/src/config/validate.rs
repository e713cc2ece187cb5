//! Configuration validation and resolution (Immutable functional pattern)

use std::time::Duration;

use super::{
    endpoint::BrokerEndpoint,
    load::{ENV_BROKER, ENV_CLIENT_ID, ENV_PASSWORD, ENV_USERNAME},
    types::{BrokerSettings, Config, Settings},
};
use crate::{Error, Result};

const MIN_INTERVAL_MS: u32 = 10;
const MAX_INTERVAL_MS: u32 = 60_000;

// ═══════════════════════════════════════════════════════════════════════════
// VALIDATION LOGIC (Immutable pattern)
// ═══════════════════════════════════════════════════════════════════════════

impl Config {
    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfig`] for the first absent broker value,
    /// or [`Error::InvalidConfig`] for out-of-range values.
    pub fn validate(&self) -> Result<()> {
        let host = required(self.broker.host.as_deref(), ENV_BROKER)?;
        required(self.broker.client_id.as_deref(), ENV_CLIENT_ID)?;
        required(self.broker.username.as_deref(), ENV_USERNAME)?;
        required(self.broker.password.as_deref(), ENV_PASSWORD)?;
        host.parse::<BrokerEndpoint>()?;

        if self.watch.log_file.is_none() {
            return Err(Error::invalid_config(
                "Cannot determine the Teams log location (no home directory); set CALLWATCH_LOG_FILE",
            ));
        }

        validate_interval("poll_ms", self.watch.poll_ms)?;
        validate_interval("debounce_ms", self.watch.debounce_ms)?;
        validate_prefix(&self.topics.prefix)?;

        if self.broker.keep_alive_secs < 5 {
            return Err(Error::invalid_config(
                "keep_alive_secs must be at least 5",
            ));
        }
        validate_interval("reconnect_delay_ms", self.broker.reconnect_delay_ms)?;

        Ok(())
    }

    /// Validate and convert into [`Settings`].
    ///
    /// # Errors
    ///
    /// Same as [`Config::validate`].
    pub fn resolve(self) -> Result<Settings> {
        self.validate()?;

        let Self {
            watch,
            topics,
            broker,
        } = self;

        let endpoint = required(broker.host.as_deref(), ENV_BROKER)?.parse()?;
        let log_file = watch
            .log_file
            .ok_or_else(|| Error::invalid_config("log file path missing"))?;

        Ok(Settings {
            log_file,
            poll_interval: Duration::from_millis(u64::from(watch.poll_ms)),
            debounce_window: Duration::from_millis(u64::from(watch.debounce_ms)),
            topic_prefix: topics.prefix,
            broker: BrokerSettings {
                endpoint,
                client_id: broker.client_id.unwrap_or_default(),
                username: broker.username.unwrap_or_default(),
                password: broker.password.unwrap_or_default(),
                keep_alive: Duration::from_secs(u64::from(broker.keep_alive_secs)),
                reconnect_delay: Duration::from_millis(u64::from(broker.reconnect_delay_ms)),
            },
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// HELPER FUNCTIONS
// ═══════════════════════════════════════════════════════════════════════════

/// Absent and empty are the same thing for required values.
fn required<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::MissingConfig(name)),
    }
}

fn validate_interval(name: &str, value: u32) -> Result<()> {
    if (MIN_INTERVAL_MS..=MAX_INTERVAL_MS).contains(&value) {
        Ok(())
    } else {
        Err(Error::invalid_config(format!(
            "{name} must be {MIN_INTERVAL_MS}-{MAX_INTERVAL_MS}, got {value}"
        )))
    }
}

fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.trim().is_empty() {
        return Err(Error::invalid_config("topic prefix cannot be empty"));
    }
    if prefix.contains(['#', '+']) {
        return Err(Error::invalid_config(format!(
            "topic prefix {prefix:?} cannot contain MQTT wildcards"
        )));
    }
    if prefix.starts_with('/') || prefix.ends_with('/') {
        return Err(Error::invalid_config(format!(
            "topic prefix {prefix:?} cannot start or end with '/'"
        )));
    }
    Ok(())
}
