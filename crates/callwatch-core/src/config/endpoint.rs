//! Broker address parsing
//!
//! Accepts `host`, `host:port`, `[v6addr]`, `[v6addr]:port`, each optionally
//! prefixed with `mqtt://` and followed by a trailing `/`.

use std::{fmt, str::FromStr};

use crate::{Error, Result};

pub const DEFAULT_MQTT_PORT: u16 = 1883;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerEndpoint {
    pub host: String,
    pub port: u16,
}

impl FromStr for BrokerEndpoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let address = trimmed
            .strip_prefix("mqtt://")
            .unwrap_or(trimmed)
            .trim_end_matches('/');

        let (host, port) = if let Some(rest) = address.strip_prefix('[') {
            let (host, after) = rest.split_once(']').ok_or_else(|| {
                Error::invalid_config(format!("Unterminated IPv6 address in broker {s:?}"))
            })?;
            match after {
                "" => (host, None),
                _ => {
                    let port = after.strip_prefix(':').ok_or_else(|| {
                        Error::invalid_config(format!("Unexpected text after address in broker {s:?}"))
                    })?;
                    (host, Some(port))
                }
            }
        } else {
            match address.rsplit_once(':') {
                // More than one colon without brackets: a bare IPv6 address.
                Some((host, _)) if host.contains(':') => (address, None),
                Some((host, port)) => (host, Some(port)),
                None => (address, None),
            }
        };

        if host.is_empty() {
            return Err(Error::invalid_config(format!(
                "Broker address {s:?} has no host"
            )));
        }

        let port = port.map_or(Ok(DEFAULT_MQTT_PORT), |p| parse_port(p, s))?;

        Ok(Self {
            host: host.to_string(),
            port,
        })
    }
}

impl fmt::Display for BrokerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

fn parse_port(port: &str, original: &str) -> Result<u16> {
    match port.parse::<u16>() {
        Ok(0) | Err(_) => Err(Error::invalid_config(format!(
            "Invalid port {port:?} in broker {original:?}"
        ))),
        Ok(port) => Ok(port),
    }
}
