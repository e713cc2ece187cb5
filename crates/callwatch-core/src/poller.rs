//! Existence polling for the log file
//!
//! Teams creates `logs.txt` lazily and recreates it on restart, so the file
//! being absent is the normal starting condition rather than an error.

use std::{path::Path, time::Duration};

use tokio::time::MissedTickBehavior;

use crate::{Error, Result};

/// Wait until `path` exists as a regular file.
///
/// Checks immediately, then once per `period`.
///
/// # Errors
///
/// Returns [`Error::Io`] for any filesystem error other than "not found",
/// e.g. permission denied on a parent directory.
pub async fn wait_for_file(path: &Path, period: Duration) -> Result<()> {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut reported = false;
    loop {
        ticker.tick().await;
        if is_regular_file(path).await? {
            tracing::debug!(path = %path.display(), "log file present");
            return Ok(());
        }
        if !reported {
            tracing::info!(path = %path.display(), "waiting for log file to appear");
            reported = true;
        }
    }
}

/// Returns whether `path` currently resolves to a regular file.
///
/// # Errors
///
/// Returns [`Error::Io`] unless the failure is "not found".
pub async fn is_regular_file(path: &Path) -> Result<bool> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => Ok(metadata.is_file()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::io(path, &e)),
    }
}
