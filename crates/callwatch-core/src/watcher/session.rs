//! A single watch on an existing file
//!
//! The OS watch handle lives exactly as long as the session. Dropping the
//! session (including when an enclosing future is cancelled) releases it.

use std::path::{Path, PathBuf};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use super::{
    events::{classify, EventClass},
    Change,
};
use crate::{Error, Result};

/// Watches one file and yields its changes.
pub struct WatchSession {
    path: PathBuf,
    events: mpsc::UnboundedReceiver<notify::Result<notify::Event>>,
    initial_pending: bool,
    watcher: Option<RecommendedWatcher>,
}

impl std::fmt::Debug for WatchSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchSession")
            .field("path", &self.path)
            .field("initial_pending", &self.initial_pending)
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

impl WatchSession {
    /// Start watching `path`, which must already exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Watch`] if the OS watch cannot be created or
    /// attached to the file, or a not-found [`Error::Io`] if the file is
    /// already gone.
    pub fn open(path: &Path) -> Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();

        // Runs on the backend's own thread; the receiver being gone just
        // means the session was dropped.
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })
        .map_err(|e| Error::watch(format!("Failed to create file watcher: {e}")))?;

        watcher
            .watch(path, RecursiveMode::NonRecursive)
            .map_err(|e| watch_error(path, &e))?;

        tracing::debug!(path = %path.display(), "watch armed");

        Ok(Self {
            path: path.to_path_buf(),
            events: rx,
            initial_pending: true,
            watcher: Some(watcher),
        })
    }

    /// Whether the OS watch is still held.
    pub const fn is_active(&self) -> bool {
        self.watcher.is_some()
    }

    /// Wait for the next change.
    ///
    /// The first call returns [`Change::Initial`] without waiting. Returns
    /// `None` once the file was renamed or removed; the watch handle is
    /// released at that point and every later call also returns `None`.
    ///
    /// Cancel safe: dropping the returned future loses no events.
    ///
    /// # Errors
    ///
    /// Yields `Some(Err(_))` if the watch backend reports an error.
    pub async fn next_change(&mut self) -> Option<Result<Change>> {
        if std::mem::take(&mut self.initial_pending) {
            return Some(Ok(Change::Initial));
        }

        while self.is_active() {
            let event = match self.events.recv().await {
                Some(Ok(event)) => event,
                Some(Err(e)) => {
                    return Some(Err(Error::watch(format!(
                        "Watch on {} failed: {e}",
                        self.path.display()
                    ))))
                }
                None => break,
            };

            match classify(&event.kind) {
                EventClass::Changed => return Some(Ok(Change::Modified)),
                EventClass::Ended => {
                    tracing::info!(
                        path = %self.path.display(),
                        kind = ?event.kind,
                        "log file moved or removed, watch ended"
                    );
                    break;
                }
                EventClass::Ignored => {}
            }
        }

        self.close();
        None
    }

    /// Release the OS watch handle.
    pub fn close(&mut self) {
        if self.watcher.take().is_some() {
            tracing::debug!(path = %self.path.display(), "watch closed");
        }
    }
}

/// Keep "the file is gone" distinguishable from real watch failures; the
/// file can vanish between the existence check and the watch.
fn watch_error(path: &Path, err: &notify::Error) -> Error {
    match &err.kind {
        notify::ErrorKind::PathNotFound => {
            Error::io(path, &std::io::Error::from(std::io::ErrorKind::NotFound))
        }
        notify::ErrorKind::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
            Error::io(path, io)
        }
        _ => Error::watch(format!("Failed to watch {}: {err}", path.display())),
    }
}

impl Drop for WatchSession {
    fn drop(&mut self) {
        self.close();
    }
}
