//! Trailing-edge debouncing of change notifications
//!
//! The first notification after a quiet period opens a window. Everything
//! arriving inside the window is absorbed, and a single tick fires when the
//! window closes. Later notifications do not push the deadline out, so a
//! file that is written continuously is still re-evaluated once per window.
//!
//! The initial notification of a fresh watch is special: it fires at once so
//! the first evaluation does not wait for a window.

use std::time::Duration;

use tokio::time::Instant;

use crate::watcher::Change;

/// Pending-deadline state for one notification stream.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Record a notification received at `now`.
    ///
    /// Returns `true` if a tick is due immediately. That only happens for
    /// [`Change::Initial`]; modifications open or join a window instead.
    pub fn notify(&mut self, change: Change, now: Instant) -> bool {
        match change {
            Change::Initial => {
                self.deadline = None;
                true
            }
            Change::Modified => {
                if self.deadline.is_none() {
                    self.deadline = Some(now + self.window);
                }
                false
            }
        }
    }

    /// When the pending window closes, if one is open.
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Close the window if its deadline has passed. Returns `true` if a tick
    /// is due.
    pub fn poll_deadline(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Forget any open window.
    pub fn reset(&mut self) {
        self.deadline = None;
    }
}

/// Sleep until the debouncer's deadline. Never completes when no window is
/// open, which makes it usable as a `tokio::select!` branch.
pub async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
