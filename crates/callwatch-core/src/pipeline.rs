//! The observation pipeline
//!
//! ```text
//! wait_for_file ─► WatchSession ─► Debouncer ─► read_status ─► ChangeGate ─► PublisherBridge
//!       ▲                │
//!       └── watch ended ─┘
//! ```
//!
//! Everything runs on one task. Ticks are evaluated one at a time in the
//! order they fire, so publishes can never overtake each other. The watch
//! session is owned by the running future: however the pipeline stops, the
//! OS watch handle goes with it, and [`Pipeline::run_until`] then closes the
//! broker connection.

use std::{
    convert::Infallible,
    future::Future,
    path::{Path, PathBuf},
    time::Duration,
};

use tokio::{sync::mpsc, time::Instant};

use crate::{
    broker::{BrokerClient, PublisherBridge},
    config::Settings,
    debounce::{sleep_until_deadline, Debouncer},
    extract::read_status,
    gate::ChangeGate,
    poller::wait_for_file,
    state::CallState,
    watcher::WatchSession,
    Result,
};

// ═══════════════════════════════════════════════════════════════════════════
// TYPES
// ═══════════════════════════════════════════════════════════════════════════

/// What to watch and how often.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchOptions {
    pub log_file: PathBuf,
    pub poll_interval: Duration,
    pub debounce_window: Duration,
}

impl From<&Settings> for WatchOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            log_file: settings.log_file.clone(),
            poll_interval: settings.poll_interval,
            debounce_window: settings.debounce_window,
        }
    }
}

/// One log file feeding one broker.
#[derive(Debug)]
pub struct Pipeline<B> {
    options: WatchOptions,
    bridge: PublisherBridge<B>,
    gate: ChangeGate<CallState>,
}

// ═══════════════════════════════════════════════════════════════════════════
// PUBLIC API
// ═══════════════════════════════════════════════════════════════════════════

impl<B: BrokerClient> Pipeline<B> {
    pub const fn new(options: WatchOptions, bridge: PublisherBridge<B>) -> Self {
        Self {
            options,
            bridge,
            gate: ChangeGate::new(),
        }
    }

    /// Run until `shutdown` completes or a filesystem error occurs.
    ///
    /// `connected` yields once per broker (re)connect; each one is answered
    /// with an `online` announcement. The broker connection is closed on
    /// every exit path.
    ///
    /// # Errors
    ///
    /// Returns the filesystem or watch error that stopped the pipeline.
    /// Broker errors are logged and never returned from here.
    pub async fn run_until<F>(mut self, mut connected: mpsc::Receiver<()>, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let outcome = {
            let Self {
                options,
                bridge,
                gate,
            } = &mut self;
            let bridge = &*bridge;

            let announcing = async {
                bridge.announce_on_connect(&mut connected).await;
                std::future::pending::<()>().await;
            };

            tokio::select! {
                result = supervise(options, bridge, gate) => match result {
                    Ok(never) => match never {},
                    Err(e) => Err(e),
                },
                () = announcing => Ok(()),
                () = shutdown => {
                    tracing::info!("shutting down");
                    Ok(())
                }
            }
        };

        if let Err(e) = outcome.as_ref() {
            tracing::error!(error = %e, "pipeline stopped");
        }
        if let Err(e) = self.bridge.close().await {
            tracing::warn!(error = %e, "MQTT disconnect failed");
        }
        outcome
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SUPERVISOR
// ═══════════════════════════════════════════════════════════════════════════

/// Poll for the file, watch it until the watch ends, repeat.
///
/// Only returns on a fatal filesystem error. "Not found" at any point sends
/// the loop back to polling.
async fn supervise<B: BrokerClient>(
    options: &WatchOptions,
    bridge: &PublisherBridge<B>,
    gate: &mut ChangeGate<CallState>,
) -> Result<Infallible> {
    let path = options.log_file.as_path();
    let mut debouncer = Debouncer::new(options.debounce_window);

    loop {
        wait_for_file(path, options.poll_interval).await?;

        let mut session = match WatchSession::open(path) {
            Ok(session) => session,
            Err(e) if e.is_not_found() => continue,
            Err(e) => return Err(e),
        };
        tracing::info!(path = %path.display(), "watching log file");

        debouncer.reset();
        loop {
            tokio::select! {
                change = session.next_change() => match change {
                    Some(Ok(change)) => {
                        if debouncer.notify(change, Instant::now()) {
                            evaluate(path, bridge, gate).await?;
                        }
                    }
                    Some(Err(e)) => return Err(e),
                    None => break,
                },
                () = sleep_until_deadline(debouncer.deadline()) => {
                    if debouncer.poll_deadline(Instant::now()) {
                        evaluate(path, bridge, gate).await?;
                    }
                }
            }
        }

        tracing::info!(path = %path.display(), "watch ended, waiting for log file");
    }
}

/// One debounced tick: read, gate, publish.
async fn evaluate<B: BrokerClient>(
    path: &Path,
    bridge: &PublisherBridge<B>,
    gate: &mut ChangeGate<CallState>,
) -> Result<()> {
    let state = match read_status(path) {
        Ok(state) => state,
        // Removed between the event and the read; the watch is about to end.
        Err(e) if e.is_not_found() => {
            tracing::debug!(path = %path.display(), "log file vanished before read");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    if gate.admit(state) {
        tracing::info!("in call: {}", state.is_in_call());
        bridge.publish_call_state(state).await;
    } else {
        tracing::trace!(?state, "call state unchanged");
    }
    Ok(())
}
