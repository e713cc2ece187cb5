//! Shared fixtures for pipeline integration tests.

#![allow(dead_code)]

use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use callwatch_core::{
    broker::{BrokerClient, PublishOptions, PublisherBridge, Topics},
    Pipeline, Result, WatchOptions,
};
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

pub const IN_CALL: &str = "Sat Mar 02 2024 10:15:02 GMT+0100 <1234> -- info -- StatusIndicatorStateService: Added Busy (current state: Available -> Busy) eventData: s::;m::1;a::1\n";
pub const IN_CALL_AGAIN: &str = "Sat Mar 02 2024 10:15:09 GMT+0100 <1234> -- info -- eventData: s::;m::1;a::1\n";
pub const OTHER_CODE: &str = "Sat Mar 02 2024 10:20:30 GMT+0100 <1234> -- info -- eventData: s::;m::1;a::2\n";
pub const NOT_IN_CALL: &str = "Sat Mar 02 2024 10:42:11 GMT+0100 <1234> -- info -- StatusIndicatorStateService: Removed Busy eventData: s::;m::1;a::3\n";
pub const NOISE: &str = "Sat Mar 02 2024 10:43:00 GMT+0100 <1234> -- info -- Presence: heartbeat ok\n";

pub const POLL: Duration = Duration::from_millis(50);
pub const DEBOUNCE: Duration = Duration::from_millis(200);

/// Upper bound for anything the pipeline should do "soon".
pub const PATIENCE: Duration = Duration::from_secs(10);

/// In-memory broker that records every publish.
#[derive(Debug, Default)]
pub struct RecordingBroker {
    sent: Mutex<Vec<(String, String)>>,
    disconnected: AtomicBool,
}

impl RecordingBroker {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    /// Payloads published on `topic`, oldest first.
    pub fn payloads(&self, topic: &str) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter(|(t, _)| t == topic)
            .map(|(_, p)| p)
            .collect()
    }

    pub fn is_disconnected(&self) -> bool {
        self.disconnected.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl BrokerClient for RecordingBroker {
    async fn publish(&self, topic: &str, payload: &str, _options: PublishOptions) -> Result<()> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push((topic.to_string(), payload.to_string()));
        }
        Ok(())
    }

    async fn disconnect(&self) -> Result<()> {
        self.disconnected.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// A pipeline running on its own task against a recording broker.
pub struct Harness {
    pub broker: Arc<RecordingBroker>,
    pub connected: mpsc::Sender<()>,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<Result<()>>,
}

impl Harness {
    pub fn start(log_file: &Path) -> Self {
        let broker = Arc::new(RecordingBroker::default());
        let bridge = PublisherBridge::new(Arc::clone(&broker), Topics::new("call"));
        let options = WatchOptions {
            log_file: log_file.to_path_buf(),
            poll_interval: POLL,
            debounce_window: DEBOUNCE,
        };
        let (connected, connected_rx) = mpsc::channel(1);
        let (shutdown, shutdown_rx) = oneshot::channel();

        let task = tokio::spawn(Pipeline::new(options, bridge).run_until(connected_rx, async {
            let _ = shutdown_rx.await;
        }));

        Self {
            broker,
            connected,
            shutdown: Some(shutdown),
            task,
        }
    }

    pub fn states(&self) -> Vec<String> {
        self.broker.payloads("call/state")
    }

    pub fn availability(&self) -> Vec<String> {
        self.broker.payloads("call/status")
    }

    /// Wait until the state topic has received exactly `expected`.
    pub async fn expect_states(&self, expected: &[&str]) -> bool {
        wait_until(|| self.states() == expected).await
    }

    /// Wait for the pipeline to stop on its own.
    pub async fn join(mut self) -> Option<Result<()>> {
        let _shutdown = self.shutdown.take();
        tokio::time::timeout(PATIENCE, self.task).await.ok()?.ok()
    }

    /// Signal shutdown and wait for the pipeline to finish.
    pub async fn stop(mut self) -> Option<Result<()>> {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        tokio::time::timeout(PATIENCE, self.task).await.ok()?.ok()
    }
}

/// Poll `condition` until it holds or [`PATIENCE`] runs out.
pub async fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + PATIENCE;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    condition()
}

pub fn log_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("logs.txt")
}

pub fn write_log(path: &Path, content: &str) -> std::io::Result<()> {
    std::fs::write(path, content)
}

pub fn append_log(path: &Path, content: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().append(true).open(path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()
}
