//! Graceful shutdown signalling.
//!
//! Handlers are installed up front with [`ShutdownListener::install`] so a
//! signal arriving during startup is not lost.

use crate::{Error, Result};

/// Which signal asked us to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// SIGINT / Ctrl-C
    Interrupt,
    /// SIGTERM
    Terminate,
}

/// Installed OS signal handlers.
#[derive(Debug)]
pub struct ShutdownListener {
    #[cfg(unix)]
    sigint: tokio::signal::unix::Signal,
    #[cfg(unix)]
    sigterm: tokio::signal::unix::Signal,
}

impl ShutdownListener {
    /// Install SIGINT and SIGTERM handlers (Ctrl-C elsewhere).
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Signal`] if a handler cannot be registered.
    #[cfg(unix)]
    pub fn install() -> Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        let sigint = signal(SignalKind::interrupt())
            .map_err(|e| Error::Signal(format!("Failed to setup SIGINT: {e}")))?;
        let sigterm = signal(SignalKind::terminate())
            .map_err(|e| Error::Signal(format!("Failed to setup SIGTERM: {e}")))?;

        Ok(Self { sigint, sigterm })
    }

    /// Install the Ctrl-C handler.
    ///
    /// # Errors
    ///
    /// Never fails on this platform; registration happens on first wait.
    #[cfg(not(unix))]
    pub fn install() -> Result<Self> {
        Ok(Self {})
    }

    /// Wait for the next shutdown signal.
    #[cfg(unix)]
    pub async fn recv(mut self) -> ShutdownSignal {
        tokio::select! {
            _ = self.sigint.recv() => ShutdownSignal::Interrupt,
            _ = self.sigterm.recv() => ShutdownSignal::Terminate,
        }
    }

    /// Wait for Ctrl-C.
    #[cfg(not(unix))]
    pub async fn recv(self) -> ShutdownSignal {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %Error::Signal(e.to_string()), "Ctrl-C handler failed");
            std::future::pending::<()>().await;
        }
        ShutdownSignal::Interrupt
    }
}
