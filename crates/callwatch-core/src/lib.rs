//! # Callwatch Core
//!
//! Watches the Microsoft Teams desktop log and republishes "in a call or
//! not" to an MQTT broker, together with an availability flag for this
//! process.
//!
//! ## Pipeline
//!
//! - [`poller`]: wait for the log file to exist
//! - [`watcher`]: change notifications for the file, ending on rename/remove
//! - [`debounce`]: trailing-edge coalescing of notification bursts
//! - [`extract`]: last call marker in the file → [`CallState`]
//! - [`gate`]: drop repeats of the previous state
//! - [`broker`]: publish retained `ON`/`OFF` and `online`/`offline`
//!
//! [`pipeline::Pipeline`] wires these together and re-arms the watch whenever
//! the file goes away.
//!
//! ## Laws (Compiler Enforced)
//!
//! - No `unwrap()` / `expect()` / `panic!()` - returns `Result` instead
//! - No `unsafe` - safe Rust only

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod broker;
pub mod config;
pub mod debounce;
mod error;
pub mod extract;
pub mod gate;
pub mod pipeline;
pub mod poller;
pub mod shutdown;
pub mod state;
pub mod watcher;

pub use config::{load_config, Settings};
pub use error::{Error, Result};
pub use pipeline::{Pipeline, WatchOptions};
pub use shutdown::{ShutdownListener, ShutdownSignal};
pub use state::{Availability, BinarySensorValue, CallState};
