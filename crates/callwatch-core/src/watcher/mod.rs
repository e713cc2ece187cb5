//! File watching for the Teams log
//!
//! A [`WatchSession`] observes one existing file and yields a [`Change`] per
//! reported modification, starting with a synthetic [`Change::Initial`] so
//! the first evaluation happens without waiting for a write. A rename or
//! removal of the file ends the session; the caller is expected to go back
//! to polling for the file and open a new session once it reappears.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use callwatch_core::watcher::{Change, WatchSession};
//!
//! # async fn example() -> callwatch_core::Result<()> {
//! let mut session = WatchSession::open(Path::new("/tmp/logs.txt"))?;
//! while let Some(change) = session.next_change().await {
//!     match change? {
//!         Change::Initial => println!("first look"),
//!         Change::Modified => println!("file changed"),
//!     }
//! }
//! // Watch ended: file was renamed or removed.
//! # Ok(())
//! # }
//! ```

// ═══════════════════════════════════════════════════════════════════════════
// MODULE DEFINITIONS
// ═══════════════════════════════════════════════════════════════════════════

pub mod events;
pub mod session;

// ═══════════════════════════════════════════════════════════════════════════
// RE-EXPORTS
// ═══════════════════════════════════════════════════════════════════════════

pub use events::{classify, EventClass};
pub use session::WatchSession;

/// A change notification from a watch session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Synthetic notification emitted once when a session opens.
    Initial,
    /// The file was written to or its metadata changed.
    Modified,
}
