//! Classification of raw filesystem events
//!
//! Maps backend-specific [`notify::EventKind`]s onto what the pipeline cares
//! about: the file changed, or the file is gone and the watch is over.

use notify::{event::ModifyKind, EventKind};

// ═══════════════════════════════════════════════════════════════════════════
// TYPES
// ═══════════════════════════════════════════════════════════════════════════

/// What a raw event means for a session watching a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventClass {
    /// Content or metadata changed; re-evaluate.
    Changed,
    /// The file was renamed away or removed; the watch is finished.
    Ended,
    /// Nothing relevant (reads, opens, closes).
    Ignored,
}

// ═══════════════════════════════════════════════════════════════════════════
// EVENT HANDLERS
// ═══════════════════════════════════════════════════════════════════════════

/// Classify a raw event kind.
pub const fn classify(kind: &EventKind) -> EventClass {
    match kind {
        EventKind::Modify(ModifyKind::Name(_)) | EventKind::Remove(_) => EventClass::Ended,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Any | EventKind::Other => {
            EventClass::Changed
        }
        EventKind::Access(_) => EventClass::Ignored,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════
