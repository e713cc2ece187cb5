//! Call status extraction from the Teams log
//!
//! Teams writes a line containing `eventData: s::;m::1;a::<code>` on call
//! lifecycle events. Code `1` means a call started, code `3` means it ended.
//! The current state is whatever the last such line says; earlier lines are
//! superseded. Other codes are ignored.
//!
//! Extraction always reads and splits the whole file. There is no
//! incremental tail: the file is ground truth on every evaluation.

use std::{path::Path, sync::OnceLock};

use regex::Regex;

use crate::{state::CallState, Error, Result};

/// Any call lifecycle marker we care about.
const MARKER_PATTERN: &str = r"eventData: s::;m::1;a::[13]";

/// The "call started" marker.
const IN_CALL_PATTERN: &str = r"eventData: s::;m::1;a::1";

const LINE_BREAK_PATTERN: &str = r"\r\n|\r|\n";

// ═══════════════════════════════════════════════════════════════════════════
// PUBLIC API
// ═══════════════════════════════════════════════════════════════════════════

/// Derive the call state from full log content.
///
/// Returns [`CallState::InCall`] iff the last marker line contains the
/// `a::1` marker. No marker line at all means [`CallState::NotInCall`].
pub fn extract_status(content: &str) -> CallState {
    static MARKER_RE: OnceLock<Option<Regex>> = OnceLock::new();
    static IN_CALL_RE: OnceLock<Option<Regex>> = OnceLock::new();

    let marker_re = MARKER_RE.get_or_init(|| Regex::new(MARKER_PATTERN).ok());
    let in_call_re = IN_CALL_RE.get_or_init(|| Regex::new(IN_CALL_PATTERN).ok());

    let last_marker = marker_re
        .as_ref()
        .and_then(|re| split_lines(content).filter(|line| re.is_match(line)).last());

    match (last_marker, in_call_re.as_ref()) {
        (Some(line), Some(re)) if re.is_match(line) => CallState::InCall,
        _ => CallState::NotInCall,
    }
}

/// Read the log file at `path` and derive the call state from it.
///
/// Invalid UTF-8 (for example a multi-byte character torn by a concurrent
/// write) is replaced rather than rejected.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read. A vanished file is
/// reported with [`Error::is_not_found`] set.
pub fn read_status(path: &Path) -> Result<CallState> {
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, &e))?;
    Ok(extract_status(&String::from_utf8_lossy(&bytes)))
}

// ═══════════════════════════════════════════════════════════════════════════
// HELPER FUNCTIONS
// ═══════════════════════════════════════════════════════════════════════════

/// Split on any line-ending style: `\r\n`, bare `\r` or `\n`.
fn split_lines(content: &str) -> Box<dyn Iterator<Item = &str> + '_> {
    static LINE_BREAK_RE: OnceLock<Option<Regex>> = OnceLock::new();

    match LINE_BREAK_RE.get_or_init(|| Regex::new(LINE_BREAK_PATTERN).ok()) {
        Some(re) => Box::new(re.split(content)),
        None => Box::new(content.lines()),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════
