//! Value types flowing through the pipeline and their wire encodings.

use strum::{AsRefStr, Display};

// ═══════════════════════════════════════════════════════════════════════════
// TYPES
// ═══════════════════════════════════════════════════════════════════════════

/// Whether the Teams user is currently in a call, as derived from the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallState {
    InCall,
    NotInCall,
}

/// Liveness of this process as seen by broker subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum Availability {
    #[strum(serialize = "online")]
    Available,
    #[strum(serialize = "offline")]
    Unavailable,
}

/// Home-automation binary sensor payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum BinarySensorValue {
    #[strum(serialize = "ON")]
    On,
    #[strum(serialize = "OFF")]
    Off,
}

impl CallState {
    pub const fn is_in_call(self) -> bool {
        matches!(self, Self::InCall)
    }
}

impl From<CallState> for BinarySensorValue {
    fn from(state: CallState) -> Self {
        match state {
            CallState::InCall => Self::On,
            CallState::NotInCall => Self::Off,
        }
    }
}
