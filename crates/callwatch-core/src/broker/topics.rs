use super::{Message, PublishOptions};
use crate::state::Availability;

/// Topic layout under a single prefix.
///
/// - `<prefix>/status`: availability, `online` / `offline`
/// - `<prefix>/state`: call state, `ON` / `OFF`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topics {
    availability: String,
    state: String,
}

impl Topics {
    pub fn new(prefix: &str) -> Self {
        Self {
            availability: format!("{prefix}/status"),
            state: format!("{prefix}/state"),
        }
    }

    pub fn availability(&self) -> &str {
        &self.availability
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    /// The message the broker publishes on our behalf if we vanish.
    pub fn last_will(&self) -> Message {
        Message {
            topic: self.availability.clone(),
            payload: Availability::Unavailable.to_string(),
            options: PublishOptions::RETAINED,
        }
    }
}
