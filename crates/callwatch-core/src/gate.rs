//! Change gate: drop values equal to their immediate predecessor.

/// Forwards the first value and every value that differs from the one
/// before it.
#[derive(Debug, Clone, Default)]
pub struct ChangeGate<T> {
    last: Option<T>,
}

impl<T: PartialEq + Copy> ChangeGate<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Returns `true` when `value` should be forwarded downstream.
    pub fn admit(&mut self, value: T) -> bool {
        if self.last == Some(value) {
            return false;
        }
        self.last = Some(value);
        true
    }

    /// The most recently forwarded value.
    pub const fn last(&self) -> Option<&T> {
        self.last.as_ref()
    }
}
