use serde::{Deserialize, Serialize};

/// The single transient error area.
///
/// Each shown message gets a fresh generation. A scheduled dismissal only
/// clears the area if nothing newer was shown since, so the latest message
/// always stays up for its full delay.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDisplay {
    message: Option<String>,
    generation: u64,
}

impl ErrorDisplay {
    /// Replaces whatever is shown and returns the generation the dismissal
    /// timer must carry.
    pub fn show(&mut self, message: impl Into<String>) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.message = Some(message.into());
        self.generation
    }

    /// Returns true if the message was cleared.
    pub fn dismiss(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.message.is_none() {
            return false;
        }
        self.message = None;
        true
    }

    pub fn clear(&mut self) {
        self.message = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismissal_clears_current_message() {
        let mut display = ErrorDisplay::default();
        let generation = display.show("❌ City not found or API error");
        assert_eq!(display.message(), Some("❌ City not found or API error"));
        assert!(display.dismiss(generation));
        assert_eq!(display.message(), None);
    }

    #[test]
    fn stale_dismissal_leaves_newer_message() {
        let mut display = ErrorDisplay::default();
        let first = display.show("first");
        let second = display.show("second");
        assert_eq!(display.message(), Some("second"));

        assert!(!display.dismiss(first));
        assert_eq!(display.message(), Some("second"));

        assert!(display.dismiss(second));
        assert_eq!(display.message(), None);
    }

    #[test]
    fn dismissal_after_clear_is_a_no_op() {
        let mut display = ErrorDisplay::default();
        let generation = display.show("oops");
        display.clear();
        assert!(!display.dismiss(generation));
        assert_eq!(display.generation(), generation);
    }
}
