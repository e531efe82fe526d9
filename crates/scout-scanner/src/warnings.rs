//! Side channel for human-readable warnings about incomplete lookups.

use std::sync::Mutex;

/// Receives warnings emitted by the lookup service.
pub trait WarningSink: Send + Sync {
    /// Record one warning.
    fn warn(&self, message: &str);
}

/// Forwards warnings to `tracing` at WARN level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingWarnings;

impl WarningSink for TracingWarnings {
    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

/// Keeps warnings in memory.
#[derive(Debug, Default)]
pub struct CollectingWarnings {
    messages: Mutex<Vec<String>>,
}

impl CollectingWarnings {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All warnings recorded so far.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .expect("acquire lock on warnings")
            .clone()
    }
}

impl WarningSink for CollectingWarnings {
    fn warn(&self, message: &str) {
        self.messages
            .lock()
            .expect("acquire lock on warnings")
            .push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_warnings() {
        let sink = CollectingWarnings::new();
        sink.warn("first");
        sink.warn("second");
        assert_eq!(sink.messages(), vec!["first", "second"]);
    }
}
