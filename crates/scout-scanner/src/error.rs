//! Scanner error types.

use thiserror::Error;

/// Run-level faults: the run could not start or did not finish as a whole.
///
/// Probe-level faults never show up here; the runner absorbs them.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The shared HTTP context could not be acquired
    #[error("shared HTTP context unavailable: {reason}")]
    ContextUnavailable {
        /// Why acquisition failed
        reason: String,
    },

    /// The orchestration itself panicked
    #[error("orchestration panicked: {0}")]
    OrchestrationPanicked(String),
}

/// Result type for scanner operations
pub type Result<T> = std::result::Result<T, ScanError>;
