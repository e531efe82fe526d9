//! Error types for the registry and probe subsystems.

use thiserror::Error;

/// Errors that can occur while building or querying the provider registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// No providers were registered, or configuration excluded all of them
    #[error("no providers available ({excluded} excluded by configuration)")]
    Empty {
        /// Number of registered providers removed by the exclusion filter
        excluded: usize,
    },

    /// Two descriptors share one provider ID
    #[error("provider registered twice: {provider_id}")]
    DuplicateProvider {
        /// The repeated provider ID
        provider_id: String,
    },

    /// Provider not found
    #[error("provider not found: {provider_id}")]
    NotFound {
        /// The provider ID that was not found
        provider_id: String,
    },

    /// Invalid descriptor (validation failed)
    #[error("invalid provider descriptor for {provider_id}: {reason}")]
    ValidationError {
        /// Provider ID being validated
        provider_id: String,
        /// Reason for validation failure
        reason: String,
    },
}

/// Faults raised inside a single provider probe.
///
/// These never cross the probe runner; they are logged and turned into an
/// inconclusive result for the provider.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Transport-level failure (connect, TLS, timeout, body decoding)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with something the probe does not understand
    #[error("unexpected response: {reason}")]
    UnexpectedResponse {
        /// What was wrong with the response
        reason: String,
    },

    /// Anything else
    #[error("{0}")]
    Other(String),
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Result type returned by probes.
pub type ProbeResult<T> = std::result::Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RegistryError::Empty { excluded: 2 };
        assert_eq!(
            err.to_string(),
            "no providers available (2 excluded by configuration)"
        );

        let err = ProbeError::UnexpectedResponse {
            reason: "missing my_post_key".to_string(),
        };
        assert_eq!(err.to_string(), "unexpected response: missing my_post_key");
    }
}
