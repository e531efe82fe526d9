//! Acquisition of the outbound connection context shared by one run.

use crate::error::{Result, ScanError};
use reqwest::Client;
use scout_core::HttpConfig;
use scout_registry::ProbeContext;
use std::time::Duration;

/// Produces a fresh [`ProbeContext`] for each run.
pub trait ContextFactory: Send + Sync {
    /// Acquire the shared context for one run.
    ///
    /// # Errors
    /// Returns [`ScanError::ContextUnavailable`] if the context cannot be built.
    fn acquire(&self) -> Result<ProbeContext>;
}

/// Builds a pooled `reqwest` client from the `[http]` configuration.
///
/// Each run gets its own client, so cookies never leak between emails.
#[derive(Debug, Clone, Default)]
pub struct HttpContextFactory {
    config: HttpConfig,
}

impl HttpContextFactory {
    /// Create a factory for the given HTTP settings.
    #[must_use]
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }
}

impl ContextFactory for HttpContextFactory {
    fn acquire(&self) -> Result<ProbeContext> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .connect_timeout(Duration::from_secs(self.config.connect_timeout_secs))
            .user_agent(self.config.user_agent.as_str())
            .cookie_store(true)
            .build()
            .map_err(|e| ScanError::ContextUnavailable {
                reason: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(ProbeContext::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_context_factory_default() {
        let factory = HttpContextFactory::default();
        assert!(factory.acquire().is_ok());
    }

    #[test]
    fn test_http_context_factory_custom_timeout() {
        let factory = HttpContextFactory::new(HttpConfig {
            timeout_secs: 3,
            connect_timeout_secs: 1,
            user_agent: "scout-test".to_string(),
        });
        assert!(factory.acquire().is_ok());
    }
}
