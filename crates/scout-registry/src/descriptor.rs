//! Provider descriptor types.

use crate::error::{RegistryError, Result};
use crate::probe::Probe;
use scout_core::ProviderId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// How a probe finds out whether an account exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeMethod {
    /// Registration form availability check
    #[default]
    Register,
    /// Login form error messages
    Login,
    /// Password reset flow; may send the account owner an email
    PasswordRecovery,
    /// Anything else (public API, profile lookup)
    Other,
}

/// Immutable description of one provider and the probe that checks it.
#[derive(Clone)]
pub struct ProviderDescriptor {
    id: ProviderId,
    display_domain: String,
    method: ProbeMethod,
    frequent_rate_limit: bool,
    probe: Arc<dyn Probe>,
}

impl ProviderDescriptor {
    /// Create a descriptor using the registration method.
    pub fn new(id: ProviderId, display_domain: impl Into<String>, probe: impl Probe + 'static) -> Self {
        Self {
            id,
            display_domain: display_domain.into(),
            method: ProbeMethod::default(),
            frequent_rate_limit: false,
            probe: Arc::new(probe),
        }
    }

    /// Set the probing method.
    #[must_use]
    pub fn with_method(mut self, method: ProbeMethod) -> Self {
        self.method = method;
        self
    }

    /// Mark the provider as one that throttles often.
    #[must_use]
    pub fn with_frequent_rate_limit(mut self, frequent: bool) -> Self {
        self.frequent_rate_limit = frequent;
        self
    }

    /// Get the provider ID.
    #[must_use]
    pub fn id(&self) -> &ProviderId {
        &self.id
    }

    /// Get the display domain (e.g. `bios-mods.com`).
    #[must_use]
    pub fn display_domain(&self) -> &str {
        &self.display_domain
    }

    /// Get the probing method.
    #[must_use]
    pub fn method(&self) -> ProbeMethod {
        self.method
    }

    /// Whether the provider is known to throttle often.
    #[must_use]
    pub fn frequent_rate_limit(&self) -> bool {
        self.frequent_rate_limit
    }

    /// Whether running the probe can be noticed by the account owner.
    #[must_use]
    pub fn has_side_effects(&self) -> bool {
        self.method == ProbeMethod::PasswordRecovery
    }

    /// The probe routine.
    #[must_use]
    pub fn probe(&self) -> &dyn Probe {
        self.probe.as_ref()
    }

    /// Validate the descriptor for completeness.
    pub fn validate(&self) -> Result<()> {
        let domain = self.display_domain.trim();
        if domain.is_empty() {
            return Err(RegistryError::ValidationError {
                provider_id: self.id.to_string(),
                reason: "display domain cannot be empty".to_string(),
            });
        }

        if domain.contains("://") || domain.contains(char::is_whitespace) {
            return Err(RegistryError::ValidationError {
                provider_id: self.id.to_string(),
                reason: format!("display domain must be a bare host name, got '{domain}'"),
            });
        }

        Ok(())
    }
}

impl fmt::Debug for ProviderDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderDescriptor")
            .field("id", &self.id)
            .field("display_domain", &self.display_domain)
            .field("method", &self.method)
            .field("frequent_rate_limit", &self.frequent_rate_limit)
            .finish_non_exhaustive()
    }
}
