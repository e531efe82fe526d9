//! Raw per-provider probe results.

use crate::descriptor::ProviderDescriptor;
use crate::probe::ProbeReport;
use scout_core::{Existence, ProviderId};
use serde::{Deserialize, Serialize};

/// The outcome of running one provider's probe during one run.
///
/// `provider_id` and `display_domain` always come from the descriptor, never
/// from the probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProbeResult {
    /// Provider that was checked
    pub provider_id: ProviderId,
    /// Display domain of the provider
    pub display_domain: String,
    /// Whether the email is registered
    pub exists: Existence,
    /// The provider blocked the check, or the probe failed
    pub rate_limited: bool,
    /// Recovery email disclosed by the provider
    pub recovery_email: Option<String>,
    /// Phone number disclosed by the provider
    pub phone_number: Option<String>,
    /// Provider-specific data
    pub extra: Option<serde_json::Value>,
}

impl RawProbeResult {
    /// Stamp a probe report with the descriptor's identity.
    #[must_use]
    pub fn from_report(descriptor: &ProviderDescriptor, report: ProbeReport) -> Self {
        Self {
            provider_id: descriptor.id().clone(),
            display_domain: descriptor.display_domain().to_string(),
            exists: report.exists,
            rate_limited: report.rate_limited,
            recovery_email: report.recovery_email,
            phone_number: report.phone_number,
            extra: report.extra,
        }
    }

    /// Placeholder for a provider whose probe failed or never finished.
    #[must_use]
    pub fn inconclusive(descriptor: &ProviderDescriptor) -> Self {
        Self::from_report(descriptor, ProbeReport::rate_limited())
    }

    /// Whether the result is something other than a confident answer.
    #[must_use]
    pub fn is_inconclusive(&self) -> bool {
        self.rate_limited || !self.exists.is_conclusive()
    }
}
