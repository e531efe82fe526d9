//! The provider probe contract.

use crate::error::ProbeResult;
use async_trait::async_trait;
use reqwest::Client;
use scout_core::Existence;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Outbound connection context shared by every probe of one run.
///
/// Probes only issue requests through it and never reconfigure it. Cloning is
/// cheap: the underlying client is reference counted.
#[derive(Debug, Clone)]
pub struct ProbeContext {
    client: Client,
}

impl ProbeContext {
    /// Wrap an HTTP client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// The pooled HTTP client for this run.
    #[must_use]
    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// What a probe learned about one provider.
///
/// Identity (provider id and domain) is deliberately absent; the runner takes
/// it from the descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProbeReport {
    /// Whether the email is registered
    pub exists: Existence,
    /// The provider blocked or throttled the check
    pub rate_limited: bool,
    /// Partially masked recovery email disclosed by the provider
    pub recovery_email: Option<String>,
    /// Partially masked phone number disclosed by the provider
    pub phone_number: Option<String>,
    /// Provider-specific data
    pub extra: Option<serde_json::Value>,
}

impl ProbeReport {
    /// The provider confirmed an account.
    #[must_use]
    pub fn found() -> Self {
        Self {
            exists: Existence::Exists,
            ..Self::default()
        }
    }

    /// The provider confirmed there is no account.
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            exists: Existence::Absent,
            ..Self::default()
        }
    }

    /// The provider refused to answer.
    #[must_use]
    pub fn rate_limited() -> Self {
        Self {
            exists: Existence::Unknown,
            rate_limited: true,
            ..Self::default()
        }
    }

    /// Attach a recovery email.
    #[must_use]
    pub fn with_recovery_email(mut self, email: impl Into<String>) -> Self {
        self.recovery_email = Some(email.into());
        self
    }

    /// Attach a phone number.
    #[must_use]
    pub fn with_phone_number(mut self, phone: impl Into<String>) -> Self {
        self.phone_number = Some(phone.into());
        self
    }

    /// Attach provider-specific data.
    #[must_use]
    pub fn with_extra(mut self, extra: serde_json::Value) -> Self {
        self.extra = Some(extra);
        self
    }
}

/// A check routine for one provider.
///
/// Implementations should map blocked or throttled responses to
/// [`ProbeReport::rate_limited`] and may return `Err` for anything else that
/// goes wrong; the runner tolerates errors and panics alike.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Check whether `email` is registered with the provider.
    async fn probe(&self, email: &str, ctx: &ProbeContext) -> ProbeResult<ProbeReport>;
}

/// Adapter turning an async closure into a [`Probe`].
pub struct FnProbe<F> {
    f: F,
}

/// Build a probe from an async closure taking the email and a context clone.
pub fn probe_fn<F, Fut>(f: F) -> FnProbe<F>
where
    F: Fn(String, ProbeContext) -> Fut + Send + Sync,
    Fut: Future<Output = ProbeResult<ProbeReport>> + Send,
{
    FnProbe { f }
}

#[async_trait]
impl<F, Fut> Probe for FnProbe<F>
where
    F: Fn(String, ProbeContext) -> Fut + Send + Sync,
    Fut: Future<Output = ProbeResult<ProbeReport>> + Send,
{
    async fn probe(&self, email: &str, ctx: &ProbeContext) -> ProbeResult<ProbeReport> {
        (self.f)(email.to_string(), ctx.clone()).await
    }
}
