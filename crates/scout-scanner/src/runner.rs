//! Failure-isolated execution of a single probe.

use futures::FutureExt;
use scout_registry::{ProbeContext, ProbeError, ProbeReport, ProviderDescriptor, RawProbeResult};
use std::any::Any;
use std::panic::AssertUnwindSafe;

/// How a single probe invocation ended, before normalization.
#[derive(Debug)]
enum ProbeOutcome {
    Reported(ProbeReport),
    Failed(ProbeError),
    Panicked(String),
}

/// Runs one provider's probe and always yields exactly one result.
///
/// Errors and panics raised by the probe are absorbed here and turned into an
/// inconclusive, rate-limited result for the provider. Nothing is retried.
pub struct ProbeRunner;

impl ProbeRunner {
    /// Run the descriptor's probe against `email`.
    pub async fn run(
        descriptor: &ProviderDescriptor,
        email: &str,
        ctx: &ProbeContext,
    ) -> RawProbeResult {
        let outcome = Self::execute(descriptor, email, ctx).await;
        Self::normalize(descriptor, outcome)
    }

    async fn execute(descriptor: &ProviderDescriptor, email: &str, ctx: &ProbeContext) -> ProbeOutcome {
        match AssertUnwindSafe(descriptor.probe().probe(email, ctx))
            .catch_unwind()
            .await
        {
            Ok(Ok(report)) => ProbeOutcome::Reported(report),
            Ok(Err(e)) => ProbeOutcome::Failed(e),
            Err(payload) => ProbeOutcome::Panicked(panic_message(payload.as_ref())),
        }
    }

    fn normalize(descriptor: &ProviderDescriptor, outcome: ProbeOutcome) -> RawProbeResult {
        match outcome {
            ProbeOutcome::Reported(report) => RawProbeResult::from_report(descriptor, report),
            ProbeOutcome::Failed(e) => {
                tracing::debug!(provider_id = %descriptor.id(), error = %e, "probe failed");
                RawProbeResult::inconclusive(descriptor)
            }
            ProbeOutcome::Panicked(message) => {
                tracing::warn!(provider_id = %descriptor.id(), %message, "probe panicked");
                RawProbeResult::inconclusive(descriptor)
            }
        }
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Client;
    use scout_core::{Existence, ProviderId};
    use scout_registry::probe_fn;

    fn ctx() -> ProbeContext {
        ProbeContext::new(Client::new())
    }

    fn id(value: &str) -> ProviderId {
        ProviderId::new(value).expect("valid provider ID")
    }

    #[tokio::test]
    async fn test_reported_result_keeps_probe_fields() {
        let descriptor = ProviderDescriptor::new(
            id("p1"),
            "p1.com",
            probe_fn(|_email, _ctx| async {
                Ok(ProbeReport::found().with_recovery_email("a***@b.com"))
            }),
        );

        let result = ProbeRunner::run(&descriptor, "a@b.com", &ctx()).await;
        assert_eq!(result.provider_id, id("p1"));
        assert_eq!(result.exists, Existence::Exists);
        assert!(!result.rate_limited);
        assert_eq!(result.recovery_email.as_deref(), Some("a***@b.com"));
    }

    #[tokio::test]
    async fn test_error_becomes_inconclusive() {
        let descriptor = ProviderDescriptor::new(
            id("p2"),
            "p2.com",
            probe_fn(|_email, _ctx| async {
                Err(ProbeError::UnexpectedResponse {
                    reason: "garbage".to_string(),
                })
            }),
        );

        let result = ProbeRunner::run(&descriptor, "a@b.com", &ctx()).await;
        assert_eq!(result.provider_id, id("p2"));
        assert_eq!(result.display_domain, "p2.com");
        assert_eq!(result.exists, Existence::Unknown);
        assert!(result.rate_limited);
        assert!(result.recovery_email.is_none());
        assert!(result.phone_number.is_none());
    }

    #[tokio::test]
    async fn test_panic_becomes_inconclusive() {
        let descriptor = ProviderDescriptor::new(
            id("p3"),
            "p3.com",
            probe_fn(|email, _ctx| async move {
                if email.contains('@') {
                    panic!("index out of bounds");
                }
                Ok(ProbeReport::not_found())
            }),
        );

        let result = ProbeRunner::run(&descriptor, "a@b.com", &ctx()).await;
        assert_eq!(result.exists, Existence::Unknown);
        assert!(result.rate_limited);
    }

    #[test]
    fn test_panic_message() {
        let boxed: Box<dyn Any + Send> = Box::new("static message");
        assert_eq!(panic_message(boxed.as_ref()), "static message");

        let boxed: Box<dyn Any + Send> = Box::new(String::from("owned message"));
        assert_eq!(panic_message(boxed.as_ref()), "owned message");

        let boxed: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(boxed.as_ref()), "non-string panic payload");
    }
}
