//! Account lookup service, the public entry point of the scanner.
//!
//! The service drives one probe run per email, aggregates the confirmed
//! accounts and is the top-level error boundary: a lookup never fails, it
//! returns what it could find and emits a warning when the answer may be
//! incomplete.

use crate::aggregator::{aggregate, AccountRecord};
use crate::context::HttpContextFactory;
use crate::error::ScanError;
use crate::orchestrator::ProbeOrchestrator;
use crate::runner::panic_message;
use crate::warnings::{TracingWarnings, WarningSink};
use chrono::{DateTime, Utc};
use futures::FutureExt;
use scout_core::{AppConfig, ProviderId};
use scout_registry::ProviderRegistry;
use serde::{Deserialize, Serialize};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::Instrument;
use uuid::Uuid;

/// Everything learned while looking up one email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupReport {
    /// Identifier of this run, used in log spans
    pub run_id: Uuid,
    /// The email that was looked up
    pub email: String,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration of the run in milliseconds
    pub elapsed_ms: u64,
    /// Number of providers that produced a result
    pub providers_checked: usize,
    /// Confirmed accounts
    pub accounts: Vec<AccountRecord>,
    /// Providers that were rate limited or failed
    pub inconclusive: Vec<ProviderId>,
    /// Run-level fault, if the run could not complete
    pub error: Option<String>,
}

impl LookupReport {
    /// Whether every provider answered and the run finished normally.
    ///
    /// An incomplete report's missing accounts are not proof of absence.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.error.is_none() && self.inconclusive.is_empty()
    }

    fn incomplete_warning(&self) -> String {
        match &self.error {
            Some(error) => format!(
                "results for {} may be incomplete: {error}",
                self.email
            ),
            None => format!(
                "results for {} may be incomplete: {} of {} providers were rate limited or failed",
                self.email,
                self.inconclusive.len(),
                self.providers_checked
            ),
        }
    }
}

/// Looks up the accounts registered under an email address.
pub struct AccountLookupService {
    orchestrator: ProbeOrchestrator,
    warnings: Arc<dyn WarningSink>,
}

impl AccountLookupService {
    /// Create a service that reports warnings through `tracing`.
    #[must_use]
    pub fn new(orchestrator: ProbeOrchestrator) -> Self {
        Self {
            orchestrator,
            warnings: Arc::new(TracingWarnings),
        }
    }

    /// Build a service from configuration and an already filtered registry.
    #[must_use]
    pub fn from_config(config: &AppConfig, registry: ProviderRegistry) -> Self {
        let orchestrator =
            ProbeOrchestrator::new(registry, Arc::new(HttpContextFactory::new(config.http.clone())))
                .with_deadline(config.scan.run_deadline_secs.map(Duration::from_secs));
        Self::new(orchestrator)
    }

    /// Send warnings somewhere else.
    #[must_use]
    pub fn with_warning_sink(mut self, warnings: Arc<dyn WarningSink>) -> Self {
        self.warnings = warnings;
        self
    }

    /// The registry this service probes.
    #[must_use]
    pub fn registry(&self) -> &ProviderRegistry {
        self.orchestrator.registry()
    }

    /// Accounts confirmed for `email`.
    pub async fn lookup(&self, email: &str) -> Vec<AccountRecord> {
        self.lookup_report(email).await.accounts
    }

    /// Full report for `email`, including inconclusive providers.
    pub async fn lookup_report(&self, email: &str) -> LookupReport {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let started = Instant::now();
        let span = tracing::info_span!("lookup", %run_id);

        let outcome = AssertUnwindSafe(self.orchestrator.run_all(email))
            .catch_unwind()
            .instrument(span)
            .await;

        let mut report = LookupReport {
            run_id,
            email: email.to_string(),
            started_at,
            elapsed_ms: 0,
            providers_checked: 0,
            accounts: Vec::new(),
            inconclusive: Vec::new(),
            error: None,
        };

        match outcome {
            Ok(Ok(batch)) => {
                report.providers_checked = batch.len();
                report.accounts = aggregate(&batch);
                report.inconclusive = batch.inconclusive();
            }
            Ok(Err(e)) => {
                tracing::error!(%run_id, error = %e, "lookup failed");
                report.error = Some(e.to_string());
            }
            Err(payload) => {
                let e = ScanError::OrchestrationPanicked(panic_message(payload.as_ref()));
                tracing::error!(%run_id, error = %e, "lookup failed");
                report.error = Some(e.to_string());
            }
        }

        report.elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        if !report.is_complete() {
            self.warnings.warn(&report.incomplete_warning());
        }

        tracing::info!(
            %run_id,
            accounts = report.accounts.len(),
            inconclusive = report.inconclusive.len(),
            "lookup finished"
        );

        report
    }

    /// Look up several emails one after another.
    ///
    /// A failed lookup never stops the batch. Reports are returned together
    /// at the end; callers that print each report as soon as it is ready
    /// (the `scout` binary does) loop over [`Self::lookup_report`] instead.
    pub async fn lookup_many<I, S>(&self, emails: I) -> Vec<LookupReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut reports = Vec::new();
        for email in emails {
            reports.push(self.lookup_report(email.as_ref()).await);
        }
        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(inconclusive: Vec<ProviderId>, error: Option<String>) -> LookupReport {
        LookupReport {
            run_id: Uuid::new_v4(),
            email: "a@b.com".to_string(),
            started_at: Utc::now(),
            elapsed_ms: 12,
            providers_checked: 3,
            accounts: Vec::new(),
            inconclusive,
            error,
        }
    }

    #[test]
    fn test_report_completeness() {
        assert!(report(Vec::new(), None).is_complete());

        let id = ProviderId::new("p3").expect("valid provider ID");
        assert!(!report(vec![id], None).is_complete());
        assert!(!report(Vec::new(), Some("boom".to_string())).is_complete());
    }

    #[test]
    fn test_incomplete_warning_text() {
        let id = ProviderId::new("p3").expect("valid provider ID");
        let message = report(vec![id], None).incomplete_warning();
        assert_eq!(
            message,
            "results for a@b.com may be incomplete: 1 of 3 providers were rate limited or failed"
        );

        let message = report(Vec::new(), Some("no client".to_string())).incomplete_warning();
        assert_eq!(message, "results for a@b.com may be incomplete: no client");
    }

    #[test]
    fn test_report_serializes_to_json() {
        let json = serde_json::to_value(report(Vec::new(), None)).expect("serialize report");
        assert_eq!(json["email"], "a@b.com");
        assert_eq!(json["providers_checked"], 3);
        assert!(json["accounts"].as_array().is_some_and(Vec::is_empty));
    }
}
