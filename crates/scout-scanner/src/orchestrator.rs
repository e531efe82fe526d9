//! Probe orchestrator for fanning one email out to every provider.
//!
//! This module provides the `ProbeOrchestrator` which acquires the shared
//! HTTP context, spawns one task per registered provider, waits for all of
//! them and freezes their results into a [`ProbeBatch`].

use crate::batch::{ProbeBatch, ProbeSink};
use crate::context::ContextFactory;
use crate::error::Result;
use crate::runner::ProbeRunner;
use futures::stream::{FuturesUnordered, StreamExt};
use scout_registry::{ProviderDescriptor, ProviderRegistry, RawProbeResult};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// Orchestrates one probe run across all registered providers.
pub struct ProbeOrchestrator {
    /// Providers to probe
    registry: ProviderRegistry,
    /// Source of the shared HTTP context
    contexts: Arc<dyn ContextFactory>,
    /// Optional overall deadline for a run
    deadline: Option<Duration>,
}

impl ProbeOrchestrator {
    /// Create a new orchestrator without a run deadline.
    #[must_use]
    pub fn new(registry: ProviderRegistry, contexts: Arc<dyn ContextFactory>) -> Self {
        Self {
            registry,
            contexts,
            deadline: None,
        }
    }

    /// Set the overall deadline for a run.
    ///
    /// Probes still running at the deadline are aborted and reported as
    /// inconclusive.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// The registry this orchestrator probes.
    #[must_use]
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Probe every registered provider for `email`.
    ///
    /// Returns exactly one result per registered provider, whatever the
    /// probes do. The shared context is dropped before returning.
    ///
    /// # Errors
    /// Returns error only if the shared context cannot be acquired.
    pub async fn run_all(&self, email: &str) -> Result<ProbeBatch> {
        let ctx = self.contexts.acquire()?;
        let providers = self.registry.list_providers();
        let started = Instant::now();

        tracing::debug!(providers = providers.len(), "starting probe run");

        let sink = ProbeSink::with_capacity(providers.len());
        let mut tasks = FuturesUnordered::new();
        let mut aborts = Vec::with_capacity(providers.len());

        for descriptor in &providers {
            let descriptor = Arc::clone(descriptor);
            let email = email.to_string();
            let ctx = ctx.clone();
            let sink = sink.clone();

            let handle = tokio::spawn(async move {
                let result = ProbeRunner::run(&descriptor, &email, &ctx).await;
                sink.push(result);
            });

            aborts.push(handle.abort_handle());
            tasks.push(handle);
        }

        let finished = match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, drain(&mut tasks))
                .await
                .is_ok(),
            None => {
                drain(&mut tasks).await;
                true
            }
        };

        if !finished {
            tracing::warn!(
                pending = tasks.len(),
                deadline = ?self.deadline,
                "run deadline reached, aborting outstanding probes"
            );
            for abort in &aborts {
                abort.abort();
            }
            drain(&mut tasks).await;
        }

        drop(ctx);

        fill_missing(&sink, &providers);
        let batch = sink.freeze(email);

        tracing::info!(
            results = batch.len(),
            inconclusive = batch.inconclusive().len(),
            elapsed = ?started.elapsed(),
            "probe run finished"
        );

        Ok(batch)
    }
}

/// Wait for every task, logging tasks that died without pushing a result.
async fn drain(tasks: &mut FuturesUnordered<JoinHandle<()>>) {
    while let Some(joined) = tasks.next().await {
        if let Err(e) = joined {
            if e.is_panic() {
                tracing::warn!(error = %e, "probe task panicked outside the runner");
            } else {
                tracing::debug!(error = %e, "probe task cancelled");
            }
        }
    }
}

/// Push an inconclusive result for every provider that has none.
fn fill_missing(sink: &ProbeSink, providers: &[Arc<ProviderDescriptor>]) {
    let present = sink.provider_ids();

    for descriptor in providers {
        if !present.contains(descriptor.id()) {
            tracing::debug!(
                provider_id = %descriptor.id(),
                "no result recorded, marking inconclusive"
            );
            sink.push(RawProbeResult::inconclusive(descriptor));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::HttpContextFactory;
    use scout_core::{Existence, ProviderId};
    use scout_registry::{probe_fn, ProbeReport};

    fn registry(ids: &[&str]) -> ProviderRegistry {
        ProviderRegistry::builder()
            .register_all(ids.iter().map(|id| {
                ProviderDescriptor::new(
                    ProviderId::new(*id).expect("valid provider ID"),
                    format!("{id}.com"),
                    probe_fn(|_email, _ctx| async { Ok(ProbeReport::not_found()) }),
                )
            }))
            .build()
            .expect("build registry")
    }

    #[tokio::test]
    async fn test_run_all_one_result_per_provider() {
        let orchestrator = ProbeOrchestrator::new(
            registry(&["p1", "p2", "p3"]),
            Arc::new(HttpContextFactory::default()),
        );

        let batch = orchestrator.run_all("a@b.com").await.expect("run succeeds");
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.email(), "a@b.com");
        assert!(batch.results().iter().all(|r| r.exists == Existence::Absent));
    }

    #[test]
    fn test_with_deadline() {
        let orchestrator =
            ProbeOrchestrator::new(registry(&["p1"]), Arc::new(HttpContextFactory::default()))
                .with_deadline(Some(Duration::from_secs(5)));
        assert_eq!(orchestrator.deadline, Some(Duration::from_secs(5)));
        assert_eq!(orchestrator.registry().count(), 1);
    }
}
