//! Periodic clustering recompute across every owner.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::domain::id::OwnerId;
use crate::error::Result;
use crate::port::inbound::recommend::{ClusterRecompute, RecommendationOperator};
use crate::port::outbound::feed::{ProductCatalog, TransactionFeed};
use crate::port::outbound::store::RecommendationStore;

use super::service::RecommendationService;

/// Tally of one batch pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchReport {
    #[must_use]
    pub const fn owners(&self) -> usize {
        self.succeeded + self.skipped + self.failed
    }
}

type RequestFn = dyn Fn(OwnerId) -> ClusterRecompute + Send + Sync;

/// Runs the clustering recompute for all owners, one after another.
///
/// A failing owner is logged and counted; the pass continues.
pub struct BatchJob<F, C, S> {
    service: Arc<RecommendationService<F, C, S>>,
    request_for: Box<RequestFn>,
}

impl<F, C, S> BatchJob<F, C, S>
where
    F: TransactionFeed,
    C: ProductCatalog,
    S: RecommendationStore,
{
    /// Create a job that builds each owner's request with `request_for`.
    pub fn new(
        service: Arc<RecommendationService<F, C, S>>,
        request_for: impl Fn(OwnerId) -> ClusterRecompute + Send + Sync + 'static,
    ) -> Self {
        Self {
            service,
            request_for: Box::new(request_for),
        }
    }

    /// Run one pass over every owner.
    ///
    /// # Errors
    /// Returns an error only if the owner list cannot be read.
    pub async fn run_once(&self) -> Result<BatchReport> {
        let owners = self.service.owners().await?;
        info!(owners = owners.len(), "Batch recompute started");

        let mut report = BatchReport::default();
        for owner in owners {
            let request = (self.request_for)(owner);
            match self.service.recompute_clusters(&request).await {
                Ok(outcome) if outcome.reason.is_some() => report.skipped += 1,
                Ok(_) => report.succeeded += 1,
                Err(e) => {
                    error!(owner = %owner, error = %e, "Batch recompute failed for owner");
                    report.failed += 1;
                }
            }
        }

        info!(
            succeeded = report.succeeded,
            skipped = report.skipped,
            failed = report.failed,
            "Batch recompute finished"
        );
        Ok(report)
    }

    /// Run a pass immediately and then every `interval` until `shutdown`
    /// turns true or its sender is dropped.
    pub async fn run_every(&self, interval: Duration, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                result = shutdown.changed() => {
                    match result {
                        Ok(()) => {
                            if *shutdown.borrow() {
                                info!("Shutdown signal received");
                                break;
                            }
                        }
                        Err(_) => {
                            info!("Shutdown channel closed");
                            break;
                        }
                    }
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.run_once().await {
                        warn!(error = %e, "Batch pass aborted");
                    }
                }
            }
        }
    }
}
