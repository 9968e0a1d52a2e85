//! Read-only audit of cached vote counters and store reachability.
//!
//! Reconciliation never writes. Drift is reported, logged at `warn`, and left
//! for an operator to repair.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::ports::{ReviewRepository, StoreCollection, StoreProbe};
use crate::domain::service_support::{map_probe_error, map_review_error};
use crate::domain::{Error, ReconciliationReport, Review, ReviewId, reconcile_tally};

/// Result of reconciling every stored review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditSummary {
    /// Number of reviews reconciled.
    pub reviews_checked: usize,
    /// Number of reviews whose counters disagree with their vote rows.
    pub mismatched: usize,
    /// Per-review reports, ordered by review id.
    pub reports: Vec<ReconciliationReport>,
}

impl AuditSummary {
    /// Whether every review's counters match its vote rows.
    pub const fn is_consistent(&self) -> bool {
        self.mismatched == 0
    }

    /// Reports whose counters disagree.
    pub fn mismatched_reports(&self) -> impl Iterator<Item = &ReconciliationReport> {
        self.reports.iter().filter(|report| !report.is_consistent())
    }
}

/// Probe outcome for one collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionProbe {
    /// Probed collection.
    pub collection: StoreCollection,
    /// Row count when the collection was readable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u64>,
    /// Failure when it was not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Error>,
}

/// Reachability of every store collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeReport {
    /// One entry per collection, in [`StoreCollection::ALL`] order.
    pub collections: Vec<CollectionProbe>,
}

impl ProbeReport {
    /// Whether every collection answered.
    pub fn all_reachable(&self) -> bool {
        self.collections.iter().all(|probe| probe.error.is_none())
    }
}

/// Service reconciling tallies and probing the store.
#[derive(Clone)]
pub struct TallyAuditService<R, P> {
    review_repo: Arc<R>,
    probe: Arc<P>,
}

impl<R, P> TallyAuditService<R, P> {
    /// Create a new audit service.
    pub fn new(review_repo: Arc<R>, probe: Arc<P>) -> Self {
        Self { review_repo, probe }
    }
}

impl<R, P> TallyAuditService<R, P>
where
    R: ReviewRepository,
    P: StoreProbe,
{
    /// Reconcile one review against its vote rows.
    pub async fn audit_review(&self, review_id: ReviewId) -> Result<ReconciliationReport, Error> {
        let review = self
            .review_repo
            .fetch_review(review_id)
            .await
            .map_err(map_review_error)?
            .ok_or_else(|| Error::not_found(format!("review {review_id} does not exist")))?;
        self.reconcile(&review).await
    }

    /// Reconcile every stored review.
    pub async fn audit_all(&self) -> Result<AuditSummary, Error> {
        let mut reviews = self
            .review_repo
            .list_reviews()
            .await
            .map_err(map_review_error)?;
        reviews.sort_by_key(Review::id);
        info!(reviews = reviews.len(), "reconciling review tallies");

        let mut reports = Vec::with_capacity(reviews.len());
        for review in &reviews {
            reports.push(self.reconcile(review).await?);
        }
        let mismatched = reports
            .iter()
            .filter(|report| !report.is_consistent())
            .count();
        info!(
            reviews_checked = reports.len(),
            mismatched, "tally reconciliation finished"
        );
        Ok(AuditSummary {
            reviews_checked: reports.len(),
            mismatched,
            reports,
        })
    }

    /// Count the rows of every collection, recording failures per collection.
    pub async fn probe_store(&self) -> ProbeReport {
        let mut collections = Vec::with_capacity(StoreCollection::ALL.len());
        for collection in StoreCollection::ALL {
            let entry = match self.probe.probe(collection).await {
                Ok(rows) => {
                    info!(%collection, rows, "collection reachable");
                    CollectionProbe {
                        collection,
                        rows: Some(rows),
                        error: None,
                    }
                }
                Err(error) => {
                    warn!(%collection, %error, "collection probe failed");
                    CollectionProbe {
                        collection,
                        rows: None,
                        error: Some(map_probe_error(error)),
                    }
                }
            };
            collections.push(entry);
        }
        ProbeReport { collections }
    }

    async fn reconcile(&self, review: &Review) -> Result<ReconciliationReport, Error> {
        let votes = self
            .review_repo
            .fetch_votes_for_review(review.id())
            .await
            .map_err(map_review_error)?;
        let report = reconcile_tally(review, &votes);
        if !report.is_consistent() {
            warn!(
                review_id = %report.review_id,
                stored = %report.stored,
                recomputed = %report.recomputed,
                "tally mismatch"
            );
        }
        if !report.duplicate_voters.is_empty() {
            warn!(
                review_id = %report.review_id,
                duplicates = report.duplicate_voters.len(),
                "voters with more than one vote row"
            );
        }
        Ok(report)
    }
}

#[cfg(test)]
#[path = "tally_audit_service_tests.rs"]
mod tests;
