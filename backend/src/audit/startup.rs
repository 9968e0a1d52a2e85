//! Audit run orchestration.

use std::path::PathBuf;
use std::sync::Arc;

use rating_descriptions::{RatingDescriptions, RegistryError};
use serde::Serialize;
use tracing::{info, warn};

use crate::audit::config::AuditSettings;
use crate::domain::{AuditSummary, Error, ProbeReport, TallyAuditService};
use crate::outbound::memory::{InMemoryStore, SnapshotError};

/// Errors that stop an audit run before a summary is produced.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// The rating registry override could not be loaded.
    #[error("rating descriptions error: {0}")]
    Descriptions(#[from] RegistryError),
    /// The store snapshot could not be loaded.
    #[error("store snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
    /// Reconciliation could not read the store.
    #[error("tally audit failed: {0}")]
    Audit(#[from] Error),
}

/// Everything one audit run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditRun {
    /// Audited snapshot.
    pub store_path: PathBuf,
    /// Version of the rating registry records were validated against.
    pub rating_descriptions_version: u32,
    /// Collection reachability, unless skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe: Option<ProbeReport>,
    /// Reconciliation results.
    pub summary: AuditSummary,
}

impl AuditRun {
    /// Whether the run found nothing to report: every probed collection
    /// answered and every tally matched.
    pub fn is_clean(&self) -> bool {
        self.summary.is_consistent()
            && self.probe.as_ref().is_none_or(ProbeReport::all_reachable)
    }
}

/// Load the configured snapshot and reconcile every review.
///
/// # Examples
///
/// ```rust,no_run
/// use wingrate::audit::{AuditSettings, run_audit};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = AuditSettings {
///     store_path: Some("wingrate-store.json".into()),
///     rating_descriptions_path: None,
///     fail_on_mismatch: true,
///     skip_probe: false,
/// };
/// let run = run_audit(&settings).await?;
/// println!("{} reviews checked", run.summary.reviews_checked);
/// # Ok(())
/// # }
/// ```
pub async fn run_audit(settings: &AuditSettings) -> Result<AuditRun, AuditError> {
    let descriptions = match &settings.rating_descriptions_path {
        Some(path) => RatingDescriptions::from_file(path)?,
        None => RatingDescriptions::builtin().clone(),
    };
    let store_path = settings.store_path();
    let store = Arc::new(InMemoryStore::load(&store_path, &descriptions)?);
    info!(path = %store_path.display(), "auditing store snapshot");

    let service = TallyAuditService::new(Arc::clone(&store), store);
    let probe = if settings.skip_probe {
        info!(reason = "disabled", "store probe skipped");
        None
    } else {
        Some(service.probe_store().await)
    };
    let summary = service.audit_all().await?;
    if !summary.is_consistent() {
        warn!(
            mismatched = summary.mismatched,
            reviews_checked = summary.reviews_checked,
            "tally drift detected"
        );
    }

    Ok(AuditRun {
        store_path,
        rating_descriptions_version: descriptions.version(),
        probe,
        summary,
    })
}
