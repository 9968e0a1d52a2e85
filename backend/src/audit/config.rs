//! Audit configuration loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_STORE_FILE: &str = "wingrate-store.json";

/// Configuration for a tally audit run.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "WINGRATE_AUDIT")]
pub struct AuditSettings {
    /// Store snapshot to audit.
    pub store_path: Option<PathBuf>,
    /// Rating registry override; the built-in registry is used when absent.
    pub rating_descriptions_path: Option<PathBuf>,
    /// Exit unsuccessfully when any review's counters disagree.
    #[ortho_config(default = false)]
    pub fail_on_mismatch: bool,
    /// Skip the per-collection reachability probe.
    #[ortho_config(default = false)]
    pub skip_probe: bool,
}

impl AuditSettings {
    /// Return the configured snapshot path, falling back to
    /// `wingrate-store.json` in the working directory.
    pub fn store_path(&self) -> PathBuf {
        self.store_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE))
    }
}
