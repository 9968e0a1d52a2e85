//! Wiring for the `tally-audit` tool.

mod config;
mod startup;

pub use config::AuditSettings;
pub use startup::{AuditError, AuditRun, run_audit};
