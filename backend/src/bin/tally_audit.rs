//! Reconcile cached vote counters in a store snapshot against its vote rows.
//!
//! Settings come from `WINGRATE_AUDIT_*` environment variables and matching
//! command-line flags. The run summary is printed to stdout as JSON; logs go
//! to stderr.
//!
//! # Examples
//! ```sh
//! cargo run --bin tally-audit -- --store-path data/store.json --fail-on-mismatch
//! ```
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io::{self, Write};
use std::process::ExitCode;

use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use wingrate::audit::{AuditSettings, run_audit};

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(%error, "tracing init failed");
    }

    let settings = AuditSettings::load().wrap_err("failed to load audit settings")?;
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build audit runtime")?;
    let run = runtime
        .block_on(run_audit(&settings))
        .wrap_err("tally audit did not complete")?;

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &run).wrap_err("failed to write audit summary")?;
    writeln!(stdout).wrap_err("failed to write audit summary")?;

    if settings.fail_on_mismatch && !run.is_clean() {
        info!(
            mismatched = run.summary.mismatched,
            "exiting unsuccessfully on mismatch"
        );
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
