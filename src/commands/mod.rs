pub mod build;
pub mod goal;
pub mod reset;

use crate::config::Config;
use crate::ui;
use anyhow::{Result, bail};
use megakit::{Client, LogCallback, ReconcileReport};

/// Create a gateway client from the resolved configuration.
///
/// Retries surface as log warnings so `-v` shows the backoff activity.
fn make_client(config: &Config) -> Client {
    Client::with_base_url(&config.base_url, &config.candidate_id).retry_callback(LogCallback)
}

/// Print the end-of-run summary and turn cell failures into a non-zero exit.
fn summarize(report: &ReconcileReport, verb: &str, mutated: usize) -> Result<()> {
    println!();
    if report.is_success() {
        ui::success(&format!(
            "{} {} entities ({} cells skipped)",
            verb, mutated, report.skipped
        ));
        return Ok(());
    }

    for (pos, message) in &report.failed {
        ui::error(&format!("cell {pos}: {message}"));
    }
    ui::warn(&format!(
        "{} {} entities, but {} of {} cells failed",
        verb,
        mutated,
        report.failed.len(),
        report.total()
    ));
    bail!("{} cells failed", report.failed.len())
}
