//! Per-cell progress reporting for reconciliation runs.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use megakit::{CellCallback, CellOutcome, Position};

/// Progress bar over goal-map cells, fed by the engine's cell callback.
pub struct CellProgress {
    bar: ProgressBar,
    verbose: bool,
}

impl CellProgress {
    pub fn new(quiet: bool, verbose: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::no_length()
        };
        bar.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} cells")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self { bar, verbose }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl CellCallback for CellProgress {
    fn on_start(&self, total_cells: usize) {
        self.bar.set_length(total_cells as u64);
    }

    fn on_cell(&self, pos: Position, outcome: &CellOutcome) {
        match outcome {
            CellOutcome::Created(kind) => {
                if self.verbose {
                    self.bar
                        .println(format!("{} created {} at {}", "✓".green(), kind, pos));
                }
            }
            CellOutcome::Deleted(kind) => {
                if self.verbose {
                    self.bar
                        .println(format!("{} deleted {} at {}", "✓".green(), kind, pos));
                }
            }
            CellOutcome::Skipped => {}
            CellOutcome::Failed(message) => {
                self.bar
                    .println(format!("{} cell {}: {}", "✗".red(), pos, message));
            }
        }
        self.bar.inc(1);
    }
}
