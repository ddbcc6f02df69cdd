//! Map reconciliation engine.
//!
//! Converts the server-declared goal grid into a sequence of create
//! (build) or delete (reset) calls. The walk is sequential, row by row
//! and column by column, with one call in flight at a time; the
//! megaverse service rate-limits aggressively and a concurrent fan-out
//! would only multiply 429 responses.
//!
//! Per-cell failures are contained: an unknown label or a failed
//! mutation is recorded in the report and the walk continues. Only two
//! conditions abort an invocation before any cell is processed: the
//! goal grid cannot be fetched, or the requested row is out of range.

use crate::classify::classify;
use crate::client::Client;
use crate::error::{Error, Result};
use crate::types::{Entity, EntityKind, Position, ReconcileReport};
use std::ops::Range;

/// Outcome of a single goal-map cell, as seen by a [`CellCallback`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellOutcome {
    /// An entity was created at the cell
    Created(EntityKind),
    /// An entity was deleted at the cell
    Deleted(EntityKind),
    /// The cell is `SPACE`; no call was issued
    Skipped,
    /// Classification or the remote mutation failed
    Failed(String),
}

/// Callback trait for per-cell progress notifications.
///
/// Status lines are an observability concern; the engine's contract is
/// the returned [`ReconcileReport`].
pub trait CellCallback {
    /// Called once per invocation before the first cell, with the
    /// number of cells that will be visited.
    fn on_start(&self, _total_cells: usize) {}

    /// Called after each cell resolves.
    fn on_cell(&self, pos: Position, outcome: &CellOutcome);
}

/// Whether a reconciliation pass creates or deletes entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Build,
    Reset,
}

/// Reconciles the megaverse map against its goal grid.
///
/// # Example
///
/// ```no_run
/// use megakit::{Client, MapBuilder};
///
/// let client = Client::new("my-candidate-id");
/// let builder = MapBuilder::new(&client);
///
/// // Create every goal-map entity
/// let report = builder.build(None).unwrap();
/// println!("created {}, failed {}", report.created, report.failed.len());
///
/// // Tear down a single row
/// builder.reset(Some(2)).unwrap();
/// ```
pub struct MapBuilder<'a> {
    client: &'a Client,
    callback: Option<&'a dyn CellCallback>,
}

impl<'a> MapBuilder<'a> {
    /// Create a builder over a gateway client.
    #[must_use]
    pub fn new(client: &'a Client) -> Self {
        Self {
            client,
            callback: None,
        }
    }

    /// Attach a per-cell progress callback.
    #[must_use]
    pub fn callback(mut self, callback: &'a dyn CellCallback) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Create every entity the goal grid declares, or only those in
    /// `target_row` if given.
    pub fn build(&self, target_row: Option<usize>) -> Result<ReconcileReport> {
        self.run(Action::Build, target_row)
    }

    /// Delete every entity the goal grid declares, or only those in
    /// `target_row` if given.
    pub fn reset(&self, target_row: Option<usize>) -> Result<ReconcileReport> {
        self.run(Action::Reset, target_row)
    }

    fn run(&self, action: Action, target_row: Option<usize>) -> Result<ReconcileReport> {
        // One fetch per invocation; the walk below never re-reads
        let goal = self.client.goal_map()?;
        if goal.is_empty() {
            return Err(Error::EmptyGoal);
        }

        let rows: Range<usize> = match target_row {
            Some(row) if row >= goal.row_count() => {
                return Err(Error::RowOutOfRange {
                    row,
                    rows: goal.row_count(),
                });
            }
            Some(row) => row..row + 1,
            None => 0..goal.row_count(),
        };

        if let Some(cb) = self.callback {
            let total = rows.clone().map(|r| goal.rows()[r].len()).sum();
            cb.on_start(total);
        }

        let mut report = ReconcileReport::default();
        for row in rows {
            for (column, label) in goal.rows()[row].iter().enumerate() {
                let pos = Position::new(row, column);
                let outcome = self.apply_cell(action, label, pos, &mut report);
                if let Some(cb) = self.callback {
                    cb.on_cell(pos, &outcome);
                }
            }
        }

        Ok(report)
    }

    fn apply_cell(
        &self,
        action: Action,
        label: &str,
        pos: Position,
        report: &mut ReconcileReport,
    ) -> CellOutcome {
        let entity = match classify(label) {
            Ok(Some(entity)) => entity,
            Ok(None) => {
                report.skipped += 1;
                return CellOutcome::Skipped;
            }
            Err(e) => {
                log::warn!("skipping cell {}: {}", pos, e);
                let message = e.to_string();
                report.failed.push((pos, message.clone()));
                return CellOutcome::Failed(message);
            }
        };

        let kind = entity.kind();
        let result = match action {
            Action::Build => match &entity {
                Entity::Polyanet => self.client.create_polyanet(pos),
                Entity::Soloon { color } => self.client.create_soloon(pos, color),
                Entity::Cometh { direction } => self.client.create_cometh(pos, direction),
            },
            Action::Reset => match kind {
                EntityKind::Polyanet => self.client.delete_polyanet(pos),
                EntityKind::Soloon => self.client.delete_soloon(pos),
                EntityKind::Cometh => self.client.delete_cometh(pos),
            },
        };

        match (result, action) {
            (Ok(()), Action::Build) => {
                log::info!("created {} at {}", entity, pos);
                report.created += 1;
                CellOutcome::Created(kind)
            }
            (Ok(()), Action::Reset) => {
                log::info!("deleted {} at {}", kind, pos);
                report.deleted += 1;
                CellOutcome::Deleted(kind)
            }
            (Err(e), _) => {
                log::warn!("cell {} failed: {}", pos, e);
                let message = e.to_string();
                report.failed.push((pos, message.clone()));
                CellOutcome::Failed(message)
            }
        }
    }
}
