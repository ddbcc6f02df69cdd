//! Core types for megaverse map reconciliation.

use serde::Deserialize;
use std::time::Duration;

/// A goal-map coordinate, origin (0, 0) at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Row index (top to bottom)
    pub row: usize,
    /// Column index (left to right)
    pub column: usize,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// The three remote entity categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A polyanet (no attribute)
    Polyanet,
    /// A soloon (color attribute)
    Soloon,
    /// A cometh (direction attribute)
    Cometh,
}

impl EntityKind {
    /// Get the REST endpoint path segment for this entity kind.
    #[must_use]
    pub fn endpoint(&self) -> &'static str {
        match self {
            EntityKind::Polyanet => "polyanets",
            EntityKind::Soloon => "soloons",
            EntityKind::Cometh => "comeths",
        }
    }

    /// Get the display name for this entity kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Polyanet => "polyanet",
            EntityKind::Soloon => "soloon",
            EntityKind::Cometh => "cometh",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A classified goal-map cell: an entity category plus its required
/// attribute, if any. Attributes are stored lower-cased, the form the
/// megaverse API expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    /// A polyanet
    Polyanet,
    /// A soloon with its color (e.g. "blue")
    Soloon {
        /// Soloon color, lower-cased
        color: String,
    },
    /// A cometh with its direction (e.g. "right")
    Cometh {
        /// Cometh direction, lower-cased
        direction: String,
    },
}

impl Entity {
    /// Get the category of this entity.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Polyanet => EntityKind::Polyanet,
            Entity::Soloon { .. } => EntityKind::Soloon,
            Entity::Cometh { .. } => EntityKind::Cometh,
        }
    }

    /// Get the attribute value (color or direction), if this kind has one.
    #[must_use]
    pub fn attribute(&self) -> Option<&str> {
        match self {
            Entity::Polyanet => None,
            Entity::Soloon { color } => Some(color),
            Entity::Cometh { direction } => Some(direction),
        }
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.attribute() {
            Some(attr) => write!(f, "{} {}", attr, self.kind()),
            None => write!(f, "{}", self.kind()),
        }
    }
}

/// The server-declared target layout of entities per coordinate.
///
/// Immutable once fetched; each reconciliation operation fetches a
/// fresh copy. Dimensions are always derived from the fetched payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct GoalGrid {
    rows: Vec<Vec<String>>,
}

impl GoalGrid {
    /// Create a grid from rows of cell labels.
    #[must_use]
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns, derived from the first row.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Whether the grid has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows of cell labels.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Get the label at a position, if in range.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }
}

/// Configuration for retry logic.
///
/// The defaults match the megaverse service's observed behavior: up to
/// 5 attempts with a 1 second base delay doubling after every
/// rate-limited attempt. The delay cap is a hardening addition; the
/// service itself imposes none.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the first)
    pub max_attempts: u32,
    /// Base delay the backoff schedule grows from
    pub base_delay: Duration,
    /// Multiplier for exponential backoff
    pub backoff_factor: f64,
    /// Maximum delay between attempts
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(1),
            backoff_factor: 2.0,
            max_delay: Duration::from_secs(60),
        }
    }
}

impl RetryConfig {
    /// Create a new retry config with custom settings.
    #[must_use]
    pub fn new(max_attempts: u32, base_delay: Duration, backoff_factor: f64) -> Self {
        Self {
            max_attempts,
            base_delay,
            backoff_factor,
            max_delay: Duration::from_secs(60),
        }
    }

    /// Calculate the delay applied after `failures` rate-limited attempts.
    ///
    /// The schedule is `base * factor^failures`, capped at `max_delay`:
    /// with the defaults the waits are 2s, 4s, 8s, 16s, so the wait
    /// before the 4th attempt is 8x the base.
    #[must_use]
    pub fn delay_for_attempt(&self, failures: u32) -> Duration {
        let delay = self.base_delay.as_secs_f64() * self.backoff_factor.powi(failures as i32);
        let capped = delay.min(self.max_delay.as_secs_f64());
        Duration::from_secs_f64(capped)
    }

    /// Create a config that never retries.
    #[must_use]
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }
}

/// Result of a reconciliation pass over the goal map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Entities successfully created
    pub created: usize,
    /// Entities successfully deleted
    pub deleted: usize,
    /// Cells skipped because they hold no entity (`SPACE`)
    pub skipped: usize,
    /// Cells whose mutation or classification failed
    pub failed: Vec<(Position, String)>,
}

impl ReconcileReport {
    /// Check if every visited cell was handled without failure.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Total number of cells visited.
    #[must_use]
    pub fn total(&self) -> usize {
        self.created + self.deleted + self.skipped + self.failed.len()
    }
}
