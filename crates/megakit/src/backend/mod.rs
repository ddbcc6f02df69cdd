//! Backend traits and implementations for the megaverse API.
//!
//! This module provides the [`Backend`] trait and implementations for
//! different transports. The primary implementation is
//! [`http::HttpBackend`], which talks to the Crossmint challenge API.
//!
//! # Testing
//!
//! Use [`MockBackend`] for testing without network access:
//!
//! ```
//! use megakit::{Backend, Entity, GoalGrid, MockBackend, Position};
//!
//! let mock = MockBackend::new();
//! mock.set_goal(GoalGrid::new(vec![vec!["POLYANET".to_string()]]));
//!
//! mock.place(&Entity::Polyanet, Position::new(0, 0)).unwrap();
//! assert_eq!(mock.calls().len(), 1);
//! ```

pub mod http;

use crate::error::{Error, Result};
use crate::types::{Entity, EntityKind, GoalGrid, Position};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Backend trait for megaverse API calls.
///
/// This abstraction separates the reconciliation logic from the wire
/// transport and enables testing. Each mutation is idempotent on the
/// remote side: creating the same entity twice or deleting an absent
/// one is not an error the caller needs to handle specially.
pub trait Backend: Send + Sync {
    /// Create an entity at a position.
    fn place(&self, entity: &Entity, pos: Position) -> Result<()>;

    /// Delete the entity of a category at a position.
    fn remove(&self, kind: EntityKind, pos: Position) -> Result<()>;

    /// Fetch the goal grid. Never cached; every call observes the
    /// server's current goal.
    fn fetch_goal(&self) -> Result<GoalGrid>;
}

/// A single recorded call against a [`MockBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// A create call
    Place {
        /// Entity category
        kind: EntityKind,
        /// Target coordinate
        pos: Position,
        /// Color or direction, if the kind has one
        attribute: Option<String>,
    },
    /// A delete call
    Remove {
        /// Entity category
        kind: EntityKind,
        /// Target coordinate
        pos: Position,
    },
    /// A goal-grid fetch
    FetchGoal,
}

/// Mock backend for testing without network access.
///
/// Records every call in invocation order and serves a scripted goal
/// grid. Mutation failures can be scripted by queueing errors; each
/// queued error fails exactly one place/remove call, in order.
#[derive(Clone, Default)]
pub struct MockBackend {
    goal: Arc<Mutex<Option<GoalGrid>>>,
    calls: Arc<Mutex<Vec<Call>>>,
    failures: Arc<Mutex<VecDeque<Error>>>,
}

impl MockBackend {
    /// Create a new empty mock backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the goal grid served by [`Backend::fetch_goal`].
    pub fn set_goal(&self, goal: GoalGrid) {
        *self.goal.lock().unwrap() = Some(goal);
    }

    /// Queue an error; the next place/remove call consumes and returns it.
    pub fn push_failure(&self, error: Error) {
        self.failures.lock().unwrap().push_back(error);
    }

    /// All calls recorded so far, in invocation order.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Forget all recorded calls.
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn next_failure(&self) -> Option<Error> {
        self.failures.lock().unwrap().pop_front()
    }
}

impl Backend for MockBackend {
    fn place(&self, entity: &Entity, pos: Position) -> Result<()> {
        self.calls.lock().unwrap().push(Call::Place {
            kind: entity.kind(),
            pos,
            attribute: entity.attribute().map(str::to_string),
        });
        match self.next_failure() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn remove(&self, kind: EntityKind, pos: Position) -> Result<()> {
        self.calls.lock().unwrap().push(Call::Remove { kind, pos });
        match self.next_failure() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn fetch_goal(&self) -> Result<GoalGrid> {
        self.calls.lock().unwrap().push(Call::FetchGoal);
        self.goal
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Error::Network {
                message: "mock backend has no goal grid configured".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_backend_records_calls() {
        let mock = MockBackend::new();
        mock.place(
            &Entity::Soloon {
                color: "blue".to_string(),
            },
            Position::new(1, 2),
        )
        .unwrap();
        mock.remove(EntityKind::Polyanet, Position::new(0, 0)).unwrap();

        assert_eq!(
            mock.calls(),
            vec![
                Call::Place {
                    kind: EntityKind::Soloon,
                    pos: Position::new(1, 2),
                    attribute: Some("blue".to_string()),
                },
                Call::Remove {
                    kind: EntityKind::Polyanet,
                    pos: Position::new(0, 0),
                },
            ]
        );
    }

    #[test]
    fn test_mock_backend_goal() {
        let mock = MockBackend::new();
        assert!(mock.fetch_goal().is_err());

        mock.set_goal(GoalGrid::new(vec![vec!["SPACE".to_string()]]));
        let goal = mock.fetch_goal().unwrap();
        assert_eq!(goal.row_count(), 1);
    }

    #[test]
    fn test_mock_backend_scripted_failures() {
        let mock = MockBackend::new();
        mock.push_failure(Error::RateLimited);

        let first = mock.place(&Entity::Polyanet, Position::new(0, 0));
        assert!(matches!(first, Err(Error::RateLimited)));

        // Queue drained, next call succeeds
        let second = mock.place(&Entity::Polyanet, Position::new(0, 0));
        assert!(second.is_ok());
    }

    #[test]
    fn test_mock_backend_clear_calls() {
        let mock = MockBackend::new();
        mock.place(&Entity::Polyanet, Position::new(0, 0)).unwrap();
        mock.clear_calls();
        assert!(mock.calls().is_empty());
    }
}
