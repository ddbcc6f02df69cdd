//! High-level gateway for megaverse entity operations.
//!
//! [`Client`] wraps a [`Backend`] and attaches the retry/backoff policy
//! to every mutation. The goal-grid read is a single attempt: a stale
//! or cached goal would be worse than a reported failure.

use crate::backend::Backend;
use crate::backend::http::HttpBackend;
use crate::error::Result;
use crate::retry::{RetryCallback, with_retry};
use crate::types::{Entity, EntityKind, GoalGrid, Position, RetryConfig};

/// Gateway to the megaverse API.
///
/// Exposes the six idempotent create/delete operations plus the
/// goal-grid read. Every create/delete call is retried on rate limits
/// per the configured [`RetryConfig`].
///
/// # Example
///
/// ```no_run
/// use megakit::{Client, Position};
///
/// let client = Client::new("my-candidate-id");
/// client.create_polyanet(Position::new(2, 2)).unwrap();
/// client.create_soloon(Position::new(2, 3), "blue").unwrap();
/// client.delete_polyanet(Position::new(2, 2)).unwrap();
/// ```
pub struct Client {
    backend: Box<dyn Backend>,
    retry: RetryConfig,
    retry_callback: Option<Box<dyn RetryCallback>>,
}

impl Client {
    /// Create a client against the default challenge API.
    #[must_use]
    pub fn new(candidate_id: impl Into<String>) -> Self {
        Self::with_backend(HttpBackend::new(candidate_id))
    }

    /// Create a client against a custom API base.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>, candidate_id: impl Into<String>) -> Self {
        Self::with_backend(HttpBackend::with_base_url(base_url, candidate_id))
    }

    /// Create a client over an arbitrary backend (for testing).
    #[must_use]
    pub fn with_backend(backend: impl Backend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            retry: RetryConfig::default(),
            retry_callback: None,
        }
    }

    /// Override the retry policy.
    #[must_use]
    pub fn retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Attach a callback notified before each retry.
    #[must_use]
    pub fn retry_callback(mut self, callback: impl RetryCallback + 'static) -> Self {
        self.retry_callback = Some(Box::new(callback));
        self
    }

    /// Create a polyanet.
    pub fn create_polyanet(&self, pos: Position) -> Result<()> {
        self.place(&Entity::Polyanet, pos)
    }

    /// Delete the polyanet at a position.
    pub fn delete_polyanet(&self, pos: Position) -> Result<()> {
        self.remove(EntityKind::Polyanet, pos)
    }

    /// Create a soloon with the given color.
    pub fn create_soloon(&self, pos: Position, color: &str) -> Result<()> {
        self.place(
            &Entity::Soloon {
                color: color.to_lowercase(),
            },
            pos,
        )
    }

    /// Delete the soloon at a position.
    pub fn delete_soloon(&self, pos: Position) -> Result<()> {
        self.remove(EntityKind::Soloon, pos)
    }

    /// Create a cometh with the given direction.
    pub fn create_cometh(&self, pos: Position, direction: &str) -> Result<()> {
        self.place(
            &Entity::Cometh {
                direction: direction.to_lowercase(),
            },
            pos,
        )
    }

    /// Delete the cometh at a position.
    pub fn delete_cometh(&self, pos: Position) -> Result<()> {
        self.remove(EntityKind::Cometh, pos)
    }

    /// Create an already-classified entity, retrying on rate limits.
    pub fn place(&self, entity: &Entity, pos: Position) -> Result<()> {
        with_retry(&self.retry, self.retry_callback.as_deref(), || {
            self.backend.place(entity, pos)
        })
    }

    /// Delete the entity of a category, retrying on rate limits.
    pub fn remove(&self, kind: EntityKind, pos: Position) -> Result<()> {
        with_retry(&self.retry, self.retry_callback.as_deref(), || {
            self.backend.remove(kind, pos)
        })
    }

    /// Fetch the goal grid. Single attempt, never cached.
    pub fn goal_map(&self) -> Result<GoalGrid> {
        self.backend.fetch_goal()
    }
}
