//! # megakit
//!
//! Pure Rust client library for the Crossmint megaverse challenge.
//!
//! This crate provides functionality for:
//! - Fetching the goal map and classifying its cell labels
//! - Creating and deleting polyanets, soloons and comeths
//! - Reconciling the remote map against the goal (build and reset)
//! - Surviving the service's rate limiting with exponential backoff
//!
//! ## Example
//!
//! ```no_run
//! use megakit::{Client, MapBuilder};
//!
//! // Create a client with your candidate id
//! let client = Client::new("my-candidate-id");
//!
//! // Reconcile the whole map against the goal
//! let report = MapBuilder::new(&client).build(None).expect("build failed");
//! println!(
//!     "created {} entities, skipped {} cells, {} failures",
//!     report.created,
//!     report.skipped,
//!     report.failed.len()
//! );
//! ```
//!
//! ## Retry Logic
//!
//! The megaverse service answers HTTP 429 when called too quickly.
//! Every create/delete call is retried on rate limits with exponential
//! backoff; any other failure is final. Configure retry behavior with
//! [`RetryConfig`].
//!
//! ```no_run
//! use megakit::{Client, RetryConfig};
//! use std::time::Duration;
//!
//! let client = Client::new("my-candidate-id")
//!     .retry_config(RetryConfig::new(3, Duration::from_millis(500), 2.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod builder;
pub mod classify;
pub mod client;
pub mod error;
pub mod retry;
pub mod types;

pub use backend::http::{DEFAULT_BASE_URL, HttpBackend};
pub use backend::{Backend, Call, MockBackend};
pub use builder::{CellCallback, CellOutcome, MapBuilder};
pub use classify::classify;
pub use client::Client;
pub use error::{Error, ErrorCategory, Result};
pub use retry::{LogCallback, NoCallback, RetryCallback, with_retry};
pub use types::{
    Entity, EntityKind, GoalGrid, Position, ReconcileReport, RetryConfig,
};
