//! HTTP backend for the Crossmint megaverse challenge API.
//!
//! Creates are POSTs and deletes are DELETEs against per-category
//! endpoints; the goal grid is a GET. The candidate id travels in every
//! request body and in the goal URL. A 429 response surfaces as
//! [`Error::RateLimited`](crate::Error::RateLimited) so callers can
//! retry; other rejections are final.

use crate::backend::Backend;
use crate::error::Result;
use crate::types::{Entity, EntityKind, GoalGrid, Position};
use serde::{Deserialize, Serialize};

/// Base URL of the Crossmint megaverse challenge API.
pub const DEFAULT_BASE_URL: &str = "https://challenge.crossmint.io/api";

/// HTTP backend for the megaverse API.
///
/// Holds its configuration explicitly; there is no process-wide state.
///
/// # Example
///
/// ```no_run
/// use megakit::{Backend, HttpBackend};
///
/// let backend = HttpBackend::new("my-candidate-id");
/// let goal = backend.fetch_goal().unwrap();
/// println!("goal map is {}x{}", goal.row_count(), goal.column_count());
/// ```
pub struct HttpBackend {
    /// HTTP agent for requests.
    agent: ureq::Agent,
    /// API base URL.
    base_url: String,
    /// Candidate id sent with every call.
    candidate_id: String,
}

impl HttpBackend {
    /// Create a backend against the default challenge API.
    #[must_use]
    pub fn new(candidate_id: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, candidate_id)
    }

    /// Create a backend with a custom API base (for testing or mirrors).
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>, candidate_id: impl Into<String>) -> Self {
        let agent = ureq::Agent::new_with_defaults();
        Self {
            agent,
            base_url: base_url.into(),
            candidate_id: candidate_id.into(),
        }
    }

    /// Get the current API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the mutation URL for an entity category.
    fn entity_url(&self, kind: EntityKind) -> String {
        format!("{}/{}", self.base_url, kind.endpoint())
    }

    /// Build the goal-grid URL for this candidate.
    fn goal_url(&self) -> String {
        format!("{}/map/{}/goal", self.base_url, self.candidate_id)
    }

    fn mutation_body<'a>(&'a self, kind: EntityKind, pos: Position, attribute: Option<&'a str>) -> MutationBody<'a> {
        MutationBody {
            row: pos.row,
            column: pos.column,
            candidate_id: &self.candidate_id,
            color: match kind {
                EntityKind::Soloon => attribute,
                _ => None,
            },
            direction: match kind {
                EntityKind::Cometh => attribute,
                _ => None,
            },
        }
    }
}

impl Backend for HttpBackend {
    fn place(&self, entity: &Entity, pos: Position) -> Result<()> {
        let kind = entity.kind();
        let url = self.entity_url(kind);
        let body = self.mutation_body(kind, pos, entity.attribute());

        log::debug!("POST {} row={} column={}", url, pos.row, pos.column);
        self.agent.post(&url).send_json(&body)?;
        Ok(())
    }

    fn remove(&self, kind: EntityKind, pos: Position) -> Result<()> {
        let url = self.entity_url(kind);
        let body = self.mutation_body(kind, pos, None);

        log::debug!("DELETE {} row={} column={}", url, pos.row, pos.column);
        self.agent.delete(&url).force_send_body().send_json(&body)?;
        Ok(())
    }

    fn fetch_goal(&self) -> Result<GoalGrid> {
        let url = self.goal_url();

        log::debug!("GET {}", url);
        let response: GoalResponse = self.agent.get(&url).call()?.body_mut().read_json()?;
        Ok(response.goal)
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MutationBody<'a> {
    row: usize,
    column: usize,
    candidate_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    direction: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct GoalResponse {
    goal: GoalGrid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_url() {
        let backend = HttpBackend::new("cand-1");
        assert_eq!(
            backend.entity_url(EntityKind::Polyanet),
            "https://challenge.crossmint.io/api/polyanets"
        );
        assert_eq!(
            backend.entity_url(EntityKind::Soloon),
            "https://challenge.crossmint.io/api/soloons"
        );
        assert_eq!(
            backend.entity_url(EntityKind::Cometh),
            "https://challenge.crossmint.io/api/comeths"
        );
    }

    #[test]
    fn test_goal_url() {
        let backend = HttpBackend::new("cand-1");
        assert_eq!(
            backend.goal_url(),
            "https://challenge.crossmint.io/api/map/cand-1/goal"
        );
    }

    #[test]
    fn test_custom_base_url() {
        let backend = HttpBackend::with_base_url("https://staging.example.com", "cand-1");
        assert_eq!(backend.base_url(), "https://staging.example.com");
        assert_eq!(
            backend.entity_url(EntityKind::Polyanet),
            "https://staging.example.com/polyanets"
        );
    }

    #[test]
    fn test_polyanet_body_has_no_attribute() {
        let backend = HttpBackend::new("cand-1");
        let body = backend.mutation_body(EntityKind::Polyanet, Position::new(2, 3), None);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"row": 2, "column": 3, "candidateId": "cand-1"})
        );
    }

    #[test]
    fn test_soloon_body_carries_color() {
        let backend = HttpBackend::new("cand-1");
        let body = backend.mutation_body(EntityKind::Soloon, Position::new(1, 1), Some("blue"));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"row": 1, "column": 1, "candidateId": "cand-1", "color": "blue"})
        );
    }

    #[test]
    fn test_cometh_body_carries_direction() {
        let backend = HttpBackend::new("cand-1");
        let body = backend.mutation_body(EntityKind::Cometh, Position::new(0, 4), Some("right"));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"row": 0, "column": 4, "candidateId": "cand-1", "direction": "right"})
        );
    }

    #[test]
    fn test_delete_body_has_no_attribute() {
        let backend = HttpBackend::new("cand-1");
        let body = backend.mutation_body(EntityKind::Soloon, Position::new(1, 1), None);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"row": 1, "column": 1, "candidateId": "cand-1"})
        );
    }

    #[test]
    fn test_goal_response_decoding() {
        let payload = r#"{"goal": [["SPACE", "POLYANET"], ["RED_SOLOON", "SPACE"]]}"#;
        let response: GoalResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(response.goal.row_count(), 2);
        assert_eq!(response.goal.get(1, 0), Some("RED_SOLOON"));
    }
}
