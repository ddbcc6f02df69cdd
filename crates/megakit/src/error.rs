//! Error types for megaverse operations.
//!
//! Errors are categorized to enable retry logic and appropriate user
//! feedback. The megaverse service signals rate limiting with HTTP 429;
//! that is the only transient condition worth retrying. Everything else
//! (validation errors, server errors, transport failures) fails the
//! current call immediately.

use thiserror::Error;

/// Result type alias for megaverse operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Categories of megaverse errors for retry logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The service rejected the call with "too many requests" (transient, retryable).
    RateLimited,
    /// The service rejected the call for any other reason.
    Api,
    /// Transport-level failure (DNS, connect, timeout).
    Network,
    /// A goal-map label could not be classified.
    Classification,
    /// The request itself was invalid (out-of-range row, empty goal).
    InvalidRequest,
    /// Missing or unusable configuration.
    Config,
    /// Other/unknown errors.
    Other,
}

impl ErrorCategory {
    /// Whether this error category is transient and worth retrying.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited)
    }

    /// Get a user-friendly description of this error category.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::RateLimited => "Rate limited by the megaverse service",
            Self::Api => "Megaverse API rejected the request",
            Self::Network => "Network connectivity issue",
            Self::Classification => "Unknown goal-map entity",
            Self::InvalidRequest => "Invalid request",
            Self::Config => "Missing configuration",
            Self::Other => "Unexpected error",
        }
    }

    /// Get actionable advice for resolving this error category.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::RateLimited => "Wait a moment and try again, or lower the call rate",
            Self::Api => "Check the request arguments and the candidate id",
            Self::Network => "Check your internet connection and try again",
            Self::Classification => "The goal map contains a label this client does not know",
            Self::InvalidRequest => "Check the row index against the goal map dimensions",
            Self::Config => "Set CM_CANDIDATE_ID or pass --candidate-id",
            Self::Other => "Check the error details for more information",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Errors that can occur during megaverse operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The service answered HTTP 429.
    #[error("rate limited by the megaverse service")]
    RateLimited,

    /// The service answered with any other non-success status.
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code of the rejected call
        status: u16,
        /// Description of the rejection
        message: String,
    },

    /// Transport-level failure before a status was received.
    #[error("network error: {message}")]
    Network {
        /// Detailed error message from the failed network operation
        message: String,
    },

    /// A goal-map cell label does not name a known entity.
    #[error("unknown entity type: {label}")]
    UnknownEntity {
        /// The unrecognized label
        label: String,
    },

    /// A requested row index is outside the goal map.
    #[error("row {row} is out of range (goal map has {rows} rows)")]
    RowOutOfRange {
        /// The requested row index
        row: usize,
        /// Number of rows in the fetched goal map
        rows: usize,
    },

    /// The fetched goal map has no rows.
    #[error("goal map is empty")]
    EmptyGoal,

    /// No candidate id was supplied.
    #[error("no candidate id configured")]
    MissingCandidateId,

    /// The goal payload could not be decoded.
    #[error("invalid goal payload: {0}")]
    Json(#[from] serde_json::Error),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Get the error category for retry logic.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::RateLimited => ErrorCategory::RateLimited,
            Error::Api { .. } => ErrorCategory::Api,
            Error::Network { .. } | Error::Json(_) => ErrorCategory::Network,
            Error::UnknownEntity { .. } => ErrorCategory::Classification,
            Error::RowOutOfRange { .. } | Error::EmptyGoal => ErrorCategory::InvalidRequest,
            Error::MissingCandidateId => ErrorCategory::Config,
            Error::Other(_) => ErrorCategory::Other,
        }
    }

    /// Whether this error is transient and worth retrying.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }
}

impl From<ureq::Error> for Error {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::StatusCode(429) => Error::RateLimited,
            ureq::Error::StatusCode(status) => Error::Api {
                status,
                message: "megaverse API rejected the request".to_string(),
            },
            other => Error::Network {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_retryable() {
        assert!(ErrorCategory::RateLimited.is_retryable());
        assert!(!ErrorCategory::Api.is_retryable());
        assert!(!ErrorCategory::Network.is_retryable());
        assert!(!ErrorCategory::Classification.is_retryable());
    }

    #[test]
    fn test_rate_limit_from_status() {
        let err: Error = ureq::Error::StatusCode(429).into();
        assert_eq!(err.category(), ErrorCategory::RateLimited);
        assert!(err.is_retryable());
    }

    #[test]
    fn test_other_status_is_api_error() {
        let err: Error = ureq::Error::StatusCode(400).into();
        assert_eq!(err.category(), ErrorCategory::Api);
        assert!(!err.is_retryable());

        let err: Error = ureq::Error::StatusCode(500).into();
        assert_eq!(err.category(), ErrorCategory::Api);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_unknown_entity_display() {
        let err = Error::UnknownEntity {
            label: "GLORB".to_string(),
        };
        assert_eq!(err.to_string(), "unknown entity type: GLORB");
        assert_eq!(err.category(), ErrorCategory::Classification);
    }

    #[test]
    fn test_row_out_of_range_display() {
        let err = Error::RowOutOfRange { row: 5, rows: 3 };
        assert_eq!(err.to_string(), "row 5 is out of range (goal map has 3 rows)");
        assert!(!err.is_retryable());
    }
}
