//! Error types for analyzer API operations.
//!
//! This module defines the custom error types used by the DAG client,
//! providing structured error handling with helpful messages.

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Custom error type for analyzer API operations.
///
/// This enum provides specific error variants for the failure modes
/// encountered when retrieving DAG data from the analyzer backend.
#[derive(Debug, Error)]
pub enum DagError {
    /// Network-related errors from HTTP requests.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx HTTP response from the backend.
    #[error("Server returned status {status}: {message}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// Body or reason phrase returned with the status.
        message: String,
    },

    /// JSON parsing or data structure errors.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of what failed to parse.
        message: String,
    },

    /// A required field was absent from an otherwise well-formed response.
    #[error("Invalid response format: missing field '{field}'")]
    MissingField {
        /// Name of the absent field.
        field: &'static str,
    },
}

impl DagError {
    /// Create a new status error from an HTTP status code and message.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Create a new parse error with the given message.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new missing-field error.
    #[must_use]
    pub const fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }
}

// ============================================================================
// Tests
// ============================================================================
