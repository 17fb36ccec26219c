//! Unified error handling for the console library.

use std::fmt;

use thiserror::Error;
use xomo_admin_core::ResourceId;

/// Errors from the REST API boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body failed to parse.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Authentication/authorization failed (401/403).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found (404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success response.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response parsed but was not one of the shapes the backend sends.
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// Field patch with no route bound for the field.
    #[error("No patch route for field: {0}")]
    UnsupportedPatch(String),
}

/// Which remote operation an [`OperationError`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Remove,
    Patch,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load => write!(f, "load"),
            Self::Remove => write!(f, "remove"),
            Self::Patch => write!(f, "patch"),
        }
    }
}

/// Error kind, as surfaced to the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The list fetch failed; the view shows an empty-with-retry state.
    LoadFailure,
    /// A delete or patch failed; the collection is exactly as before.
    MutationFailure,
    /// Reserved for create/update form submission.
    ValidationFailure,
}

/// Structured failure delivered to the caller of a controller operation.
///
/// Remote failures never cross the controller boundary as panics or
/// unhandled rejections; they become one of these.
#[derive(Debug, Clone, Error)]
#[error("{operation} failed: {message}")]
pub struct OperationError {
    pub kind: ErrorKind,
    pub operation: Operation,
    /// The resource the mutation addressed, if any.
    pub id: Option<ResourceId>,
    pub message: String,
}

impl OperationError {
    /// A list-fetch failure.
    #[must_use]
    pub const fn load(message: String) -> Self {
        Self {
            kind: ErrorKind::LoadFailure,
            operation: Operation::Load,
            id: None,
            message,
        }
    }

    /// A delete or field-patch failure for one resource.
    #[must_use]
    pub const fn mutation(operation: Operation, id: ResourceId, message: String) -> Self {
        Self {
            kind: ErrorKind::MutationFailure,
            operation,
            id: Some(id),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_error_display() {
        let err = OperationError::load("connection refused".to_string());
        assert_eq!(err.to_string(), "load failed: connection refused");

        let err = OperationError::mutation(
            Operation::Remove,
            ResourceId::Int(7),
            "server error".to_string(),
        );
        assert_eq!(err.to_string(), "remove failed: server error");
        assert_eq!(err.kind, ErrorKind::MutationFailure);
        assert_eq!(err.id, Some(ResourceId::Int(7)));
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Api {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert_eq!(err.to_string(), "API error (500): Internal Server Error");

        let err = ApiError::UnsupportedPatch("active".to_string());
        assert_eq!(err.to_string(), "No patch route for field: active");
    }
}
