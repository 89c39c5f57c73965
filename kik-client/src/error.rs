//! Kik client error types.

use bytes::Bytes;
use thiserror::Error;

/// Result type for Kik client operations.
pub type Result<T> = std::result::Result<T, KikError>;

/// Boxed error produced by a [`Transport`](crate::Transport).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Kik client errors.
///
/// Every operation either succeeds or returns exactly one of these.
#[derive(Debug, Error)]
pub enum KikError {
    /// Client configuration is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Request payload could not be serialized. The request was never sent.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The transport failed before a response was received.
    #[error("Transport error: {0}")]
    Transport(#[source] BoxError),

    /// The API answered with a non-2xx status.
    #[error("Kik API returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: Bytes,
    },

    /// Response body did not match the expected JSON shape.
    #[error("Failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl KikError {
    /// Get the HTTP status code if this is a status error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get the raw response body if this is a status error.
    pub fn body(&self) -> Option<&Bytes> {
        match self {
            Self::Status { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Check if the request failed at the transport layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if the API rejected the request (4xx).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Status { status, .. } if (400..500).contains(status))
    }
}

impl From<reqwest::Error> for KikError {
    fn from(err: reqwest::Error) -> Self {
        KikError::Transport(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessors() {
        let err = KikError::Status {
            status: 404,
            body: Bytes::from_static(b"not found"),
        };
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.body().map(|b| b.as_ref()), Some(&b"not found"[..]));
        assert!(err.is_client_error());
        assert!(!err.is_transport());
    }

    #[test]
    fn test_server_error_is_not_client_error() {
        let err = KikError::Status {
            status: 503,
            body: Bytes::new(),
        };
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_config_error_display() {
        let err = KikError::Config("missing slash".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: missing slash");
        assert_eq!(err.status_code(), None);
    }
}
