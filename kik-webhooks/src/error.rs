//! Error types for webhook handling

use thiserror::Error;

/// Errors that can occur while receiving a webhook
#[derive(Error, Debug)]
pub enum WebhookError {
    /// Signature header missing from request
    #[error("Signature missing from request")]
    SignatureMissing,

    /// Body does not match the signature
    #[error("Signature verification failed")]
    SignatureInvalid,

    /// Delivery addressed to a different bot
    #[error("Webhook addressed to {received:?}, expected {expected}")]
    UsernameMismatch {
        expected: String,
        received: Option<String>,
    },

    /// Body is not a valid message envelope
    #[error("Payload error: {0}")]
    PayloadError(#[from] serde_json::Error),

    /// A message handler rejected a message
    #[error("Handler error: {0}")]
    HandlerError(String),
}

/// Result type for webhook operations
pub type Result<T> = std::result::Result<T, WebhookError>;
