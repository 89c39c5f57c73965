//! # Kik Client
//!
//! Client for the [Kik bot API](https://dev.kik.com/#/docs/messaging): user
//! lookup, message sending and broadcasting, bot configuration, Kik codes,
//! and verification of incoming webhook signatures.
//!
//! ## Features
//!
//! - **Authenticated requests**: every call carries HTTP Basic Auth built from
//!   the bot username and API key
//! - **Typed errors**: transport, status, encode and decode failures are
//!   distinct [`KikError`] variants
//! - **Pluggable transport**: requests go through the [`Transport`] trait, with a
//!   reqwest implementation used by default
//! - **Webhook signatures**: HMAC-SHA1 verification with constant-time comparison
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kik_client::{KikClient, KikConfig, Message};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = KikConfig::new("https://api.kik.com/", "mybot", "api-key")?;
//!     let client = KikClient::new(config)?;
//!
//!     let user = client.get_user("alice").await?;
//!     println!("Hello {}", user.first_name);
//!
//!     client
//!         .send_messages(&[Message::text("alice", "chat-id", "Hi there!")])
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Verifying Webhooks
//!
//! ```rust
//! use kik_client::signature::{compute_signature, verify_signature};
//!
//! let body = br#"{"messages":[]}"#;
//! let header = compute_signature(body, "api-key");
//! assert!(verify_signature(&header, body, "api-key"));
//! ```

mod client;
mod config;
mod endpoint;
mod error;
mod request;
mod response;
pub mod signature;
mod transport;
mod types;

pub use client::KikClient;
pub use config::{DEFAULT_BASE_URL, KikConfig, KikConfigBuilder, env};
pub use endpoint::Endpoint;
pub use error::{BoxError, KikError, Result};
pub use request::OutboundRequest;
pub use response::RawResponse;
pub use transport::{ReqwestTransport, Transport};
pub use types::{
    Attribution, Code, Configuration, Features, Keyboard, KeyboardResponse, Message,
    MessageType, Messages, ScanData, User,
};

// Re-export common types
pub use bytes::Bytes;
pub use http::{HeaderMap, Method, StatusCode};

/// Prelude for common imports.
///
/// ```
/// use kik_client::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::KikClient;
    pub use crate::config::KikConfig;
    pub use crate::error::{KikError, Result};
    pub use crate::signature::verify_signature;
    pub use crate::transport::Transport;
    pub use crate::types::{Code, Configuration, Message, MessageType, ScanData, User};
}
