//! Incoming webhooks for Kik bots
//!
//! Kik delivers messages to a bot's webhook as a JSON envelope signed with the
//! bot's API key. This crate verifies the signature, optionally checks the
//! delivery is addressed to the expected bot, and parses the messages.
//!
//! # Example
//!
//! ```rust
//! use kik_webhooks::WebhookReceiver;
//! use kik_client::signature::compute_signature;
//!
//! let receiver = WebhookReceiver::new("your-api-key");
//!
//! let body = br#"{"messages":[{"type":"text","from":"alice","chatId":"c1","body":"hi"}]}"#;
//! let signature_header = compute_signature(body, "your-api-key");
//!
//! let messages = receiver.receive(body, &signature_header).unwrap();
//! assert_eq!(messages[0].body.as_deref(), Some("hi"));
//! ```

mod error;
mod receiver;

pub use error::{Result, WebhookError};
pub use kik_client::signature::headers;
pub use receiver::{MessageHandler, WebhookReceiver};
