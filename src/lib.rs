// Kik - client library for the Kik bot API
//
// Authenticated requests to the bot API, typed records for its payloads, and
// verification of the webhooks Kik delivers to the bot.

// Re-export the client
pub use kik_client::*;

// Re-export optional crates
#[cfg(feature = "webhooks")]
pub use kik_webhooks;

#[cfg(feature = "webhooks")]
pub use kik_webhooks::{MessageHandler, WebhookError, WebhookReceiver};

// Prelude for common imports
pub mod prelude {
    pub use kik_client::prelude::*;

    #[cfg(feature = "webhooks")]
    pub use kik_webhooks::WebhookReceiver;
}
