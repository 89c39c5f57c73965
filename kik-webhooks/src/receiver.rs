//! Webhook receiver for incoming Kik deliveries

use crate::{Result, WebhookError};
use http::HeaderMap;
use kik_client::signature::{self, headers};
use kik_client::{KikConfig, Message, MessageType, Messages};
use std::fmt;

/// Receiver for incoming webhooks
#[derive(Clone)]
pub struct WebhookReceiver {
    api_key: String,
    bot_username: Option<String>,
}

impl WebhookReceiver {
    /// Create a new receiver with the bot's API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            bot_username: None,
        }
    }

    /// Create a receiver that also checks deliveries are addressed to the configured bot
    pub fn from_config(config: &KikConfig) -> Self {
        Self::new(config.api_key()).with_bot_username(config.bot_username())
    }

    /// Require the `X-Kik-Username` header to match this bot
    pub fn with_bot_username(mut self, username: impl Into<String>) -> Self {
        self.bot_username = Some(username.into());
        self
    }

    /// Verify an incoming webhook signature
    pub fn verify(&self, payload: &[u8], signature: &str) -> bool {
        signature::verify_signature(signature, payload, &self.api_key)
    }

    /// Verify and parse an incoming webhook
    pub fn receive(&self, payload: &[u8], signature: &str) -> Result<Vec<Message>> {
        if !self.verify(payload, signature) {
            tracing::warn!("Rejected webhook with invalid signature");
            return Err(WebhookError::SignatureInvalid);
        }

        let envelope: Messages = serde_json::from_slice(payload)?;
        tracing::debug!(count = envelope.messages.len(), "Received webhook messages");
        Ok(envelope.messages)
    }

    /// Verify signature from HTTP headers
    ///
    /// A signature header that is not valid UTF-8 never matches.
    pub fn verify_from_headers(&self, payload: &[u8], headers: &HeaderMap) -> Result<bool> {
        let signature = headers
            .get(headers::SIGNATURE)
            .ok_or(WebhookError::SignatureMissing)?;

        Ok(signature
            .to_str()
            .map(|sig| self.verify(payload, sig))
            .unwrap_or(false))
    }

    /// Check the addressed bot, verify, and parse a webhook from headers and body
    pub fn receive_from_request(&self, payload: &[u8], headers: &HeaderMap) -> Result<Vec<Message>> {
        self.check_username(headers)?;

        if !self.verify_from_headers(payload, headers)? {
            tracing::warn!("Rejected webhook with invalid signature");
            return Err(WebhookError::SignatureInvalid);
        }

        Ok(serde_json::from_slice::<Messages>(payload)?.messages)
    }

    /// Create a handler for specific message types
    pub fn handler<F>(&self, types: &[MessageType], callback: F) -> MessageHandler<F>
    where
        F: Fn(Message) -> Result<()>,
    {
        MessageHandler {
            receiver: self.clone(),
            types: types.to_vec(),
            callback,
        }
    }

    fn check_username(&self, headers: &HeaderMap) -> Result<()> {
        let Some(expected) = &self.bot_username else {
            return Ok(());
        };

        let received = headers
            .get(headers::USERNAME)
            .and_then(|v| v.to_str().ok());

        match received {
            Some(name) if name.eq_ignore_ascii_case(expected) => Ok(()),
            _ => Err(WebhookError::UsernameMismatch {
                expected: expected.clone(),
                received: received.map(str::to_string),
            }),
        }
    }
}

impl fmt::Debug for WebhookReceiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookReceiver")
            .field("api_key", &"[REDACTED]")
            .field("bot_username", &self.bot_username)
            .finish()
    }
}

/// A webhook handler that dispatches messages of selected types
pub struct MessageHandler<F>
where
    F: Fn(Message) -> Result<()>,
{
    receiver: WebhookReceiver,
    types: Vec<MessageType>,
    callback: F,
}

impl<F> MessageHandler<F>
where
    F: Fn(Message) -> Result<()>,
{
    /// Handle an incoming webhook, returning how many messages were dispatched
    pub fn handle(&self, payload: &[u8], signature: &str) -> Result<usize> {
        let messages = self.receiver.receive(payload, signature)?;
        self.dispatch(messages)
    }

    /// Handle an incoming webhook using its HTTP headers
    pub fn handle_request(&self, payload: &[u8], headers: &HeaderMap) -> Result<usize> {
        let messages = self.receiver.receive_from_request(payload, headers)?;
        self.dispatch(messages)
    }

    fn dispatch(&self, messages: Vec<Message>) -> Result<usize> {
        let mut handled = 0;
        for message in messages {
            if self.matches(&message.kind) {
                (self.callback)(message)?;
                handled += 1;
            }
        }
        Ok(handled)
    }

    /// An empty type list matches everything
    fn matches(&self, kind: &MessageType) -> bool {
        self.types.is_empty() || self.types.contains(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use kik_client::signature::compute_signature;
    use std::cell::RefCell;

    const API_KEY: &str = "test-api-key";

    const BODY: &[u8] = br#"{"messages":[
        {"type":"text","from":"alice","chatId":"c1","body":"hi","id":"m1"},
        {"type":"is-typing","from":"alice","chatId":"c1","isTyping":true},
        {"type":"text","from":"bob","chatId":"c2","body":"yo","id":"m2"}
    ]}"#;

    fn signed_headers(body: &[u8], username: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            headers::SIGNATURE,
            HeaderValue::from_str(&compute_signature(body, API_KEY)).unwrap(),
        );
        headers.insert(headers::USERNAME, HeaderValue::from_str(username).unwrap());
        headers
    }

    #[test]
    fn test_verify_valid_signature() {
        let receiver = WebhookReceiver::new(API_KEY);
        assert!(receiver.verify(BODY, &compute_signature(BODY, API_KEY)));
    }

    #[test]
    fn test_verify_invalid_signature() {
        let receiver = WebhookReceiver::new(API_KEY);
        let signature = compute_signature(BODY, "wrong-key");
        assert!(!receiver.verify(BODY, &signature));
    }

    #[test]
    fn test_receive_and_parse() {
        let receiver = WebhookReceiver::new(API_KEY);
        let messages = receiver
            .receive(BODY, &compute_signature(BODY, API_KEY))
            .unwrap();

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].body.as_deref(), Some("hi"));
        assert_eq!(messages[1].kind, MessageType::IsTyping);
    }

    #[test]
    fn test_receive_rejects_bad_signature() {
        let receiver = WebhookReceiver::new(API_KEY);
        let result = receiver.receive(BODY, "deadbeef");
        assert!(matches!(result, Err(WebhookError::SignatureInvalid)));
    }

    #[test]
    fn test_receive_rejects_malformed_body() {
        let receiver = WebhookReceiver::new(API_KEY);
        let body = b"not json at all";
        let result = receiver.receive(body, &compute_signature(body, API_KEY));
        assert!(matches!(result, Err(WebhookError::PayloadError(_))));
    }

    #[test]
    fn test_verify_from_headers() {
        let receiver = WebhookReceiver::new(API_KEY);
        let headers = signed_headers(BODY, "mybot");
        assert!(receiver.verify_from_headers(BODY, &headers).unwrap());
        assert!(!receiver.verify_from_headers(b"tampered", &headers).unwrap());
    }

    #[test]
    fn test_verify_from_headers_missing_signature() {
        let receiver = WebhookReceiver::new(API_KEY);
        let result = receiver.verify_from_headers(BODY, &HeaderMap::new());
        assert!(matches!(result, Err(WebhookError::SignatureMissing)));
    }

    #[test]
    fn test_receive_from_request_checks_username() {
        let receiver = WebhookReceiver::new(API_KEY).with_bot_username("mybot");

        let messages = receiver
            .receive_from_request(BODY, &signed_headers(BODY, "MyBot"))
            .unwrap();
        assert_eq!(messages.len(), 3);

        let result = receiver.receive_from_request(BODY, &signed_headers(BODY, "otherbot"));
        match result {
            Err(WebhookError::UsernameMismatch { expected, received }) => {
                assert_eq!(expected, "mybot");
                assert_eq!(received.as_deref(), Some("otherbot"));
            }
            other => panic!("expected username mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_from_config() {
        let config = KikConfig::new("https://api.kik.com/", "mybot", API_KEY).unwrap();
        let receiver = WebhookReceiver::from_config(&config);

        let mut headers = signed_headers(BODY, "mybot");
        assert!(receiver.receive_from_request(BODY, &headers).is_ok());

        headers.remove(headers::USERNAME);
        assert!(matches!(
            receiver.receive_from_request(BODY, &headers),
            Err(WebhookError::UsernameMismatch { received: None, .. })
        ));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let receiver = WebhookReceiver::new(API_KEY);
        assert!(!format!("{:?}", receiver).contains(API_KEY));
    }

    #[test]
    fn test_handler_filters_types() {
        let receiver = WebhookReceiver::new(API_KEY);
        let seen = RefCell::new(Vec::new());

        let handler = receiver.handler(&[MessageType::Text], |message| {
            seen.borrow_mut().push(message.from.unwrap_or_default());
            Ok(())
        });

        let handled = handler
            .handle(BODY, &compute_signature(BODY, API_KEY))
            .unwrap();
        assert_eq!(handled, 2);
        assert_eq!(*seen.borrow(), vec!["alice".to_string(), "bob".to_string()]);
    }

    #[test]
    fn test_handler_without_filter_matches_all() {
        let receiver = WebhookReceiver::new(API_KEY).with_bot_username("mybot");
        let handler = receiver.handler(&[], |_| Ok(()));

        let handled = handler
            .handle_request(BODY, &signed_headers(BODY, "mybot"))
            .unwrap();
        assert_eq!(handled, 3);
    }

    #[test]
    fn test_handler_error_propagates() {
        let receiver = WebhookReceiver::new(API_KEY);
        let handler = receiver.handler(&[MessageType::IsTyping], |_| {
            Err(WebhookError::HandlerError("busy".to_string()))
        });

        let result = handler.handle(BODY, &compute_signature(BODY, API_KEY));
        assert!(matches!(result, Err(WebhookError::HandlerError(_))));
    }
}
