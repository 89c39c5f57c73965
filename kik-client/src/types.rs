//! Kik bot API records.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A user's profile as returned by `v1/user/{username}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    /// Kik username.
    pub username: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Profile picture URL, if the user has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_pic_url: Option<String>,
    /// Profile picture modification time in milliseconds since the epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_pic_last_modified: Option<i64>,
    /// IANA timezone name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// Bot configuration stored at `v1/config`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// URL that receives incoming messages.
    pub webhook: String,
    /// Feature toggles.
    #[serde(default)]
    pub features: Features,
    /// Keyboard shown when a user has no bot-supplied keyboard.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_keyboard: Option<Keyboard>,
}

/// Bot feature toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Features {
    pub manually_send_read_receipts: bool,
    pub receive_read_receipts: bool,
    pub receive_delivery_receipts: bool,
    pub receive_is_typing: bool,
}

/// Message kinds understood by the API.
///
/// Serialized as the kebab-case wire name, e.g. `"scan-data"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MessageType {
    Text,
    Link,
    Picture,
    Video,
    Sticker,
    StartChatting,
    ScanData,
    FriendPicker,
    IsTyping,
    DeliveryReceipt,
    ReadReceipt,
    /// A type this client does not know about, holding the wire name as received.
    Unknown(String),
}

impl MessageType {
    /// Wire name of the type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Link => "link",
            Self::Picture => "picture",
            Self::Video => "video",
            Self::Sticker => "sticker",
            Self::StartChatting => "start-chatting",
            Self::ScanData => "scan-data",
            Self::FriendPicker => "friend-picker",
            Self::IsTyping => "is-typing",
            Self::DeliveryReceipt => "delivery-receipt",
            Self::ReadReceipt => "read-receipt",
            Self::Unknown(name) => name,
        }
    }
}

impl From<&str> for MessageType {
    fn from(name: &str) -> Self {
        match name {
            "text" => Self::Text,
            "link" => Self::Link,
            "picture" => Self::Picture,
            "video" => Self::Video,
            "sticker" => Self::Sticker,
            "start-chatting" => Self::StartChatting,
            "scan-data" => Self::ScanData,
            "friend-picker" => Self::FriendPicker,
            "is-typing" => Self::IsTyping,
            "delivery-receipt" => Self::DeliveryReceipt,
            "read-receipt" => Self::ReadReceipt,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MessageType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MessageType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from(name.as_str()))
    }
}

/// A message sent to or received from Kik.
///
/// Only the fields relevant to the message's type are populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "type")]
    pub kind: MessageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub participants: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pic_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticker_url: Option<String>,
    /// Payload of a `scan-data` message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_typing: Option<bool>,
    /// Message ids acknowledged by a receipt.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub message_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_receipt_requested: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mention: Option<String>,
    /// Delivery delay in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<u64>,
    /// Time in milliseconds the typing indicator is shown before delivery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keyboards: Vec<Keyboard>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<Attribution>,
    /// Extra key/value data attached to link messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Option<serde_json::Value>,
}

impl Message {
    /// Create an empty message of the given type.
    pub fn new(kind: MessageType) -> Self {
        Self {
            kind,
            id: None,
            to: None,
            from: None,
            chat_id: None,
            participants: Vec::new(),
            body: None,
            pic_url: None,
            video_url: None,
            url: None,
            sticker_url: None,
            data: None,
            is_typing: None,
            message_ids: Vec::new(),
            timestamp: None,
            read_receipt_requested: None,
            mention: None,
            delay: None,
            type_time: None,
            keyboards: Vec::new(),
            attribution: None,
            extras: None,
        }
    }

    /// Create a text message addressed to a user in a chat.
    pub fn text(
        to: impl Into<String>,
        chat_id: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        let mut message = Self::new(MessageType::Text);
        message.to = Some(to.into());
        message.chat_id = Some(chat_id.into());
        message.body = Some(body.into());
        message
    }

    /// Create a typing indicator.
    pub fn is_typing(to: impl Into<String>, chat_id: impl Into<String>, typing: bool) -> Self {
        let mut message = Self::new(MessageType::IsTyping);
        message.to = Some(to.into());
        message.chat_id = Some(chat_id.into());
        message.is_typing = Some(typing);
        message
    }

    /// Create a read receipt for the given message ids.
    pub fn read_receipt(
        to: impl Into<String>,
        chat_id: impl Into<String>,
        message_ids: Vec<String>,
    ) -> Self {
        let mut message = Self::new(MessageType::ReadReceipt);
        message.to = Some(to.into());
        message.chat_id = Some(chat_id.into());
        message.message_ids = message_ids;
        message
    }

    /// Attach a keyboard.
    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboards.push(keyboard);
        self
    }

    /// Set the delivery delay in milliseconds.
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay = Some(delay_ms);
        self
    }
}

/// Envelope used by `v1/message`, `v1/broadcast` and incoming webhooks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Messages {
    pub messages: Vec<Message>,
}

/// A keyboard offered to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyboard {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(default)]
    pub responses: Vec<KeyboardResponse>,
}

impl Keyboard {
    /// Create a suggested-response keyboard of text replies.
    pub fn suggested<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: "suggested".to_string(),
            to: None,
            hidden: None,
            responses: responses.into_iter().map(KeyboardResponse::text).collect(),
        }
    }
}

/// A single keyboard entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyboardResponse {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl KeyboardResponse {
    /// Create a text response.
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            body: Some(body.into()),
        }
    }
}

/// Custom attribution displayed with a media message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribution {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

/// Request body for `v1/code`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanData {
    /// Data delivered back in a `scan-data` message when the code is scanned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

/// A Kik code created by `v1/code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Code {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_message_wire_format() {
        let message = Message::text("alice", "chat-1", "hi");
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({"type": "text", "to": "alice", "chatId": "chat-1", "body": "hi"})
        );
    }

    #[test]
    fn test_empty_envelope() {
        let envelope = Messages::default();
        assert_eq!(serde_json::to_string(&envelope).unwrap(), r#"{"messages":[]}"#);
    }

    #[test]
    fn test_incoming_message_tolerates_unknown_fields() {
        let raw = json!({
            "type": "start-chatting",
            "from": "alice",
            "chatId": "chat-1",
            "participants": ["alice"],
            "timestamp": 1439576628405i64,
            "readReceiptRequested": false,
            "metadata": {"ignored": true}
        });
        let message: Message = serde_json::from_value(raw).unwrap();
        assert_eq!(message.kind, MessageType::StartChatting);
        assert_eq!(message.from.as_deref(), Some("alice"));
        assert_eq!(message.participants, vec!["alice".to_string()]);
    }

    #[test]
    fn test_unknown_message_type_keeps_wire_name() {
        let message: Message = serde_json::from_value(json!({"type": "hologram"})).unwrap();
        assert_eq!(message.kind, MessageType::Unknown("hologram".to_string()));
        assert_eq!(serde_json::to_value(&message).unwrap(), json!({"type": "hologram"}));
    }

    #[test]
    fn test_message_type_wire_names() {
        for (kind, name) in [
            (MessageType::StartChatting, "start-chatting"),
            (MessageType::ScanData, "scan-data"),
            (MessageType::DeliveryReceipt, "delivery-receipt"),
        ] {
            assert_eq!(serde_json::to_value(&kind).unwrap(), json!(name));
            assert_eq!(serde_json::from_value::<MessageType>(json!(name)).unwrap(), kind);
        }
        assert_eq!(MessageType::IsTyping.to_string(), "is-typing");
    }

    #[test]
    fn test_configuration_round_trip_shape() {
        let config = Configuration {
            webhook: "https://bot.example/incoming".to_string(),
            features: Features {
                receive_read_receipts: true,
                ..Features::default()
            },
            static_keyboard: Some(Keyboard::suggested(["help", "start"])),
        };

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["features"]["receiveReadReceipts"], json!(true));
        assert_eq!(value["features"]["manuallySendReadReceipts"], json!(false));
        assert_eq!(value["staticKeyboard"]["responses"][1]["body"], json!("start"));
    }

    #[test]
    fn test_user_partial_profile() {
        let user: User = serde_json::from_str(r#"{"firstName":"Alice"}"#).unwrap();
        assert_eq!(user.first_name, "Alice");
        assert!(user.username.is_empty());
        assert!(user.profile_pic_url.is_none());
    }
}
