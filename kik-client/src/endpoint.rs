//! Kik bot API endpoints.

use http::Method;
use std::borrow::Cow;

/// A Kik bot API operation.
///
/// Each variant fixes the HTTP method and the path relative to the base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// `GET v1/user/{username}`
    User(&'a str),
    /// `POST v1/message`
    SendMessage,
    /// `POST v1/broadcast`
    Broadcast,
    /// `GET v1/config`
    GetConfig,
    /// `POST v1/config`
    SetConfig,
    /// `POST v1/code`
    CreateCode,
}

impl Endpoint<'_> {
    /// HTTP method for this endpoint.
    pub fn method(&self) -> Method {
        match self {
            Self::User(_) | Self::GetConfig => Method::GET,
            Self::SendMessage | Self::Broadcast | Self::SetConfig | Self::CreateCode => {
                Method::POST
            }
        }
    }

    /// Path relative to the base URL. The username is inserted verbatim.
    pub fn path(&self) -> Cow<'static, str> {
        match self {
            Self::User(username) => Cow::Owned(format!("v1/user/{}", username)),
            Self::SendMessage => Cow::Borrowed("v1/message"),
            Self::Broadcast => Cow::Borrowed("v1/broadcast"),
            Self::GetConfig | Self::SetConfig => Cow::Borrowed("v1/config"),
            Self::CreateCode => Cow::Borrowed("v1/code"),
        }
    }
}
