//! Authenticated Kik bot API client.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{
    Code, Configuration, Endpoint, KikConfig, KikError, Message, OutboundRequest, RawResponse,
    ReqwestTransport, Result, ScanData, Transport, User, signature,
};

/// Client for the Kik bot API.
///
/// Every request carries Basic Auth built from the configured bot username
/// and API key. Cloning is cheap; clones share configuration and transport.
#[derive(Clone)]
pub struct KikClient {
    config: Arc<KikConfig>,
    transport: Arc<dyn Transport>,
}

#[derive(Serialize)]
struct MessagesRef<'a> {
    messages: &'a [Message],
}

impl KikClient {
    /// Create a client using the default reqwest transport.
    pub fn new(config: KikConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client that sends requests through the given transport.
    pub fn with_transport(config: KikConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    /// Get the client configuration.
    pub fn config(&self) -> &KikConfig {
        &self.config
    }

    /// Start a request for an endpoint, without a body.
    pub fn request(&self, endpoint: &Endpoint<'_>) -> OutboundRequest {
        OutboundRequest::for_endpoint(self.config.base_url(), endpoint)
    }

    /// Send a request and decode the JSON response body.
    pub async fn execute<T: DeserializeOwned>(&self, request: OutboundRequest) -> Result<T> {
        self.dispatch(request).await?.json()
    }

    /// Send a request, dropping the response body once the status is known to be 2xx.
    pub async fn execute_discarding(&self, request: OutboundRequest) -> Result<()> {
        self.dispatch(request).await.map(drop)
    }

    /// Attach credentials, send, and check the status.
    async fn dispatch(&self, request: OutboundRequest) -> Result<RawResponse> {
        let request = request.basic_auth(self.config.bot_username(), self.config.api_key())?;
        let method = request.method().clone();
        let url = request.url().to_string();

        let response = self.transport.send(request).await.map_err(|error| {
            warn!(%method, %url, %error, "Kik API request failed");
            KikError::Transport(error)
        })?;

        debug!(%method, %url, status = %response.status(), "Kik API request completed");
        if !response.is_success() {
            warn!(%method, %url, status = %response.status(), "Kik API returned an error status");
        }

        response.error_for_status()
    }

    /// Get a user's profile.
    pub async fn get_user(&self, username: &str) -> Result<User> {
        self.execute(self.request(&Endpoint::User(username))).await
    }

    /// Send messages to users.
    pub async fn send_messages(&self, messages: &[Message]) -> Result<()> {
        let request = self
            .request(&Endpoint::SendMessage)
            .json(&MessagesRef { messages })?;
        self.execute_discarding(request).await
    }

    /// Broadcast messages to users.
    pub async fn broadcast_messages(&self, messages: &[Message]) -> Result<()> {
        let request = self
            .request(&Endpoint::Broadcast)
            .json(&MessagesRef { messages })?;
        self.execute_discarding(request).await
    }

    /// Get the bot configuration.
    pub async fn get_configuration(&self) -> Result<Configuration> {
        self.execute(self.request(&Endpoint::GetConfig)).await
    }

    /// Replace the bot configuration and return what the API stored.
    pub async fn set_configuration(&self, config: &Configuration) -> Result<Configuration> {
        let request = self.request(&Endpoint::SetConfig).json(config)?;
        self.execute(request).await
    }

    /// Create a Kik code carrying the given scan data.
    pub async fn create_code(&self, scan_data: &ScanData) -> Result<Code> {
        let request = self.request(&Endpoint::CreateCode).json(scan_data)?;
        self.execute(request).await
    }

    /// Verify that a webhook body matches the signature header it arrived with.
    pub fn verify_signature(&self, signature: &str, body: &[u8]) -> bool {
        signature::verify_signature(signature, body, self.config.api_key())
    }
}

impl fmt::Debug for KikClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KikClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
