//! Transport capability used by the client to reach the API.

use crate::{BoxError, KikConfig, OutboundRequest, RawResponse, Result};
use async_trait::async_trait;

/// Redirect limit when following is enabled.
const MAX_REDIRECTS: usize = 10;

/// Sends a request and returns the buffered response.
///
/// Implementations own timeouts, TLS, pooling and cancellation. A returned
/// error means no response was received.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a single request.
    async fn send(&self, request: OutboundRequest) -> std::result::Result<RawResponse, BoxError>;
}

/// Transport backed by a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a reqwest client from the configured timeouts, user agent and
    /// redirect setting.
    pub fn new(config: &KikConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent());
        if config.follow_redirects() {
            builder = builder.redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS));
        } else {
            builder = builder.redirect(reqwest::redirect::Policy::none());
        }
        let inner = builder.build()?;

        Ok(Self { inner })
    }

    /// Wrap an existing reqwest client.
    pub fn from_client(inner: reqwest::Client) -> Self {
        Self { inner }
    }

    /// Get the underlying reqwest client.
    pub fn inner(&self) -> &reqwest::Client {
        &self.inner
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: OutboundRequest) -> std::result::Result<RawResponse, BoxError> {
        let (method, url, headers, body) = request.into_parts();

        let mut builder = self.inner.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = self.inner.execute(builder.build()?).await?;
        Ok(RawResponse::from_reqwest(response).await?)
    }
}
