//! Outbound request construction.

use crate::{Endpoint, KikError, Result};
use base64::Engine;
use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Method, header};
use serde::Serialize;

/// A request ready to be handed to a [`Transport`](crate::Transport).
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    method: Method,
    url: String,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl OutboundRequest {
    /// Create a request for `base_url` joined with `relative_path`.
    ///
    /// The path is appended verbatim; the base URL is expected to end with `/`.
    pub fn new(method: Method, base_url: &str, relative_path: &str) -> Self {
        let mut url = String::with_capacity(base_url.len() + relative_path.len());
        url.push_str(base_url);
        url.push_str(relative_path);

        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Create a request for an API endpoint.
    pub fn for_endpoint(base_url: &str, endpoint: &Endpoint<'_>) -> Self {
        Self::new(endpoint.method(), base_url, &endpoint.path())
    }

    /// Set the request body as JSON.
    ///
    /// On failure the request is dropped; no partial body is ever produced.
    pub fn json<T: Serialize + ?Sized>(mut self, payload: &T) -> Result<Self> {
        let bytes = serde_json::to_vec(payload).map_err(KikError::Encode)?;
        self.headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        self.body = Some(Bytes::from(bytes));
        Ok(self)
    }

    /// Set basic authentication.
    ///
    /// The header value is marked sensitive so it is hidden from `Debug` output.
    pub fn basic_auth(mut self, username: &str, password: &str) -> Result<Self> {
        let credentials = format!("{}:{}", username, password);
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
        let mut value = HeaderValue::try_from(format!("Basic {}", encoded))
            .map_err(|_| KikError::Config("credentials are not a valid header value".to_string()))?;
        value.set_sensitive(true);
        self.headers.insert(header::AUTHORIZATION, value);
        Ok(self)
    }

    /// Get the HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Get the absolute target URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the request body, if any.
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Consume the request into its parts.
    pub fn into_parts(self) -> (Method, String, HeaderMap, Option<Bytes>) {
        (self.method, self.url, self.headers, self.body)
    }
}
