//! Kik client configuration.

use crate::{KikError, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Production base URL of the Kik bot API.
pub const DEFAULT_BASE_URL: &str = "https://api.kik.com/";

/// Environment variable names read by [`KikConfig::from_env`].
pub mod env {
    /// Base URL, must end with `/`.
    pub const BASE_URL: &str = "KIK_BASE_URL";
    /// Bot username used as the Basic Auth identifier.
    pub const BOT_USERNAME: &str = "KIK_BOT_USERNAME";
    /// API key used as the Basic Auth secret and webhook signing key.
    pub const API_KEY: &str = "KIK_API_KEY";
    /// Request timeout in seconds.
    pub const TIMEOUT_SECS: &str = "KIK_TIMEOUT_SECS";
}

/// Kik client configuration.
///
/// The base URL is validated once, when the configuration is built, and
/// cannot change afterwards.
#[derive(Clone)]
pub struct KikConfig {
    base_url: String,
    bot_username: String,
    api_key: String,
    timeout: Duration,
    connect_timeout: Duration,
    user_agent: String,
    follow_redirects: bool,
}

impl KikConfig {
    /// Create a configuration with default timeouts.
    pub fn new(
        base_url: impl Into<String>,
        bot_username: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self> {
        Self::builder(bot_username, api_key)
            .base_url(base_url)
            .build()
    }

    /// Create a new configuration builder.
    pub fn builder(
        bot_username: impl Into<String>,
        api_key: impl Into<String>,
    ) -> KikConfigBuilder {
        KikConfigBuilder::new(bot_username, api_key)
    }

    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first when present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup using the `KIK_*` names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| KikError::Config(format!("{} is not set", key)))
        };

        let mut builder = Self::builder(required(env::BOT_USERNAME)?, required(env::API_KEY)?);
        if let Some(base_url) = lookup(env::BASE_URL) {
            builder = builder.base_url(base_url);
        }
        if let Some(raw) = lookup(env::TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                KikError::Config(format!("{} must be a whole number, got {:?}", env::TIMEOUT_SECS, raw))
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build()
    }

    /// Parse configuration from TOML.
    ///
    /// ```toml
    /// bot_username = "mybot"
    /// api_key = "..."
    /// base_url = "https://api.kik.com/"
    /// timeout_secs = 30
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: FileConfig = toml::from_str(content)
            .map_err(|e| KikError::Config(format!("TOML parse error: {}", e)))?;
        file.into_config()
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            KikError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Base URL, always ending with `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Bot username.
    pub fn bot_username(&self) -> &str {
        &self.bot_username
    }

    /// API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Request timeout applied by the default transport.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Connection timeout applied by the default transport.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// User agent string sent by the default transport.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Whether the default transport follows redirects. Off unless enabled,
    /// so a 3xx reaches the caller as a status error.
    pub fn follow_redirects(&self) -> bool {
        self.follow_redirects
    }
}

impl fmt::Debug for KikConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KikConfig")
            .field("base_url", &self.base_url)
            .field("bot_username", &self.bot_username)
            .field("api_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("user_agent", &self.user_agent)
            .field("follow_redirects", &self.follow_redirects)
            .finish()
    }
}

/// Builder for Kik client configuration.
pub struct KikConfigBuilder {
    base_url: String,
    bot_username: String,
    api_key: String,
    timeout: Duration,
    connect_timeout: Duration,
    user_agent: String,
    follow_redirects: bool,
}

impl KikConfigBuilder {
    fn new(bot_username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            bot_username: bot_username.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("kik-client/{}", env!("CARGO_PKG_VERSION")),
            follow_redirects: false,
        }
    }

    /// Set the base URL. Must end with `/`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Enable or disable following redirects in the default transport.
    pub fn follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<KikConfig> {
        if !self.base_url.ends_with('/') {
            return Err(KikError::Config(format!(
                "base URL must have a trailing slash, but {} does not",
                self.base_url
            )));
        }
        url::Url::parse(&self.base_url)
            .map_err(|e| KikError::Config(format!("invalid base URL {}: {}", self.base_url, e)))?;

        Ok(KikConfig {
            base_url: self.base_url,
            bot_username: self.bot_username,
            api_key: self.api_key,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            user_agent: self.user_agent,
            follow_redirects: self.follow_redirects,
        })
    }
}

#[derive(Deserialize)]
struct FileConfig {
    bot_username: String,
    api_key: String,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

impl FileConfig {
    fn into_config(self) -> Result<KikConfig> {
        let mut builder = KikConfig::builder(self.bot_username, self.api_key);
        if let Some(base_url) = self.base_url {
            builder = builder.base_url(base_url);
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        builder.build()
    }
}
