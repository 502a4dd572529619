//! Client configuration.

use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use crate::error::{ClientError, Result};

/// How the bearer token is written into the `Authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenEncoding {
    /// `Bearer <base64(token)>`, as expected by Cryostat's OpenShift auth.
    #[default]
    Base64,
    /// `Bearer <token>`.
    Raw,
}

impl TokenEncoding {
    /// Parse an encoding name (`base64` or `raw`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "base64" => Some(Self::Base64),
            "raw" | "plain" => Some(Self::Raw),
            _ => None,
        }
    }
}

/// Configuration for a Cryostat REST client set.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the Cryostat service.
    #[serde(default = "ClientConfig::default_base_url")]
    pub base_url: String,

    /// Overall timeout for one request, in seconds.
    #[serde(default = "ClientConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// Skip TLS certificate verification, for services with self-signed
    /// certificates. Off unless enabled.
    #[serde(default = "ClientConfig::default_insecure_skip_verify")]
    pub insecure_skip_verify: bool,

    /// Bearer token encoding.
    #[serde(default)]
    pub token_encoding: TokenEncoding,

    /// Explicit service account token file. `None` uses in-cluster detection.
    #[serde(default)]
    pub token_file: Option<String>,
}

impl ClientConfig {
    fn default_base_url() -> String {
        "https://cryostat:8181".to_string()
    }

    const fn default_request_timeout() -> u64 {
        30
    }

    const fn default_insecure_skip_verify() -> bool {
        false
    }

    /// Create a config for the given base URL with default settings.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Supported environment variables:
    /// - `CRYOSTAT_BASE_URL`: base URL of the Cryostat service
    /// - `CRYOSTAT_REQUEST_TIMEOUT_SECONDS`: overall request timeout
    /// - `CRYOSTAT_INSECURE_SKIP_VERIFY`: `true`/`false`
    /// - `CRYOSTAT_TOKEN_ENCODING`: `base64` or `raw`
    /// - `CRYOSTAT_TOKEN_FILE`: path of the bearer token file
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Values that fail to parse are ignored and the default is kept.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = lookup("CRYOSTAT_BASE_URL") {
            config.base_url = val;
        }
        if let Some(val) = lookup("CRYOSTAT_REQUEST_TIMEOUT_SECONDS") {
            if let Ok(n) = val.parse() {
                config.request_timeout_seconds = n;
            }
        }
        if let Some(val) = lookup("CRYOSTAT_INSECURE_SKIP_VERIFY") {
            if let Ok(b) = val.to_lowercase().parse() {
                config.insecure_skip_verify = b;
            }
        }
        if let Some(val) = lookup("CRYOSTAT_TOKEN_ENCODING") {
            if let Some(encoding) = TokenEncoding::from_name(&val) {
                config.token_encoding = encoding;
            }
        }
        if let Some(val) = lookup("CRYOSTAT_TOKEN_FILE") {
            if !val.is_empty() {
                config.token_file = Some(val);
            }
        }

        config
    }

    /// Get the request timeout as a `Duration`.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Validate the config and return the parsed base URL.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the base URL cannot be parsed
    /// or cannot carry a path, or if the timeout is zero.
    pub fn validate(&self) -> Result<Url> {
        if self.request_timeout_seconds == 0 {
            return Err(ClientError::Configuration(
                "request timeout must be greater than zero".to_string(),
            ));
        }

        let url = Url::parse(&self.base_url).map_err(|e| {
            ClientError::Configuration(format!("invalid base URL {}: {e}", self.base_url))
        })?;
        if url.cannot_be_a_base() {
            return Err(ClientError::Configuration(format!(
                "base URL {} cannot carry a path",
                self.base_url
            )));
        }

        Ok(url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            request_timeout_seconds: Self::default_request_timeout(),
            insecure_skip_verify: Self::default_insecure_skip_verify(),
            token_encoding: TokenEncoding::default(),
            token_file: None,
        }
    }
}
