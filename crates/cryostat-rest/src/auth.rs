//! Bearer token sources.
//!
//! Every request carries `Authorization: Bearer <token>`. The token comes
//! from a [`TokenSource`], which is asked once per request so rotated
//! service account tokens are picked up without rebuilding the client.

use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

use async_trait::async_trait;
use base64::prelude::*;

use crate::config::TokenEncoding;
use crate::error::{ClientError, Result};

/// Default location of the projected service account token.
pub const SERVICE_ACCOUNT_TOKEN_PATH: &str = "/var/run/secrets/kubernetes.io/serviceaccount/token";

/// Provides the bearer token attached to each request.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Fetch the current token.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if no token is available.
    async fn token(&self) -> Result<String>;
}

/// Reads the ambient Kubernetes service account token.
///
/// The token file location is resolved once; the file itself is read on
/// every call.
#[derive(Debug, Clone, Default)]
pub struct InClusterTokenSource {
    token_file: OnceLock<PathBuf>,
}

impl InClusterTokenSource {
    /// Detect the in-cluster environment on first use and read its token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the token from an explicit file, skipping in-cluster detection.
    #[must_use]
    pub fn with_token_file(path: impl Into<PathBuf>) -> Self {
        Self {
            token_file: OnceLock::from(path.into()),
        }
    }

    async fn resolve_token_file(&self) -> Result<PathBuf> {
        if let Some(path) = self.token_file.get() {
            return Ok(path.clone());
        }

        // Detection reads the mounted CA and namespace files.
        let detected = tokio::task::spawn_blocking(detect_token_file)
            .await
            .map_err(|e| {
                ClientError::Configuration(format!("in-cluster detection did not complete: {e}"))
            })??;

        Ok(self.token_file.get_or_init(|| detected).clone())
    }
}

fn detect_token_file() -> Result<PathBuf> {
    let config = kube::Config::incluster().map_err(|e| {
        ClientError::Configuration(format!("failed to get in-cluster configuration: {e}"))
    })?;

    Ok(config
        .auth_info
        .token_file
        .map_or_else(|| PathBuf::from(SERVICE_ACCOUNT_TOKEN_PATH), PathBuf::from))
}

#[async_trait]
impl TokenSource for InClusterTokenSource {
    async fn token(&self) -> Result<String> {
        let path = self.resolve_token_file().await?;

        let token = tokio::fs::read_to_string(&path).await.map_err(|e| {
            ClientError::Configuration(format!(
                "failed to read service account token {}: {e}",
                path.display()
            ))
        })?;

        let token = token.trim();
        if token.is_empty() {
            return Err(ClientError::Configuration(format!(
                "service account token {} is empty",
                path.display()
            )));
        }

        Ok(token.to_string())
    }
}

/// A fixed token, for out-of-cluster use.
#[derive(Clone)]
pub struct StaticTokenSource {
    token: String,
}

impl StaticTokenSource {
    /// Create a source that always returns `token`.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl fmt::Debug for StaticTokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticTokenSource").finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenSource for StaticTokenSource {
    async fn token(&self) -> Result<String> {
        if self.token.trim().is_empty() {
            return Err(ClientError::Configuration("bearer token is empty".to_string()));
        }
        Ok(self.token.clone())
    }
}

/// Format the `Authorization` header value for `token`.
#[must_use]
pub fn bearer_header(token: &str, encoding: TokenEncoding) -> String {
    match encoding {
        TokenEncoding::Base64 => format!("Bearer {}", BASE64_STANDARD.encode(token)),
        TokenEncoding::Raw => format!("Bearer {token}"),
    }
}
