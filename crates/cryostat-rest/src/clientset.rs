//! Aggregate entry point over the resource clients.

use std::sync::Arc;

use reqwest::Url;

use crate::auth::{InClusterTokenSource, TokenSource};
use crate::config::ClientConfig;
use crate::credential::CredentialClient;
use crate::error::Result;
use crate::recording::RecordingClient;
use crate::target::TargetClient;
use crate::transport::RestTransport;

/// The target, recording and credential clients for one Cryostat service.
///
/// All three share a single transport, so they share connections, timeout
/// and token source.
#[derive(Debug, Clone)]
pub struct CryostatRestClientset {
    transport: RestTransport,
    targets: TargetClient,
    recordings: RecordingClient,
    credentials: CredentialClient,
}

impl CryostatRestClientset {
    /// Create a client set authenticated with the ambient service account.
    ///
    /// Uses `config.token_file` when set, in-cluster detection otherwise.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the config is invalid.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let token_source = match &config.token_file {
            Some(path) => InClusterTokenSource::with_token_file(path),
            None => InClusterTokenSource::new(),
        };
        Self::with_token_source(config, Arc::new(token_source))
    }

    /// Create an in-cluster client set for the given base URL with default
    /// settings.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the base URL is invalid.
    pub fn in_cluster(base_url: impl Into<String>) -> Result<Self> {
        Self::new(&ClientConfig::with_base_url(base_url))
    }

    /// Create a client set with a custom token source.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the config is invalid.
    pub fn with_token_source(
        config: &ClientConfig,
        token_source: Arc<dyn TokenSource>,
    ) -> Result<Self> {
        let transport = RestTransport::new(config, token_source)?;
        tracing::debug!(base_url = %transport.base_url(), "Created Cryostat REST client set");
        Ok(Self::from_transport(transport))
    }

    /// Create a client set over an existing transport.
    #[must_use]
    pub fn from_transport(transport: RestTransport) -> Self {
        Self {
            targets: TargetClient::new(transport.clone()),
            recordings: RecordingClient::new(transport.clone()),
            credentials: CredentialClient::new(transport.clone()),
            transport,
        }
    }

    /// Client for targets.
    #[must_use]
    pub fn targets(&self) -> &TargetClient {
        &self.targets
    }

    /// Client for recordings and archives.
    #[must_use]
    pub fn recordings(&self) -> &RecordingClient {
        &self.recordings
    }

    /// Client for credentials.
    #[must_use]
    pub fn credentials(&self) -> &CredentialClient {
        &self.credentials
    }

    /// Get the base URL of the service.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.transport.base_url()
    }
}
