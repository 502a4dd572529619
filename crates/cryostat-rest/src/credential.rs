//! Client for stored target credentials.

use cryostat_types::Credential;
use reqwest::Method;

use crate::error::Result;
use crate::transport::RestTransport;

/// Registers credentials the service uses to connect to targets.
///
/// Credentials can only be created through this client.
#[derive(Debug, Clone)]
pub struct CredentialClient {
    transport: RestTransport,
}

impl CredentialClient {
    /// Create a credential client on top of a shared transport.
    #[must_use]
    pub fn new(transport: RestTransport) -> Self {
        Self { transport }
    }

    /// Store a credential.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects the
    /// credential.
    pub async fn create(&self, credential: &Credential) -> Result<()> {
        async {
            let url = self.transport.endpoint(&["api", "v2.2", "credentials"])?;
            self.transport
                .request(Method::POST, url)
                .form(credential)
                .send_discard()
                .await
        }
        .await
        .map_err(|e| e.context("create credential", credential.match_expression.as_str()))?;

        tracing::debug!(match_expression = %credential.match_expression, "Stored credential");
        Ok(())
    }
}
