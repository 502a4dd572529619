//! Error types for the operator crate.

use thiserror::Error;

/// Errors that can occur while reading or writing custom resources.
#[derive(Error, Debug)]
pub enum OperatorError {
    /// Kubernetes API error.
    #[error("Kubernetes API error: {0}")]
    KubeApi(#[from] kube::Error),

    /// The resource has no `metadata.name` and cannot be addressed.
    #[error("{0} has no metadata.name")]
    MissingName(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl OperatorError {
    /// Check if the API server reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::KubeApi(kube::Error::Api(response)) if response.code == 404)
    }

    /// Check if this error is retriable.
    #[must_use]
    pub fn is_retriable(&self) -> bool {
        match self {
            Self::KubeApi(kube::Error::Api(response)) => {
                response.code == 409 || response.code == 429 || response.code >= 500
            }
            Self::KubeApi(_) => true,
            Self::MissingName(_) | Self::Config(_) => false,
        }
    }
}

/// Result type for operator operations.
pub type Result<T> = std::result::Result<T, OperatorError>;
