//! Error types for the Cryostat REST client.

use thiserror::Error;

/// A result type using `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to a Cryostat service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Ambient credentials or configuration are unavailable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request URL or body could not be built.
    #[error("failed to construct request: {0}")]
    RequestConstruction(String),

    /// Network-level failure, including timeouts.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("API request failed with status code {status}: {body}")]
    RequestFailed {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The response body did not have the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(String),

    /// A GraphQL query returned errors.
    #[error("GraphQL query failed: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// The recording is absent from the target's listing.
    #[error("recording {name} does not exist for target {connect_url}")]
    RecordingNotFound {
        /// Target the recording was looked up on.
        connect_url: String,
        /// Name of the missing recording.
        name: String,
    },

    /// The recording has no report URL yet.
    #[error("report URL is not available for recording {0}")]
    ReportUnavailable(String),

    /// An error annotated with the operation and target it occurred on.
    #[error("{operation} failed for {target}: {source}")]
    Operation {
        /// Operation name, e.g. `"stop recording"`.
        operation: &'static str,
        /// Target identifier, usually a connect URL.
        target: String,
        /// Underlying error.
        #[source]
        source: Box<ClientError>,
    },
}

impl ClientError {
    /// Wrap this error with the operation and target it occurred on.
    #[must_use]
    pub fn context(self, operation: &'static str, target: impl Into<String>) -> Self {
        Self::Operation {
            operation,
            target: target.into(),
            source: Box::new(self),
        }
    }

    /// The underlying error with all operation context stripped.
    #[must_use]
    pub fn root(&self) -> &Self {
        let mut current = self;
        while let Self::Operation { source, .. } = current {
            current = source;
        }
        current
    }

    /// The HTTP status code, if the service answered with an error status.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self.root() {
            Self::RequestFailed { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if the requested resource does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), Self::RecordingNotFound { .. }) || self.status_code() == Some(404)
    }

    /// Returns true if this error might be resolved by retrying.
    ///
    /// This client never retries on its own.
    #[must_use]
    pub fn is_retriable(&self) -> bool {
        match self.root() {
            Self::Transport(_) => true,
            Self::RequestFailed { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
