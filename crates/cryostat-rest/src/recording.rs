//! Client for the recording lifecycle of a target.
//!
//! # Lifecycle
//!
//! A recording is identified by its target's connect URL and its name:
//!
//! ```text
//!  (absent) --create--> RUNNING --stop--> STOPPED --archive--> ARCHIVED
//!                  \                                      |
//!                   \--archive (continuous)----------> ARCHIVED
//!     RUNNING/STOPPED/ARCHIVED --delete--> (absent)
//! ```
//!
//! Nothing is cached: every call goes to the service, so a `get` followed by
//! a `stop` can race with other clients changing the same recording.

use cryostat_types::{
    Archive, ArchivedRecordingsData, GraphQlQuery, GraphQlResponse, Recording,
    RecordingCreateOptions,
};
use reqwest::{Method, Url};
use serde_json::{Map, Value};

use crate::error::{ClientError, Result};
use crate::transport::RestTransport;

const ARCHIVED_RECORDINGS_QUERY: &str = r"
query ArchivedRecordingsForTarget($connectUrl: String) {
    archivedRecordings(filter: { sourceTarget: $connectUrl }) {
        data {
            name
            downloadUrl
            reportUrl
            metadata {
                labels
            }
            size
        }
    }
}
";

/// Manages recordings on targets.
#[derive(Debug, Clone)]
pub struct RecordingClient {
    transport: RestTransport,
}

impl RecordingClient {
    /// Create a recording client on top of a shared transport.
    #[must_use]
    pub fn new(transport: RestTransport) -> Self {
        Self { transport }
    }

    fn recordings_url(&self, connect_url: &str) -> Result<Url> {
        self.transport
            .endpoint(&["api", "v1", "targets", connect_url, "recordings"])
    }

    fn recording_url(&self, connect_url: &str, name: &str) -> Result<Url> {
        self.transport
            .endpoint(&["api", "v1", "targets", connect_url, "recordings", name])
    }

    /// List the recordings on a target.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a recording
    /// list.
    pub async fn list(&self, connect_url: &str) -> Result<Vec<Recording>> {
        async {
            let url = self.recordings_url(connect_url)?;
            self.transport
                .request(Method::GET, url)
                .send_json::<Vec<Recording>>()
                .await
        }
        .await
        .map_err(|e| e.context("list recordings", connect_url))
    }

    /// Get one recording by name.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::RecordingNotFound` (wrapped in operation
    /// context) if the target has no recording with that name, or any error
    /// from listing.
    pub async fn get(&self, connect_url: &str, name: &str) -> Result<Recording> {
        self.list(connect_url)
            .await?
            .into_iter()
            .find(|recording| recording.name == name)
            .ok_or_else(|| {
                ClientError::RecordingNotFound {
                    connect_url: connect_url.to_string(),
                    name: name.to_string(),
                }
                .context("get recording", connect_url)
            })
    }

    /// Start a new recording.
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the options (for example a
    /// duplicate name) or the response is not a recording.
    pub async fn create(
        &self,
        connect_url: &str,
        options: &RecordingCreateOptions,
    ) -> Result<Recording> {
        let recording = async {
            let url = self.recordings_url(connect_url)?;
            self.transport
                .request(Method::POST, url)
                .form(options)
                .send_json::<Recording>()
                .await
        }
        .await
        .map_err(|e| e.context("create recording", connect_url))?;

        tracing::debug!(
            connect_url = %connect_url,
            recording = %recording.name,
            state = %recording.state,
            "Created recording"
        );
        Ok(recording)
    }

    /// Save a copy of the recording to the service's archive.
    ///
    /// Returns the name of the new archive.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service answers with an
    /// empty archive name.
    pub async fn archive(&self, connect_url: &str, name: &str) -> Result<String> {
        let label = async {
            let url = self.recording_url(connect_url, name)?;
            let body = self
                .transport
                .request(Method::PATCH, url)
                .text("SAVE")
                .send_text()
                .await?;

            let label = body.trim();
            if label.is_empty() {
                return Err(ClientError::Decode(format!(
                    "empty archive name for recording {name}"
                )));
            }
            Ok(label.to_string())
        }
        .await
        .map_err(|e| e.context("archive recording", connect_url))?;

        tracing::debug!(connect_url = %connect_url, recording = %name, archive = %label, "Archived recording");
        Ok(label)
    }

    /// Stop a running recording.
    ///
    /// Whether stopping an already stopped recording succeeds is up to the
    /// service.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn stop(&self, connect_url: &str, name: &str) -> Result<()> {
        async {
            let url = self.recording_url(connect_url, name)?;
            self.transport
                .request(Method::PATCH, url)
                .text("STOP")
                .send_discard()
                .await
        }
        .await
        .map_err(|e| e.context("stop recording", connect_url))?;

        tracing::debug!(connect_url = %connect_url, recording = %name, "Stopped recording");
        Ok(())
    }

    /// Delete a recording from its target.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete(&self, connect_url: &str, name: &str) -> Result<()> {
        async {
            let url = self.recording_url(connect_url, name)?;
            self.transport
                .request(Method::DELETE, url)
                .send_discard()
                .await
        }
        .await
        .map_err(|e| e.context("delete recording", connect_url))?;

        tracing::debug!(connect_url = %connect_url, recording = %name, "Deleted recording");
        Ok(())
    }

    /// Fetch the automated analysis report of a recording.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::ReportUnavailable` without contacting the
    /// service if the recording has no report URL yet; otherwise any request
    /// or decode error.
    pub async fn generate_report(&self, recording: &Recording) -> Result<Map<String, Value>> {
        async {
            if recording.report_url.is_empty() {
                return Err(ClientError::ReportUnavailable(recording.name.clone()));
            }

            let url = self.transport.resolve(&recording.report_url)?;
            self.transport
                .request(Method::GET, url)
                .accept("application/json")
                .send_json::<Map<String, Value>>()
                .await
        }
        .await
        .map_err(|e| e.context("generate report", recording.name.as_str()))
    }

    /// List the archives the service holds for a target.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::GraphQl` if the query reports errors,
    /// `ClientError::Decode` if the response has no data, or any request
    /// error.
    pub async fn list_archives(&self, connect_url: &str) -> Result<Vec<Archive>> {
        async {
            let url = self.transport.endpoint(&["api", "v2.2", "graphql"])?;
            let query =
                GraphQlQuery::new(ARCHIVED_RECORDINGS_QUERY).variable("connectUrl", connect_url);

            let response: GraphQlResponse<ArchivedRecordingsData> = self
                .transport
                .request(Method::POST, url)
                .json(&query)
                .send_json()
                .await?;

            if !response.errors.is_empty() {
                return Err(ClientError::GraphQl(
                    response.errors.into_iter().map(|e| e.message).collect(),
                ));
            }

            response
                .data
                .map(|data| data.archived_recordings.data)
                .ok_or_else(|| ClientError::Decode("GraphQL response has no data".to_string()))
        }
        .await
        .map_err(|e| e.context("list archives", connect_url))
    }
}
