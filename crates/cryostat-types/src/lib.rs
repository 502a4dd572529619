//! Data model for the Cryostat recording APIs.
//!
//! This crate holds the wire types exchanged with a Cryostat service:
//!
//! - **Targets**: monitored JVMs addressed by their connect URL
//! - **Recordings**: Flight Recorder recordings living on one target
//! - **Archives**: recordings persisted by the service, queried over GraphQL
//! - **Credentials**: authentication material the service uses to reach targets
//!
//! The types carry no I/O. The `cryostat-rest` crate moves them over HTTP.
//!
//! # Example
//!
//! ```
//! use cryostat_types::{Recording, RecordingCreateOptions, RecordingState};
//!
//! let options = RecordingCreateOptions::new("test-rec", "template=Profiling")
//!     .with_duration(30)
//!     .with_to_disk(true);
//! assert_eq!(options.recording_name, "test-rec");
//!
//! let recording: Recording = serde_json::from_str(
//!     r#"{"id": 1, "name": "test-rec", "state": "RUNNING"}"#,
//! ).unwrap();
//! assert_eq!(recording.state(), RecordingState::Running);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod archive;
pub mod credential;
pub mod graphql;
pub mod recording;
pub mod target;

pub use archive::{Archive, ArchiveMetadata};
pub use credential::Credential;
pub use graphql::{
    ArchivedRecordingsData, ArchivedRecordingsPage, GraphQlError, GraphQlQuery, GraphQlResponse,
};
pub use recording::{Recording, RecordingCreateOptions, RecordingMetadata, RecordingState};
pub use target::Target;
