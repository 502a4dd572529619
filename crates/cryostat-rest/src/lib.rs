//! Recording lifecycle client for the Cryostat REST and GraphQL APIs.
//!
//! This crate talks to a Cryostat service on behalf of in-cluster callers:
//!
//! - Listing the targets the service monitors
//! - Creating, stopping, archiving and deleting Flight Recorder recordings
//! - Fetching automated analysis reports and listing archives over GraphQL
//! - Registering credentials the service uses to reach targets
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                  CryostatRestClientset                    │
//! │  ┌──────────────┐ ┌─────────────────┐ ┌────────────────┐  │
//! │  │ TargetClient │ │ RecordingClient │ │CredentialClient│  │
//! │  └──────────────┘ └─────────────────┘ └────────────────┘  │
//! └───────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │                      RestTransport                        │
//! │   reqwest::Client · base URL · TokenSource · encoding     │
//! └───────────────────────────────────────────────────────────┘
//!                              │ HTTPS
//!                              ▼
//!                    ┌──────────────────┐
//!                    │ Cryostat service │
//!                    └──────────────────┘
//! ```
//!
//! Each operation is exactly one HTTP exchange. Nothing is cached and nothing
//! is retried; errors carry the operation and target they occurred on.
//!
//! # Example
//!
//! ```no_run
//! use cryostat_rest::{ClientConfig, CryostatRestClientset};
//! use cryostat_types::RecordingCreateOptions;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let clientset = CryostatRestClientset::new(&ClientConfig::from_env())?;
//!
//! for target in clientset.targets().list().await? {
//!     println!("{}", target.display_name());
//! }
//!
//! let connect_url = "service:jmx:rmi:///jndi/rmi://app:9091/jmxrmi";
//! let options = RecordingCreateOptions::new("test-rec", "template=Profiling").with_duration(30);
//! let recording = clientset.recordings().create(connect_url, &options).await?;
//!
//! clientset.recordings().stop(connect_url, &recording.name).await?;
//! let archive = clientset.recordings().archive(connect_url, &recording.name).await?;
//! println!("Archived as {archive}");
//! clientset.recordings().delete(connect_url, &recording.name).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod auth;
pub mod clientset;
pub mod config;
pub mod credential;
pub mod error;
pub mod recording;
pub mod target;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use auth::{InClusterTokenSource, StaticTokenSource, TokenSource};
pub use clientset::CryostatRestClientset;
pub use config::{ClientConfig, TokenEncoding};
pub use credential::CredentialClient;
pub use error::{ClientError, Result};
pub use recording::RecordingClient;
pub use target::TargetClient;
pub use transport::{RestRequest, RestTransport};

// Re-export the data model for convenience
pub use cryostat_types::{
    Archive, Credential, Recording, RecordingCreateOptions, RecordingState, Target,
};
