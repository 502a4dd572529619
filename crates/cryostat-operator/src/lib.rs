//! Cryostat custom resource model for operator lifecycle code.
//!
//! This crate provides:
//!
//! - The `Cryostat` custom resource (`operator.cryostat.io/v1beta2`)
//! - [`CryostatInstance`], a view over one `Cryostat` that exposes its
//!   name, namespaces, spec and status while writing through to the object
//! - [`NamespacedApi`], get/create/update/delete for any namespaced kind,
//!   implemented once by [`KubeResourceClient`]
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────┐        ┌──────────────────────────────┐
//! │  CryostatInstance  │──&mut──│ Cryostat { metadata, spec,   │
//! │  name, namespaces  │        │            status }          │
//! └────────────────────┘        └──────────────────────────────┘
//!                                              ▲
//!                                              │ get / create / update / delete
//! ┌────────────────────┐        ┌──────────────────────────────┐
//! │   OperatorClient   │───────▶│  KubeResourceClient<K>       │
//! │   (kube::Client)   │        │  (kube::Api<K>, namespaced)  │
//! └────────────────────┘        └──────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use cryostat_operator::{CryostatInstance, NamespacedApi, OperatorClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OperatorClient::try_default().await?;
//! let cryostats = client.cryostats("cryostat");
//!
//! let mut cryostat = cryostats.get("cryostat-sample").await?;
//! {
//!     let mut instance = CryostatInstance::from_cryostat(&mut cryostat);
//!     let desired = instance.target_namespaces.clone();
//!     *instance.target_namespace_status_mut() = desired;
//! }
//! cryostats.update(&cryostat).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod client;
pub mod crd;
pub mod error;
pub mod instance;

pub use client::{KubeResourceClient, NamespacedApi, OperatorClient};
pub use crd::{Cryostat, CryostatSpec, CryostatStatus};
pub use error::{OperatorError, Result};
pub use instance::CryostatInstance;
pub use kube::api::DeleteParams;
