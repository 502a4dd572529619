//! The `Cryostat` custom resource.
//!
//! Only the fields that lifecycle code reads through
//! [`CryostatInstance`](crate::CryostatInstance) are modelled.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::Condition;
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// Desired state of a Cryostat deployment.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[kube(
    group = "operator.cryostat.io",
    version = "v1beta2",
    kind = "Cryostat",
    plural = "cryostats",
    namespaced,
    status = "CryostatStatus",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct CryostatSpec {
    /// Namespaces whose workloads this Cryostat may monitor.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_namespaces: Vec<String>,

    /// Whether TLS certificates are issued through cert-manager.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_cert_manager: Option<bool>,
}

/// Observed state of a Cryostat deployment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CryostatStatus {
    /// Namespaces the deployment has actually been granted access to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_namespaces: Vec<String>,

    /// Address of the Cryostat web application.
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "applicationURL")]
    pub application_url: Option<String>,

    /// Standard status conditions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}
