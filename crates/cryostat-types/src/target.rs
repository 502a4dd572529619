//! Monitored targets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A monitored JVM reachable through its connect URL.
///
/// Targets are discovered by the service; this client only reads them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    /// JMX service URL, also used as the target's path segment.
    pub connect_url: String,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Identifier of the JVM instance, once the service has connected to it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jvm_id: Option<String>,
    /// Labels attached by the discovery mechanism.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    /// Platform and service annotations, kept as raw JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<serde_json::Value>,
}

impl Target {
    /// The alias if present, otherwise the connect URL.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.connect_url)
    }
}
