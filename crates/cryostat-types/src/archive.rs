//! Archived recordings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A recording persisted by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Archive {
    /// Archive file name.
    pub name: String,
    /// URL the archive can be downloaded from.
    pub download_url: String,
    /// URL of the archive's analysis report.
    pub report_url: String,
    /// Labels copied from the source recording.
    pub metadata: ArchiveMetadata,
    /// Size in bytes.
    pub size: i64,
}

/// Labels attached to an archive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveMetadata {
    /// Free-form labels.
    pub labels: BTreeMap<String, String>,
}
