//! GraphQL request and response envelopes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Archive;

/// A GraphQL query document with its variables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQlQuery {
    /// The query document.
    pub query: String,
    /// Variables referenced by the document.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub variables: Map<String, Value>,
}

impl GraphQlQuery {
    /// Create a query with no variables.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: Map::new(),
        }
    }

    /// Bind a variable.
    #[must_use]
    pub fn variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }
}

/// Top-level GraphQL response.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    /// Query result, absent when the query failed as a whole.
    pub data: Option<T>,
    /// Errors reported by the server.
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GraphQlError {
    /// Human-readable error message.
    pub message: String,
}

/// `data` payload of the archived recordings query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedRecordingsData {
    /// The archived recordings page.
    pub archived_recordings: ArchivedRecordingsPage,
}

/// A page of archived recordings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArchivedRecordingsPage {
    /// Archives on this page.
    #[serde(default)]
    pub data: Vec<Archive>,
}
