//! Adapter configuration.
//!
//! Hosts usually take `AdapterConfig::default()`. The struct is serde
//! deserializable with every field optional, so a partial JSON document only
//! overrides what it names.

use serde::{Deserialize, Serialize};

/// How a `204 No Content` response is read when the request asked for JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoContentPolicy {
    /// Read a 204 as text regardless of `dataType`, so an empty body yields
    /// an empty string instead of a JSON parse error.
    #[default]
    ReadAsText,
    /// Apply the request's `dataType` to a 204 like any other response.
    ParseAsDeclared,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Headers added to every request unless the caller already set them.
    pub default_headers: Vec<(String, String)>,
    pub no_content: NoContentPolicy,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            default_headers: vec![
                ("Accept".to_string(), "application/json".to_string()),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            no_content: NoContentPolicy::default(),
        }
    }
}

impl AdapterConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn with_no_content(mut self, policy: NoContentPolicy) -> Self {
        self.no_content = policy;
        self
    }
}
