//! Request options as issued by the legacy persistence layer.
//!
//! # Design
//! `RequestOptions` is plain data: the adapter borrows it and builds a fresh
//! `Descriptor`, so the same options value can be sent twice without the
//! first dispatch leaking into the second. Callbacks are kept out of this type
//! (see `adapter::Callbacks`) so options stay `Clone` and comparable.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::http::HttpMethod;

/// Payload attached to a request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestData {
    /// Key/value pairs. Serialized into the query string for GET requests.
    /// Key order is insertion order.
    Params(Map<String, Value>),
    /// A pre-serialized body, sent verbatim.
    Body(String),
}

impl RequestData {
    /// Build `Params` from a JSON object. Any other JSON value is serialized
    /// to its compact text and used as a body.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => RequestData::Params(map),
            Value::String(body) => RequestData::Body(body),
            other => RequestData::Body(other.to_string()),
        }
    }
}

impl From<String> for RequestData {
    fn from(body: String) -> Self {
        RequestData::Body(body)
    }
}

impl From<&str> for RequestData {
    fn from(body: &str) -> Self {
        RequestData::Body(body.to_string())
    }
}

impl From<Map<String, Value>> for RequestData {
    fn from(params: Map<String, Value>) -> Self {
        RequestData::Params(params)
    }
}

/// How the response body is read. Absence means text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Json,
    Text,
}

impl From<&str> for DataType {
    /// Only the exact token `json` selects JSON; anything else reads text.
    fn from(token: &str) -> Self {
        if token == "json" {
            DataType::Json
        } else {
            DataType::Text
        }
    }
}

/// Options for a single request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    pub url: String,
    /// The legacy `type` field.
    pub method: HttpMethod,
    pub data: Option<RequestData>,
    pub headers: Option<Vec<(String, String)>>,
    pub data_type: Option<DataType>,
}

impl RequestOptions {
    pub fn new(method: impl Into<HttpMethod>, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
            data: None,
            headers: None,
            data_type: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    pub fn data(mut self, data: impl Into<RequestData>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Set GET params from a JSON object; non-objects become a body.
    pub fn json_data(mut self, value: Value) -> Self {
        self.data = Some(RequestData::from_json(value));
        self
    }

    /// Append a header. Later calls with the same name add another entry.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(Vec::new)
            .push((name.into(), value.into()));
        self
    }

    pub fn data_type(mut self, data_type: impl Into<DataType>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    pub fn json(self) -> Self {
        self.data_type(DataType::Json)
    }

    /// Effective data type: text unless json was asked for.
    pub fn reads_json(&self) -> bool {
        self.data_type == Some(DataType::Json)
    }
}
