//! Error types for the request adapter.
//!
//! # Design
//! Failures fall into three kinds and callers are expected to branch on them:
//! - `Http`: a response arrived but was not 2xx. Carries the response and its
//!   parsed body.
//! - `Transport`: no response at all. The transport's own error is passed
//!   through untouched, so `response()` is `None`.
//! - `Parse`: a JSON body could not be decoded.

use thiserror::Error;

use crate::http::{ResponseBody, ResponseMeta};

/// A non-2xx response, with its body read using the request's `dataType`.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpFailure {
    pub response: ResponseMeta,
    pub response_data: ResponseBody,
}

impl HttpFailure {
    /// The status text, used as the error message.
    pub fn message(&self) -> &str {
        &self.response.status_text
    }

    pub fn status(&self) -> u16 {
        self.response.status
    }
}

/// Errors produced by `Adapter::send`. `E` is the transport's native error.
#[derive(Debug, Error)]
pub enum AdapterError<E> {
    /// The server answered with a non-2xx status.
    #[error("{}", .0.message())]
    Http(HttpFailure),

    /// The transport failed before producing a response.
    #[error(transparent)]
    Transport(E),

    /// The response body was not valid JSON.
    #[error("failed to parse response body: {0}")]
    Parse(#[source] serde_json::Error),
}

impl<E> AdapterError<E> {
    /// The response that caused the failure. `None` unless this is `Http`.
    pub fn response(&self) -> Option<&ResponseMeta> {
        match self {
            AdapterError::Http(failure) => Some(&failure.response),
            _ => None,
        }
    }

    /// The parsed body of the failed response. `None` unless this is `Http`.
    pub fn response_data(&self) -> Option<&ResponseBody> {
        match self {
            AdapterError::Http(failure) => Some(&failure.response_data),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.response().map(|response| response.status)
    }

    /// Recover the transport's native error, if that is what this is.
    pub fn into_transport(self) -> Option<E> {
        match self {
            AdapterError::Transport(error) => Some(error),
            _ => None,
        }
    }
}
