//! `Transport` backed by `reqwest`.

use async_trait::async_trait;
use thiserror::Error;

use crate::http::Descriptor;
use crate::transport::{Transport, TransportResponse};

#[derive(Debug, Error)]
pub enum ReqwestTransportError {
    #[error("invalid HTTP method token: {0}")]
    InvalidMethod(String),

    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

/// Sends descriptors with a shared `reqwest::Client`.
///
/// Non-2xx statuses are returned as responses, never as errors; the adapter
/// classifies them.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    type Error = ReqwestTransportError;
    type Response = reqwest::Response;

    async fn fetch(&self, url: &str, descriptor: &Descriptor) -> Result<Self::Response, Self::Error> {
        let token = descriptor.method.as_str();
        let method = reqwest::Method::from_bytes(token.as_bytes())
            .map_err(|_| ReqwestTransportError::InvalidMethod(token.to_string()))?;

        let mut request = self.client.request(method, url);
        for (name, value) in &descriptor.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &descriptor.body {
            request = request.body(body.clone());
        }
        Ok(request.send().await?)
    }
}

#[async_trait]
impl TransportResponse for reqwest::Response {
    type Error = ReqwestTransportError;

    fn status(&self) -> u16 {
        reqwest::Response::status(self).as_u16()
    }

    /// The reason phrase the server sent, else the canonical one, else the
    /// numeric code.
    fn status_text(&self) -> String {
        let status = reqwest::Response::status(self);
        if let Some(phrase) = self.extensions().get::<hyper::ext::ReasonPhrase>() {
            return String::from_utf8_lossy(phrase.as_bytes()).into_owned();
        }
        status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_u16().to_string())
    }

    fn headers(&self) -> Vec<(String, String)> {
        reqwest::Response::headers(self)
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect()
    }

    async fn text(self) -> Result<String, Self::Error> {
        Ok(reqwest::Response::text(self).await?)
    }
}
