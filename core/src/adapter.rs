//! The request adapter: dispatch a normalized request and classify the outcome.
//!
//! # Design
//! `Adapter::send` returns a future resolving to
//! `Result<ResponseBody, AdapterError<E>>`. That result is the only source of
//! truth. Legacy `success`/`error` callbacks are derived from it once it is
//! known and run before the future completes, so a caller awaiting the future
//! always sees the callback's side effects. Callbacks cannot change the
//! result: supplying an `error` callback never turns a failure into success.
//!
//! Futures are lazy. Building one and dropping it unpolled sends nothing and
//! runs no callback. There is no retry, timeout or cancellation; if the
//! transport never settles, neither does the adapter.

use tracing::{debug, warn};

use crate::config::{AdapterConfig, NoContentPolicy};
use crate::error::{AdapterError, HttpFailure};
use crate::http::{HttpMethod, ResponseBody, ResponseMeta};
use crate::normalize::normalize;
use crate::options::RequestOptions;
use crate::transport::{Transport, TransportResponse};

const NO_CONTENT: u16 = 204;

pub type SuccessCallback = Box<dyn FnOnce(&ResponseBody) + Send>;
pub type ErrorCallback<E> = Box<dyn FnOnce(&AdapterError<E>) + Send>;

/// Legacy notification hooks.
pub struct Callbacks<E> {
    success: Option<SuccessCallback>,
    error: Option<ErrorCallback<E>>,
}

impl<E> Default for Callbacks<E> {
    fn default() -> Self {
        Self {
            success: None,
            error: None,
        }
    }
}

impl<E> Callbacks<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the parsed body of a 2xx response.
    pub fn on_success(mut self, callback: impl FnOnce(&ResponseBody) + Send + 'static) -> Self {
        self.success = Some(Box::new(callback));
        self
    }

    /// Called with every failure: HTTP, transport and parse.
    pub fn on_error(mut self, callback: impl FnOnce(&AdapterError<E>) + Send + 'static) -> Self {
        self.error = Some(Box::new(callback));
        self
    }

    fn settle(self, outcome: &Result<ResponseBody, AdapterError<E>>) {
        match outcome {
            Ok(body) => {
                if let Some(success) = self.success {
                    success(body);
                }
            }
            Err(error) => {
                if let Some(on_error) = self.error {
                    on_error(error);
                }
            }
        }
    }
}

impl<E> std::fmt::Debug for Callbacks<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("success", &self.success.is_some())
            .field("error", &self.error.is_some())
            .finish()
    }
}

/// Sends `RequestOptions` through an injected `Transport`.
///
/// Holds no per-request state; concurrent sends through one adapter are
/// independent.
#[derive(Debug, Clone)]
pub struct Adapter<T> {
    transport: T,
    config: AdapterConfig,
}

impl<T: Transport> Adapter<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, AdapterConfig::default())
    }

    pub fn with_config(transport: T, config: AdapterConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn send(
        &self,
        options: &RequestOptions,
    ) -> Result<ResponseBody, AdapterError<T::Error>> {
        self.send_with_callbacks(options, Callbacks::default()).await
    }

    /// Like `send`, also notifying `callbacks` once the outcome is known.
    pub async fn send_with_callbacks(
        &self,
        options: &RequestOptions,
        callbacks: Callbacks<T::Error>,
    ) -> Result<ResponseBody, AdapterError<T::Error>> {
        let outcome = self.dispatch(options).await;
        callbacks.settle(&outcome);
        outcome
    }

    #[tracing::instrument(name = "ajax", skip_all, fields(method = %options.method, url = %options.url))]
    async fn dispatch(
        &self,
        options: &RequestOptions,
    ) -> Result<ResponseBody, AdapterError<T::Error>> {
        let descriptor = normalize(options, &self.config);
        debug!(target_url = %descriptor.url, "dispatching request");

        let response = match self.transport.fetch(&descriptor.url, &descriptor).await {
            Ok(response) => response,
            Err(error) => {
                warn!(%error, "transport failed before a response was received");
                return Err(AdapterError::Transport(error));
            }
        };

        let meta = response.meta();
        let data = self.read_body(options, &meta, response).await?;

        if meta.ok {
            debug!(status = meta.status, "request succeeded");
            Ok(data)
        } else {
            warn!(status = meta.status, status_text = %meta.status_text, "request failed");
            Err(AdapterError::Http(HttpFailure {
                response: meta,
                response_data: data,
            }))
        }
    }

    /// Read the body the same way for ok and failing responses.
    async fn read_body(
        &self,
        options: &RequestOptions,
        meta: &ResponseMeta,
        response: T::Response,
    ) -> Result<ResponseBody, AdapterError<T::Error>> {
        // HEAD responses have no body to read.
        if options.method == HttpMethod::Head {
            return Ok(ResponseBody::Empty);
        }

        let text = response.text().await.map_err(AdapterError::Transport)?;
        let no_content_as_text =
            meta.status == NO_CONTENT && self.config.no_content == NoContentPolicy::ReadAsText;

        if options.reads_json() && !no_content_as_text {
            serde_json::from_str(&text)
                .map(ResponseBody::Json)
                .map_err(AdapterError::Parse)
        } else {
            Ok(ResponseBody::Text(text))
        }
    }
}

/// Send `options` through `transport` with the default configuration.
pub async fn ajax<T: Transport>(
    transport: &T,
    options: &RequestOptions,
) -> Result<ResponseBody, AdapterError<T::Error>> {
    Adapter::new(transport).send(options).await
}
