//! The outbound contract: what a request primitive must provide.
//!
//! The adapter never reaches for an ambient client. A `Transport` is handed to
//! `Adapter::new`, so tests can substitute a recording stub and hosts can plug
//! in whatever HTTP stack they already run.

use async_trait::async_trait;

use crate::http::{Descriptor, ResponseMeta};

/// A received response whose body has not been read yet.
#[async_trait]
pub trait TransportResponse: Send {
    type Error: std::error::Error + Send + Sync + 'static;

    fn status(&self) -> u16;

    /// Reason phrase, e.g. `Bad Request`.
    fn status_text(&self) -> String;

    fn headers(&self) -> Vec<(String, String)>;

    /// Whether the transport considers the response successful. Defaults to
    /// 2xx; the adapter classifies on this flag, not on the status code.
    fn ok(&self) -> bool {
        (200..300).contains(&self.status())
    }

    /// Consume the response and read its body as text.
    async fn text(self) -> Result<String, Self::Error>;

    /// Snapshot of the status line and headers.
    fn meta(&self) -> ResponseMeta {
        ResponseMeta {
            status: self.status(),
            status_text: self.status_text(),
            ok: self.ok(),
            headers: self.headers(),
        }
    }
}

/// Issues a single request and resolves with the response, or with the
/// transport's own error when no response could be obtained.
#[async_trait]
pub trait Transport: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;
    type Response: TransportResponse<Error = Self::Error>;

    async fn fetch(&self, url: &str, descriptor: &Descriptor) -> Result<Self::Response, Self::Error>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for &T {
    type Error = T::Error;
    type Response = T::Response;

    async fn fetch(&self, url: &str, descriptor: &Descriptor) -> Result<Self::Response, Self::Error> {
        (**self).fetch(url, descriptor).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    type Error = T::Error;
    type Response = T::Response;

    async fn fetch(&self, url: &str, descriptor: &Descriptor) -> Result<Self::Response, Self::Error> {
        (**self).fetch(url, descriptor).await
    }
}
