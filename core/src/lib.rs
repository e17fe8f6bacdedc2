//! Request adapter for a legacy model/collection persistence layer.
//!
//! # Overview
//! The persistence layer describes a request as `RequestOptions` (url, `type`,
//! data, headers, `dataType`). The adapter normalizes them into a
//! `Descriptor`, sends it through an injected `Transport`, and resolves with
//! the parsed body or fails with an `AdapterError`.
//!
//! # Design
//! - `normalize` is pure: options are borrowed, never mutated.
//! - The transport is a trait (`Transport`) handed to `Adapter::new`; the
//!   `reqwest` feature provides a ready implementation.
//! - The returned future's `Result` decides the outcome. Legacy
//!   success/error callbacks (`Callbacks`) are derived from it.
//! - HTTP failures carry the response and its parsed body; transport
//!   failures are passed through unchanged with no response attached.

pub mod adapter;
pub mod config;
pub mod error;
pub mod http;
pub mod normalize;
pub mod options;
#[cfg(feature = "reqwest")]
pub mod reqwest_transport;
pub mod transport;

pub use adapter::{ajax, Adapter, Callbacks};
pub use config::{AdapterConfig, NoContentPolicy};
pub use error::{AdapterError, HttpFailure};
pub use http::{Descriptor, HttpMethod, ResponseBody, ResponseMeta};
pub use options::{DataType, RequestData, RequestOptions};
#[cfg(feature = "reqwest")]
pub use reqwest_transport::{ReqwestTransport, ReqwestTransportError};
pub use transport::{Transport, TransportResponse};
