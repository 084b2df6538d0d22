//! Thin async HTTP layer: endpoint descriptions in, raw responses out.
//!
//! # Overview
//! Callers describe a request with an `Endpoint` (base URL, path, method,
//! optional headers/body/query items). `NetworkService` turns it into an
//! `HttpRequest`, hands it to a `Transport` and returns the body bytes with
//! the response's status and headers.
//!
//! # Design
//! - One transport call per `request`; no retries, caching or timeouts of
//!   its own. Whatever the transport offers for those is what you get.
//! - `Transport` is the I/O seam. `UreqTransport` is the production
//!   implementation; tests substitute a recording double.
//! - Status codes are data. `request` never produces `ServerError`; use
//!   `request_json` or the `response` helpers when you want them interpreted.

pub mod endpoint;
pub mod error;
pub mod http;
pub mod response;
pub mod service;
pub mod transport;

pub use endpoint::{ApiEndpoint, Endpoint, QueryItem};
pub use error::{BoxError, NetworkError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, ResponseMetadata, TransportResponse};
pub use service::NetworkService;
pub use transport::{Transport, UreqTransport};
