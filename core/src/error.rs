//! Error types for the networking layer.
//!
//! # Design
//! `NetworkService::request` only ever produces `InvalidUrl`, `RequestFailed`
//! and `InvalidResponse`. `ServerError` and `DecodingError` belong to the
//! interpretation helpers in `response`, which sit on top of the raw request.
//! Wrapped causes are kept as the original boxed error so callers can
//! `downcast_ref` back to the transport's own type.

use bytes::Bytes;

/// Boxed error produced by a transport or decoder.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// `base_url + path` (plus query items) is not a well-formed URL.
    #[error("the provided URL is invalid")]
    InvalidUrl,

    /// The transport raised an error; the original error is the source.
    #[error("the network request failed: {0}")]
    RequestFailed(#[source] BoxError),

    /// The transport answered with metadata that has no status or headers.
    #[error("received an invalid response from the server")]
    InvalidResponse,

    #[error("server returned an error with status code: {status}")]
    ServerError { status: u16, body: Option<Bytes> },

    #[error("failed to decode the response: {0}")]
    DecodingError(#[source] BoxError),

    #[error("an unknown error occurred")]
    Unknown,
}

impl NetworkError {
    pub fn request_failed(cause: impl Into<BoxError>) -> Self {
        NetworkError::RequestFailed(cause.into())
    }

    pub fn decoding(cause: impl Into<BoxError>) -> Self {
        NetworkError::DecodingError(cause.into())
    }

    /// Status code carried by `ServerError`.
    pub fn status(&self) -> Option<u16> {
        match self {
            NetworkError::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Variants compare by kind only, except `ServerError` which also compares
/// the status code. Wrapped causes and bodies are ignored.
impl PartialEq for NetworkError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NetworkError::InvalidUrl, NetworkError::InvalidUrl)
            | (NetworkError::RequestFailed(_), NetworkError::RequestFailed(_))
            | (NetworkError::InvalidResponse, NetworkError::InvalidResponse)
            | (NetworkError::DecodingError(_), NetworkError::DecodingError(_))
            | (NetworkError::Unknown, NetworkError::Unknown) => true,
            (
                NetworkError::ServerError { status: lhs, .. },
                NetworkError::ServerError { status: rhs, .. },
            ) => lhs == rhs,
            _ => false,
        }
    }
}
