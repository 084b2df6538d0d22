//! Helpers for callers that want status codes and JSON bodies interpreted.
//!
//! `NetworkService::request` returns responses as received; these functions
//! are where `ServerError` and `DecodingError` come from.

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::NetworkError;
use crate::http::HttpResponse;

/// Map non-2xx statuses to `NetworkError::ServerError`, keeping the body
/// when there is one.
pub fn validate_status(response: &HttpResponse, body: &Bytes) -> Result<(), NetworkError> {
    if response.is_success() {
        return Ok(());
    }
    Err(NetworkError::ServerError {
        status: response.status,
        body: (!body.is_empty()).then(|| body.clone()),
    })
}

pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, NetworkError> {
    serde_json::from_slice(body).map_err(NetworkError::decoding)
}
