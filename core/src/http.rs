//! HTTP request and response types exchanged with a `Transport`.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The
//! `NetworkService` builds an `HttpRequest` from an endpoint description and
//! hands it to a transport; the transport answers with raw bytes plus
//! `ResponseMetadata`. Only HTTP-shaped metadata (status + headers) is
//! accepted by the service, so transports for other schemes can still report
//! what they got without the service having to guess.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use url::Url;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// The upper-case token sent on the request line.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the supported method tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported HTTP method: {0}")]
pub struct ParseMethodError(pub String);

impl FromStr for HttpMethod {
    type Err = ParseMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            other => Err(ParseMethodError(other.to_string())),
        }
    }
}

/// A fully resolved request, ready for a transport to execute.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: HashMap<String, String>,
    pub body: Option<Bytes>,
}

/// Status line and headers of an HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub url: Url,
    pub status: u16,
    pub headers: HashMap<String, String>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Metadata a transport reports alongside the response bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseMetadata {
    Http(HttpResponse),
    /// A response without a status line or headers, e.g. from a `file:` or
    /// `data:` loader.
    Other { url: Option<Url> },
}

/// What a transport hands back for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub body: Bytes,
    pub metadata: ResponseMetadata,
}

impl TransportResponse {
    pub fn http(body: impl Into<Bytes>, response: HttpResponse) -> Self {
        Self {
            body: body.into(),
            metadata: ResponseMetadata::Http(response),
        }
    }
}
