//! Endpoint descriptions consumed by `NetworkService`.
//!
//! # Design
//! `Endpoint` only requires the target and the verb. Headers, body and query
//! items have defaults so most implementors are three accessors long. Nothing
//! is validated here: a malformed base URL surfaces as
//! `NetworkError::InvalidUrl` when the service builds the request.

use std::collections::HashMap;

use bytes::Bytes;

use crate::http::HttpMethod;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// Headers sent when an endpoint does not override `Endpoint::headers`.
pub fn default_headers() -> HashMap<String, String> {
    HashMap::from([(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())])
}

/// One `name=value` pair of a query string. A missing value is sent as a
/// bare key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryItem {
    pub name: String,
    pub value: Option<String>,
}

impl QueryItem {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }
}

/// Description of a single HTTP request.
pub trait Endpoint {
    fn base_url(&self) -> &str;

    /// Appended verbatim to `base_url`.
    fn path(&self) -> &str;

    fn method(&self) -> HttpMethod;

    /// Replaces every header the transport would otherwise send.
    fn headers(&self) -> HashMap<String, String> {
        default_headers()
    }

    fn body(&self) -> Option<Bytes> {
        None
    }

    fn query_items(&self) -> Option<Vec<QueryItem>> {
        None
    }
}

/// Plain-data `Endpoint` for callers that do not need a dedicated type.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiEndpoint {
    pub base_url: String,
    pub path: String,
    pub method: HttpMethod,
    /// `None` falls back to `default_headers()`.
    pub headers: Option<HashMap<String, String>>,
    pub body: Option<Bytes>,
    pub query_items: Option<Vec<QueryItem>>,
}

impl ApiEndpoint {
    pub fn new(base_url: impl Into<String>, path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            base_url: base_url.into(),
            path: path.into(),
            method,
            headers: None,
            body: None,
            query_items: None,
        }
    }

    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_query_items(mut self, query_items: Vec<QueryItem>) -> Self {
        self.query_items = Some(query_items);
        self
    }
}

impl Endpoint for ApiEndpoint {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn method(&self) -> HttpMethod {
        self.method
    }

    fn headers(&self) -> HashMap<String, String> {
        self.headers.clone().unwrap_or_else(default_headers)
    }

    fn body(&self) -> Option<Bytes> {
        self.body.clone()
    }

    fn query_items(&self) -> Option<Vec<QueryItem>> {
        self.query_items.clone()
    }
}
