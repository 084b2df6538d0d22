//! The transport seam between `NetworkService` and the HTTP client doing I/O.
//!
//! # Design
//! `Transport` is the only place the crate touches the network. Tests swap in
//! a recording double; production code uses `UreqTransport`, which runs a
//! `ureq::Agent` on tokio's blocking pool. Status codes are never turned into
//! errors here: 4xx/5xx responses come back as data and the caller decides
//! what they mean.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use log::{debug, warn};
use ureq::http;

use crate::error::BoxError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, TransportResponse};

/// Sends one request and returns the raw bytes plus response metadata.
///
/// Implementations must not retry; timeouts and cancellation are whatever the
/// underlying client provides.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<TransportResponse, BoxError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<TransportResponse, BoxError> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<'a, T: Transport + ?Sized> Transport for &'a T {
    async fn send(&self, request: HttpRequest) -> Result<TransportResponse, BoxError> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn send(&self, request: HttpRequest) -> Result<TransportResponse, BoxError> {
        (**self).send(request).await
    }
}

/// `Transport` backed by a blocking `ureq::Agent`.
///
/// `send` hands the call to `tokio::task::spawn_blocking`, so it must be
/// polled inside a Tokio runtime; other executors panic.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    /// Default agent with `http_status_as_error` disabled so non-2xx
    /// responses reach the caller as data.
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Use a caller-configured agent (timeouts, proxies, TLS).
    ///
    /// The agent should have `http_status_as_error(false)`; otherwise error
    /// statuses surface as `NetworkError::RequestFailed`.
    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn send(&self, request: HttpRequest) -> Result<TransportResponse, BoxError> {
        let agent = self.agent.clone();
        let method = request.method;
        let url = request.url.clone();

        debug!("sending {method} {url}");
        let result = tokio::task::spawn_blocking(move || execute(&agent, request)).await?;
        match &result {
            Ok(response) => debug!("received {} bytes from {url}", response.body.len()),
            Err(err) => warn!("{method} {url} failed: {err}"),
        }
        result
    }
}

fn execute(agent: &ureq::Agent, request: HttpRequest) -> Result<TransportResponse, BoxError> {
    let mut builder = http::Request::builder()
        .method(to_http_method(request.method))
        .uri(request.url.as_str());
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    let mut response = match request.body {
        Some(body) => agent.run(builder.body(body.to_vec())?)?,
        None => agent.run(builder.body(())?)?,
    };

    let status = response.status().as_u16();
    let headers = collect_headers(response.headers());
    let body = response.body_mut().read_to_vec()?;

    Ok(TransportResponse::http(
        Bytes::from(body),
        HttpResponse {
            url: request.url,
            status,
            headers,
        },
    ))
}

fn to_http_method(method: HttpMethod) -> http::Method {
    match method {
        HttpMethod::Get => http::Method::GET,
        HttpMethod::Post => http::Method::POST,
        HttpMethod::Put => http::Method::PUT,
        HttpMethod::Patch => http::Method::PATCH,
        HttpMethod::Delete => http::Method::DELETE,
    }
}

/// Repeated headers are joined with `", "`; values that are not visible
/// ASCII are dropped.
fn collect_headers(headers: &http::HeaderMap) -> HashMap<String, String> {
    let mut collected: HashMap<String, String> = HashMap::new();
    for (name, value) in headers {
        let Ok(value) = value.to_str() else {
            continue;
        };
        collected
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    collected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn methods_map_to_http_tokens() {
        for method in [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Patch,
            HttpMethod::Delete,
        ] {
            assert_eq!(to_http_method(method).as_str(), method.as_str());
        }
    }

    #[test]
    #[should_panic]
    fn send_requires_tokio_runtime() {
        use std::future::Future;
        use std::task::{Context, Waker};

        let request = HttpRequest {
            method: HttpMethod::Get,
            url: url::Url::parse("http://127.0.0.1:9/").unwrap(),
            headers: HashMap::new(),
            body: None,
        };
        let transport = UreqTransport::new();
        let mut send = transport.send(request);
        let _ = send.as_mut().poll(&mut Context::from_waker(Waker::noop()));
    }

    #[test]
    fn repeated_headers_are_joined() {
        let mut headers = http::HeaderMap::new();
        headers.append("set-cookie", http::HeaderValue::from_static("a=1"));
        headers.append("set-cookie", http::HeaderValue::from_static("b=2"));
        headers.insert("content-length", http::HeaderValue::from_static("0"));

        let collected = collect_headers(&headers);
        assert_eq!(collected["set-cookie"], "a=1, b=2");
        assert_eq!(collected["content-length"], "0");
    }

    #[test]
    fn non_ascii_header_values_are_skipped() {
        let mut headers = http::HeaderMap::new();
        headers.insert("x-name", http::HeaderValue::from_bytes(b"caf\xc3\xa9").unwrap());

        assert!(collect_headers(&headers).is_empty());
    }
}
