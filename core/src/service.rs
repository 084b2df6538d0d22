//! Request executor: endpoint description in, raw response out.
//!
//! # Design
//! `NetworkService` holds only its transport and carries no mutable state
//! between calls, so one instance can serve concurrent callers. Each call to
//! `request` resolves the URL, builds an `HttpRequest`, awaits exactly one
//! transport call and maps the outcome onto `NetworkError`. Status codes are
//! passed through untouched; `request_json` is the opt-in layer that
//! interprets them.

use bytes::Bytes;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;
use url::Url;

use crate::endpoint::{Endpoint, QueryItem};
use crate::error::NetworkError;
use crate::http::{HttpRequest, HttpResponse, ResponseMetadata};
use crate::response;
use crate::transport::{Transport, UreqTransport};

/// Characters escaped in query item names and values: everything the URL
/// query grammar forbids, plus the pair delimiters and `+`. Non-ASCII is
/// always escaped.
const QUERY_ITEM: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Executes `Endpoint` descriptions through a `Transport`.
#[derive(Debug, Clone, Default)]
pub struct NetworkService<T = UreqTransport> {
    transport: T,
}

impl NetworkService<UreqTransport> {
    /// Service backed by a default `ureq` agent.
    ///
    /// Requests must be awaited inside a Tokio runtime; see `UreqTransport`.
    pub fn new() -> Self {
        Self::with_transport(UreqTransport::new())
    }
}

impl<T: Transport> NetworkService<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send the request described by `endpoint` and return the body and
    /// response metadata as received, whatever the status code.
    pub async fn request<E>(&self, endpoint: &E) -> Result<(Bytes, HttpResponse), NetworkError>
    where
        E: Endpoint + ?Sized,
    {
        let request = build_request(endpoint)?;

        let response = self
            .transport
            .send(request)
            .await
            .map_err(NetworkError::RequestFailed)?;

        match response.metadata {
            ResponseMetadata::Http(metadata) => Ok((response.body, metadata)),
            ResponseMetadata::Other { .. } => Err(NetworkError::InvalidResponse),
        }
    }

    /// `request`, then reject non-2xx statuses and decode the body as JSON.
    pub async fn request_json<R, E>(&self, endpoint: &E) -> Result<R, NetworkError>
    where
        R: DeserializeOwned,
        E: Endpoint + ?Sized,
    {
        let (body, metadata) = self.request(endpoint).await?;
        response::validate_status(&metadata, &body)?;
        response::decode_json(&body)
    }
}

/// Resolve `endpoint` into the request a transport would receive, without
/// sending it.
pub fn build_request<E>(endpoint: &E) -> Result<HttpRequest, NetworkError>
where
    E: Endpoint + ?Sized,
{
    let url = resolve_url(
        endpoint.base_url(),
        endpoint.path(),
        endpoint.query_items().as_deref(),
    )?;

    Ok(HttpRequest {
        method: endpoint.method(),
        url,
        headers: endpoint.headers(),
        body: endpoint.body(),
    })
}

/// Concatenate `base_url` and `path`, parse the result, then append
/// `query_items` in order.
///
/// Names and values are percent-encoded (`a b` becomes `a%20b`), not
/// form-encoded.
///
/// Whitespace and control characters anywhere in the concatenation make the
/// URL invalid rather than being percent-encoded.
pub fn resolve_url(
    base_url: &str,
    path: &str,
    query_items: Option<&[QueryItem]>,
) -> Result<Url, NetworkError> {
    let candidate = format!("{base_url}{path}");
    if candidate.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(NetworkError::InvalidUrl);
    }
    let mut url = Url::parse(&candidate).map_err(|_| NetworkError::InvalidUrl)?;

    if let Some(items) = query_items.filter(|items| !items.is_empty()) {
        let appended = items
            .iter()
            .map(encode_query_item)
            .collect::<Vec<_>>()
            .join("&");
        let query = match url.query() {
            Some(existing) if !existing.is_empty() => format!("{existing}&{appended}"),
            _ => appended,
        };
        url.set_query(Some(&query));
    }

    Ok(url)
}

fn encode_query_item(item: &QueryItem) -> String {
    let name = utf8_percent_encode(&item.name, QUERY_ITEM);
    match &item.value {
        Some(value) => format!("{name}={}", utf8_percent_encode(value, QUERY_ITEM)),
        None => name.to_string(),
    }
}
