//! Response shaping for relayed streams.
//!
//! Four headers always reach the caller: `Content-Type` (upstream value or
//! `video/mp4`), `Content-Length` (upstream value when present),
//! `Accept-Ranges` and `Cache-Control`. `Content-Encoding` is passed through
//! when the upstream compressed the body despite being asked not to, since
//! the bytes are relayed undecoded. Everything else the upstream sent is
//! dropped, including hop-by-hop headers.

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::Response,
};

use crate::error::{RelayError, RelayResult};
use crate::relay::body::RelayBody;

/// Content type used when the upstream does not send one.
pub const DEFAULT_CONTENT_TYPE: &str = "video/mp4";

/// Fixed `Cache-Control` sent on relayed streams.
pub const CACHE_CONTROL: &str = "public, max-age=3600";

/// Headers sent to the caller for a relayed stream.
///
/// `Accept-Ranges: bytes` is advertised even though `Range` requests are
/// not forwarded upstream; clients that try a range get the full body.
pub fn relay_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(5);

    let content_type = upstream
        .get(header::CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
    headers.insert(header::CONTENT_TYPE, content_type);

    if let Some(length) = upstream.get(header::CONTENT_LENGTH) {
        headers.insert(header::CONTENT_LENGTH, length.clone());
    }
    if let Some(encoding) = upstream.get(header::CONTENT_ENCODING) {
        headers.insert(header::CONTENT_ENCODING, encoding.clone());
    }

    headers.insert(header::ACCEPT_RANGES, HeaderValue::from_static("bytes"));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL));
    headers
}

/// Turn a successful upstream response into the streamed caller response.
pub fn stream_response(
    upstream: reqwest::Response,
    chunk_size: usize,
    request_id: String,
) -> RelayResult<Response> {
    let status = StatusCode::from_u16(upstream.status().as_u16())
        .map_err(|e| RelayError::Unexpected(e.to_string()))?;
    let headers = relay_headers(upstream.headers());
    let body = RelayBody::new(upstream.bytes_stream(), chunk_size, request_id);

    let mut response = Response::new(Body::from_stream(body));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}
