//! `GET /proxy?url=<target>` handler.

use axum::{
    extract::{RawQuery, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};

use crate::error::{RelayError, RelayResult};
use crate::http::request::request_id;
use crate::http::response::stream_response;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::relay::validator;

/// Validate the target, fetch it, and stream it back.
pub async fn proxy_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let request_id = request_id(&headers);

    match relay(&state, query.as_deref(), &request_id).await {
        Ok(response) => {
            metrics::record_request("streamed");
            response
        }
        Err(e) => {
            match &e {
                RelayError::MissingUrl | RelayError::InvalidUrl => {
                    tracing::debug!(request_id = %request_id, error = %e, "Rejected relay request");
                }
                RelayError::UpstreamStatus(status) => {
                    tracing::warn!(request_id = %request_id, status = *status, "Upstream refused");
                }
                RelayError::Transport(_) | RelayError::Unexpected(_) => {
                    tracing::error!(request_id = %request_id, error = %e, "Relay failed");
                }
            }
            metrics::record_request(e.outcome());
            e.into_response()
        }
    }
}

async fn relay(state: &AppState, query: Option<&str>, request_id: &str) -> RelayResult<Response> {
    let raw = target_param(query).ok_or(RelayError::MissingUrl)?;
    let target = validator::parse_target(&raw).ok_or(RelayError::InvalidUrl)?;

    tracing::info!(
        request_id = %request_id,
        target = %target,
        mp4 = validator::has_mp4_extension(&target),
        "Relaying"
    );

    let upstream = state.upstream.fetch(target).await?;
    stream_response(upstream, state.chunk_size, request_id.to_string())
}

/// First `url` query parameter, if present and non-empty.
pub fn target_param(query: Option<&str>) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == "url")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_param() {
        assert_eq!(target_param(None), None);
        assert_eq!(target_param(Some("")), None);
        assert_eq!(target_param(Some("url=")), None);
        assert_eq!(target_param(Some("other=1")), None);
        assert_eq!(
            target_param(Some("url=https%3A%2F%2Fexample.com%2Fv.mp4")).as_deref(),
            Some("https://example.com/v.mp4")
        );
        assert_eq!(target_param(Some("url=not+a+url")).as_deref(), Some("not a url"));
    }

    #[test]
    fn test_first_url_param_wins() {
        assert_eq!(
            target_param(Some("url=https://a.example/1.mp4&url=https://b.example/2.mp4")).as_deref(),
            Some("https://a.example/1.mp4")
        );
    }
}
