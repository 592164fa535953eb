//! Outbound fetch.
//!
//! One GET per relayed request, no retries, no caching. The response is
//! returned unread so the body can be streamed; dropping it closes the
//! upstream connection.

use std::time::{Duration, Instant};

use reqwest::{redirect, Client, Response};
use url::Url;

use crate::config::UpstreamConfig;
use crate::error::{RelayError, RelayResult};
use crate::observability::metrics;
use crate::relay::headers::OutboundHeaders;

/// HTTP client used for every upstream request.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    headers: OutboundHeaders,
}

impl UpstreamClient {
    /// Build the client with the configured timeouts and redirect policy.
    pub fn new(config: &UpstreamConfig, headers: OutboundHeaders) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .read_timeout(Duration::from_secs(config.read_timeout_secs))
            .redirect(redirect::Policy::limited(config.max_redirects))
            .no_proxy()
            .build()?;
        Ok(Self { client, headers })
    }

    /// Issue the outbound GET and wait for the response headers.
    ///
    /// Transport failures become [`RelayError::Transport`]; any status other
    /// than 200 becomes [`RelayError::UpstreamStatus`] and the response is
    /// dropped before returning.
    pub async fn fetch(&self, target: Url) -> RelayResult<Response> {
        let start = Instant::now();
        let response = self
            .client
            .get(target)
            .headers(self.headers.to_header_map())
            .send()
            .await?;
        metrics::record_upstream_latency(start);

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(RelayError::UpstreamStatus(status.as_u16()));
        }
        Ok(response)
    }
}
