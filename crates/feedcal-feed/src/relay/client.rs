//! HTTP client for the feed relay.
//!
//! The relay fetches feeds server-side so that the caller is not subject to
//! cross-origin restrictions. This client only knows the relay's contract:
//! `GET {base}?url=<encoded feed>` answers with the raw feed text.

use reqwest::{Client, Response};
use tracing::{debug, trace, warn};

use crate::error::{FeedError, FeedResult};
use crate::source::{BoxFuture, FeedSource};

use super::config::RelayConfig;

/// HTTP client for relay requests.
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: Client,
    config: RelayConfig,
}

impl RelayClient {
    /// Creates a new relay client with the given configuration.
    pub fn new(config: RelayConfig) -> FeedResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                FeedError::configuration(format!("Failed to create HTTP client: {}", e))
                    .with_source(e)
            })?;

        Ok(Self { client, config })
    }

    /// Fetches a feed through the relay.
    ///
    /// `normalized_url` should already have gone through
    /// [`normalize_feed_url`](crate::feed_url::normalize_feed_url).
    ///
    /// # Errors
    ///
    /// Returns a `NetworkError` carrying the status code and reason on a
    /// non-2xx relay answer, or the underlying cause on a transport failure.
    pub async fn fetch_via_relay(&self, normalized_url: &str) -> FeedResult<String> {
        let request_url = self.config.request_url(normalized_url);
        debug!(feed = %normalized_url, "Fetching calendar through relay");
        trace!(url = %request_url, "Sending relay request");

        let response = self.client.get(&request_url).send().await.map_err(|e| {
            FeedError::network(format!("Relay request failed: {}", e)).with_source(e)
        })?;

        self.handle_response(response).await
    }

    /// Checks the relay status and extracts the body.
    async fn handle_response(&self, response: Response) -> FeedResult<String> {
        let status = response.status();
        trace!(status = %status, "Received relay response");

        if !status.is_success() {
            warn!(status = %status, "Relay returned an error status");
            return Err(FeedError::http_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ));
        }

        let body = response.text().await.map_err(|e| {
            FeedError::network(format!("Failed to read relay response: {}", e)).with_source(e)
        })?;
        debug!(bytes = body.len(), "Received calendar data");
        Ok(body)
    }

    /// Returns the configuration.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

impl FeedSource for RelayClient {
    fn name(&self) -> &str {
        "relay"
    }

    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, FeedResult<String>> {
        Box::pin(self.fetch_via_relay(url))
    }
}
