//! Relay client configuration.

use std::time::Duration;
use url::Url;

/// Configuration for the relay client.
///
/// The relay address is always explicit: the caller decides whether it talks
/// to a locally running relay or a deployed one.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Full address of the relay's proxy endpoint (e.g. `https://host/api/proxy`).
    pub base_url: Url,

    /// Request timeout.
    pub timeout: Duration,

    /// User agent string.
    pub user_agent: String,
}

impl RelayConfig {
    /// Address of a relay running next to a development build.
    pub const LOCAL_BASE_URL: &'static str = "http://localhost:3000/api/proxy";

    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Creates a new relay configuration with the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, url::ParseError> {
        let parsed = Url::parse(base_url.as_ref())?;
        Ok(Self {
            base_url: parsed,
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("feedcal/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    /// Configuration for the development relay on localhost.
    pub fn local() -> Self {
        Self::new(Self::LOCAL_BASE_URL).expect("local relay URL should be valid")
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Builds the relay request URL for a feed: `{base_url}?url=<encoded feed>`.
    pub fn request_url(&self, feed_url: &str) -> String {
        format!(
            "{}?url={}",
            self.base_url.as_str(),
            urlencoding::encode(feed_url)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_creation() {
        let config = RelayConfig::new("https://relay.example.com/api/proxy").unwrap();
        assert_eq!(config.base_url.as_str(), "https://relay.example.com/api/proxy");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("feedcal/"));
    }

    #[test]
    fn local_preset() {
        let config = RelayConfig::local();
        assert_eq!(config.base_url.as_str(), RelayConfig::LOCAL_BASE_URL);
    }

    #[test]
    fn builder_methods() {
        let config = RelayConfig::local()
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("test-agent");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "test-agent");
    }

    #[test]
    fn request_url_encodes_feed() {
        let config = RelayConfig::local();
        assert_eq!(
            config.request_url("https://example.com/cal.ics?a=1&b=2"),
            "http://localhost:3000/api/proxy?url=https%3A%2F%2Fexample.com%2Fcal.ics%3Fa%3D1%26b%3D2"
        );
    }

    #[test]
    fn invalid_url_returns_error() {
        assert!(RelayConfig::new("not a url").is_err());
    }
}
