//! FeedSource trait definition.
//!
//! A [`FeedSource`] turns an already-normalized feed URL into raw ICS text.
//! The relay client is the production implementation; the pipeline and the
//! poll scheduler only see this trait.

use std::future::Future;
use std::pin::Pin;

use crate::error::FeedResult;

/// A boxed future for async trait methods.
///
/// Boxing keeps the trait object-safe so the scheduler can hold an
/// `Arc<dyn FeedSource>`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Where feed text comes from.
///
/// # Example Implementation
///
/// ```ignore
/// struct Fixture(String);
///
/// impl FeedSource for Fixture {
///     fn name(&self) -> &str { "fixture" }
///
///     fn fetch<'a>(&'a self, _url: &'a str) -> BoxFuture<'a, FeedResult<String>> {
///         Box::pin(async move { Ok(self.0.clone()) })
///     }
/// }
/// ```
pub trait FeedSource: Send + Sync {
    /// Short name used in logs (e.g. "relay").
    fn name(&self) -> &str;

    /// Fetches the raw text of the feed at `url`.
    ///
    /// # Errors
    ///
    /// Returns a `NetworkError` when the feed cannot be retrieved. Sources do
    /// not retry.
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, FeedResult<String>>;
}

/// A source that serves the same text for every URL.
///
/// Used for reading a local `.ics` file and in tests.
#[derive(Debug, Clone)]
pub struct StaticSource {
    text: String,
}

impl StaticSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl FeedSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch<'a>(&'a self, _url: &'a str) -> BoxFuture<'a, FeedResult<String>> {
        Box::pin(async move { Ok(self.text.clone()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_source_ignores_url() {
        let source = StaticSource::new("BEGIN:VCALENDAR");
        assert_eq!(source.fetch("https://a").await.unwrap(), "BEGIN:VCALENDAR");
        assert_eq!(source.fetch("https://b").await.unwrap(), "BEGIN:VCALENDAR");
    }
}
