//! Error types for feed ingestion.
//!
//! Only two things can fail in a poll cycle: the feed URL can be unusable at
//! the call site, or the relay round-trip can fail. Parsing and normalization
//! never produce errors; an empty feed is an empty success.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// The category of a feed error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedErrorCode {
    /// The feed URL was missing or blank. Raised before any network activity.
    InvalidInput,
    /// Relay unreachable, timed out, answered with a non-success status, or
    /// sent a body that could not be read.
    NetworkError,
    /// The relay client could not be built from its configuration.
    ConfigurationError,
}

impl FeedErrorCode {
    /// Returns a machine-friendly name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::NetworkError => "network_error",
            Self::ConfigurationError => "configuration_error",
        }
    }
}

impl fmt::Display for FeedErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error raised while retrieving a feed.
#[derive(Debug, Clone, Error)]
pub struct FeedError {
    code: FeedErrorCode,
    message: String,
    /// HTTP status returned by the relay, when the failure was a status.
    status: Option<u16>,
    /// Reason phrase matching `status`.
    status_text: Option<String>,
    #[source]
    source: Option<Arc<dyn std::error::Error + Send + Sync>>,
}

impl FeedError {
    /// Creates a new feed error with the given code and message.
    pub fn new(code: FeedErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            status_text: None,
            source: None,
        }
    }

    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(FeedErrorCode::InvalidInput, message)
    }

    /// Creates a network error for a transport-level failure.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(FeedErrorCode::NetworkError, message)
    }

    /// Creates a network error for a non-success relay status.
    pub fn http_status(status: u16, status_text: impl Into<String>) -> Self {
        let status_text = status_text.into();
        let mut err = Self::network(format!("HTTP error! status: {} {}", status, status_text));
        err.status = Some(status);
        err.status_text = Some(status_text);
        err
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(FeedErrorCode::ConfigurationError, message)
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Arc::new(source));
        self
    }

    pub fn code(&self) -> FeedErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the relay HTTP status, if the failure was a status.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status_text.as_deref()
    }
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for feed operations.
pub type FeedResult<T> = Result<T, FeedError>;
