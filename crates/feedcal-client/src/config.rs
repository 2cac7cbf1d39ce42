//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/feedcal/config.toml` by default:
//!
//! ```toml
//! debug = false
//!
//! [relay]
//! base_url = "https://calendar.example.com/api/proxy"
//! timeout_secs = 30
//!
//! [poll]
//! interval_secs = 300
//!
//! [feed]
//! url = "webcal://example.com/team.ics"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use feedcal_feed::RelayConfig;
use feedcal_server::SchedulerConfig;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Configuration for the feedcal client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// Relay settings.
    pub relay: RelaySettings,

    /// Polling settings.
    pub poll: PollSettings,

    /// Default feed.
    pub feed: FeedSettings,
}

/// Relay settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelaySettings {
    /// Relay proxy endpoint.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            base_url: RelayConfig::LOCAL_BASE_URL.to_string(),
            timeout_secs: RelayConfig::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Polling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollSettings {
    pub interval_secs: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval_secs: SchedulerConfig::DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

/// Default feed, used when no URL is given on the command line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    pub url: Option<String>,
}

impl ClientConfig {
    /// Loads configuration from the default path.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> ClientResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content)
            .map_err(|e| ClientError::Config(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("feedcal")
    }

    /// Builds the relay client configuration. `base_url` overrides the file.
    pub fn relay_config(&self, base_url: Option<&str>) -> ClientResult<RelayConfig> {
        let base_url = base_url.unwrap_or(&self.relay.base_url);
        let config = RelayConfig::new(base_url).map_err(|e| {
            ClientError::Config(format!("invalid relay URL {:?}: {}", base_url, e))
        })?;
        Ok(config.with_timeout(Duration::from_secs(self.relay.timeout_secs)))
    }

    /// Builds the scheduler configuration.
    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig::new(Duration::from_secs(self.poll.interval_secs))
    }

    /// Picks the feed URL: the command-line argument, else `[feed] url`.
    pub fn feed_url(&self, arg: Option<String>) -> ClientResult<String> {
        arg.or_else(|| self.feed.url.clone()).ok_or_else(|| {
            ClientError::Config(
                "no feed URL given; pass one or set [feed] url in the config file".to_string(),
            )
        })
    }
}
