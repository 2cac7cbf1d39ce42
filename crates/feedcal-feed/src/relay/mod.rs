//! Relay-backed feed retrieval.
//!
//! # Example
//!
//! ```ignore
//! use feedcal_feed::relay::{RelayClient, RelayConfig};
//!
//! let client = RelayClient::new(RelayConfig::new("https://relay.example.com/api/proxy")?)?;
//! let text = client.fetch_via_relay("https://example.com/cal.ics").await?;
//! ```

mod client;
mod config;

pub use client::RelayClient;
pub use config::RelayConfig;
