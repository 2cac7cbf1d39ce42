//! One-shot fetch.

use std::path::Path;

use chrono::Utc;
use feedcal_feed::{FeedSource, RelayClient, StaticSource, fetch_feed_events};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::output;

/// Runs one poll cycle through the relay and prints the events.
pub async fn from_relay(
    url: Option<String>,
    relay_url: Option<&str>,
    json: bool,
    config: &ClientConfig,
) -> ClientResult<()> {
    let url = config.feed_url(url)?;
    let client = RelayClient::new(config.relay_config(relay_url)?)?;
    print_events(&client, &url, json).await
}

/// Runs the same pipeline over a local `.ics` file.
pub async fn from_file(file: &Path, json: bool) -> ClientResult<()> {
    let text = std::fs::read_to_string(file)?;
    debug!(path = %file.display(), bytes = text.len(), "Read local feed");
    let source = StaticSource::new(text);
    print_events(&source, &format!("file://{}", file.display()), json).await
}

async fn print_events(source: &dyn FeedSource, url: &str, json: bool) -> ClientResult<()> {
    let events = fetch_feed_events(source, url).await?;
    if json {
        println!("{}", output::events_json(&events)?);
    } else {
        println!("{}", output::format_events(&events, Utc::now()));
    }
    Ok(())
}
