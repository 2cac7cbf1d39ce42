//! One poll cycle: normalize URL, fetch, scan, normalize events.

use feedcal_core::NormalizedEvent;
use tracing::{debug, info};

use crate::error::FeedResult;
use crate::feed_url::validate_feed_url;
use crate::ics::parse_ics;
use crate::normalize::{EventNormalizer, IdGenerator, UuidGenerator};
use crate::source::FeedSource;

/// Scans and normalizes feed text. No network involved.
pub fn events_from_text<G: IdGenerator>(
    text: &str,
    normalizer: &mut EventNormalizer<G>,
) -> Vec<NormalizedEvent> {
    let records = parse_ics(text);
    normalizer.normalize_records(&records)
}

/// Runs the full pipeline for `url` against `source`.
///
/// A blank URL fails before any fetch. Source failures propagate; an empty
/// or eventless feed is `Ok(vec![])`.
pub async fn run_pipeline<G: IdGenerator>(
    source: &dyn FeedSource,
    url: &str,
    normalizer: &mut EventNormalizer<G>,
) -> FeedResult<Vec<NormalizedEvent>> {
    let normalized_url = validate_feed_url(url)?;
    debug!(source = source.name(), url = %normalized_url, "Fetching calendar");

    let text = source.fetch(&normalized_url).await?;
    let events = events_from_text(&text, normalizer);

    info!(url = %normalized_url, events = events.len(), "Successfully parsed valid events");
    Ok(events)
}

/// [`run_pipeline`] with random fallback ids.
pub async fn fetch_feed_events(
    source: &dyn FeedSource,
    url: &str,
) -> FeedResult<Vec<NormalizedEvent>> {
    let mut normalizer = EventNormalizer::<UuidGenerator>::new();
    run_pipeline(source, url, &mut normalizer).await
}
