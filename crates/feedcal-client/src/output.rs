//! Rendering of events and poll updates for the terminal.

use chrono::{DateTime, Utc};
use feedcal_core::NormalizedEvent;
use feedcal_server::PollUpdate;
use serde::Serialize;

use crate::error::ClientResult;

/// One line per event: `2025-02-05 14:00-14:30 UTC  Standup @ Room 1`.
///
/// Events running at `now` get an `[in progress]` marker.
pub fn format_event(event: &NormalizedEvent, now: DateTime<Utc>) -> String {
    let when = if event.all_day {
        format!("{} (all day)", event.start.format("%Y-%m-%d"))
    } else if event.start.date_naive() == event.end.date_naive() {
        format!(
            "{}-{} UTC",
            event.start.format("%Y-%m-%d %H:%M"),
            event.end.format("%H:%M")
        )
    } else {
        format!(
            "{} - {} UTC",
            event.start.format("%Y-%m-%d %H:%M"),
            event.end.format("%Y-%m-%d %H:%M")
        )
    };

    let mut line = match event.location {
        Some(ref location) => format!("{}  {} @ {}", when, event.title, location),
        None => format!("{}  {}", when, event.title),
    };
    if event.is_ongoing_at(now) {
        line.push_str("  [in progress]");
    }
    line
}

pub fn format_events(events: &[NormalizedEvent], now: DateTime<Utc>) -> String {
    if events.is_empty() {
        return "No events".to_string();
    }
    events
        .iter()
        .map(|event| format_event(event, now))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty-printed JSON array of events.
pub fn events_json(events: &[NormalizedEvent]) -> ClientResult<String> {
    Ok(serde_json::to_string_pretty(events)?)
}

/// Status line for one poll cycle.
pub fn summarize_update(update: &PollUpdate) -> String {
    let stamp = update.polled_at.format("%H:%M:%S");
    match update.result {
        Ok(ref events) => format!("[{}] Calendar updated: {} events", stamp, events.len()),
        Err(ref e) => format!("[{}] Sync failed: {}", stamp, e),
    }
}

/// JSON shape of one poll cycle. Exactly one of `events` and `error` is set.
#[derive(Debug, Serialize)]
struct UpdateRecord<'a> {
    generation: u64,
    url: &'a str,
    polled_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    events: Option<&'a [NormalizedEvent]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
}

/// One poll cycle as a single line of JSON.
pub fn update_json(update: &PollUpdate) -> ClientResult<String> {
    let (events, error, status) = match update.result {
        Ok(ref events) => (Some(events.as_slice()), None, None),
        Err(ref e) => (None, Some(e.to_string()), e.status()),
    };
    let record = UpdateRecord {
        generation: update.generation,
        url: &update.url,
        polled_at: update.polled_at,
        events,
        error,
        status,
    };
    Ok(serde_json::to_string(&record)?)
}
