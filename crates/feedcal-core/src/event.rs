//! Event types for subscribed feeds.
//!
//! [`NormalizedEvent`] is the validated, feed-agnostic representation of one
//! calendar event. Every instance that leaves the ingestion pipeline has a
//! non-empty title and two valid dates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time::FeedDate;

/// Title used when a feed event has no usable summary.
pub const UNTITLED_EVENT: &str = "Untitled Event";

/// A normalized calendar event from a feed.
///
/// Events are rebuilt from scratch on every poll and never mutated afterwards.
/// No ordering between `start` and `end` is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedEvent {
    /// Feed UID, or a generated identifier when the feed had none.
    pub id: String,
    /// The event title/summary.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// When the event starts.
    pub start: DateTime<Utc>,
    /// When the event ends.
    pub end: DateTime<Utc>,
    /// The location field, verbatim.
    pub location: Option<String>,
    /// The event's URL property.
    pub url: Option<String>,
    /// True when both dates were date-only values.
    pub all_day: bool,
}

impl NormalizedEvent {
    /// Creates a new NormalizedEvent with required fields.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: FeedDate,
        end: FeedDate,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            start: start.to_utc_datetime(),
            end: end.to_utc_datetime(),
            location: None,
            url: None,
            all_day: start.is_date() && end.is_date(),
        }
    }

    /// Duration in minutes. Negative when the feed has `end` before `start`.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Returns true if the event is in progress at the given time.
    pub fn is_ongoing_at(&self, now: DateTime<Utc>) -> bool {
        self.start <= now && now < self.end
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn at(h: u32) -> FeedDate {
        FeedDate::DateTime(Utc.with_ymd_and_hms(2025, 2, 5, h, 0, 0).unwrap())
    }

    #[test]
    fn builds_event_with_optional_fields() {
        let event = NormalizedEvent::new("evt-1", "Standup", at(9), at(10))
            .with_description("Daily sync")
            .with_location("Room 4")
            .with_url("https://example.com/standup");

        assert_eq!(event.id, "evt-1");
        assert_eq!(event.title, "Standup");
        assert_eq!(event.description.as_deref(), Some("Daily sync"));
        assert_eq!(event.location.as_deref(), Some("Room 4"));
        assert_eq!(event.url.as_deref(), Some("https://example.com/standup"));
        assert!(!event.all_day);
        assert_eq!(event.duration_minutes(), 60);
    }

    #[test]
    fn all_day_requires_both_dates() {
        let day = |d| FeedDate::Date(NaiveDate::from_ymd_opt(2025, 2, d).unwrap());

        assert!(NormalizedEvent::new("a", "Holiday", day(10), day(11)).all_day);
        assert!(!NormalizedEvent::new("b", "Mixed", day(10), at(12)).all_day);
    }

    #[test]
    fn reversed_dates_are_kept() {
        let event = NormalizedEvent::new("evt-2", "Backwards", at(11), at(10));
        assert_eq!(event.duration_minutes(), -60);
        assert!(!event.is_ongoing_at(Utc.with_ymd_and_hms(2025, 2, 5, 10, 30, 0).unwrap()));
    }

    #[test]
    fn ongoing_window_is_half_open() {
        let event = NormalizedEvent::new("evt-3", "Talk", at(9), at(10));
        assert!(event.is_ongoing_at(Utc.with_ymd_and_hms(2025, 2, 5, 9, 0, 0).unwrap()));
        assert!(!event.is_ongoing_at(Utc.with_ymd_and_hms(2025, 2, 5, 10, 0, 0).unwrap()));
    }

    #[test]
    fn serializes_to_json() {
        let event = NormalizedEvent::new("evt-4", "Review", at(14), at(15));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["id"], "evt-4");
        assert_eq!(json["start"], "2025-02-05T14:00:00Z");
        assert!(json["description"].is_null());
    }
}
