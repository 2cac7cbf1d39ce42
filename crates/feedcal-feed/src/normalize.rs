//! RawEventRecord to NormalizedEvent conversion.
//!
//! The normalization process, per record:
//! 1. Picks the id (UID, or a generated one)
//! 2. Picks the title (SUMMARY, or [`UNTITLED_EVENT`])
//! 3. Copies the optional text fields when non-empty
//! 4. Parses DTSTART/DTEND with [`parse_feed_date`]
//!
//! A record is kept only when both dates parse. Dropped records are not
//! reported to the caller; they only show up in debug logs.

use feedcal_core::{NormalizedEvent, UNTITLED_EVENT, parse_feed_date};
use tracing::debug;
use uuid::Uuid;

use crate::raw_event::{FieldKey, RawEventRecord};

/// Source of identifiers for records without a UID.
///
/// Identifiers must be unique within one batch.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic ids: `{prefix}-1`, `{prefix}-2`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Converts raw records into validated events.
#[derive(Debug, Clone, Default)]
pub struct EventNormalizer<G = UuidGenerator> {
    ids: G,
}

impl EventNormalizer<UuidGenerator> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<G: IdGenerator> EventNormalizer<G> {
    /// Creates a normalizer drawing fallback ids from `ids`.
    pub fn with_ids(ids: G) -> Self {
        Self { ids }
    }

    /// Converts one record, or returns `None` if it does not validate.
    pub fn normalize_record(&mut self, raw: &RawEventRecord) -> Option<NormalizedEvent> {
        let title = raw.non_empty(FieldKey::Summary).unwrap_or(UNTITLED_EVENT);

        let start = raw.get(FieldKey::DtStart).and_then(parse_feed_date);
        let end = raw.get(FieldKey::DtEnd).and_then(parse_feed_date);

        let (Some(start), Some(end)) = (start, end) else {
            debug!(
                uid = ?raw.uid,
                title = %title,
                dtstart = ?raw.dtstart,
                dtend = ?raw.dtend,
                "Dropping event without valid dates"
            );
            return None;
        };

        let id = match raw.non_empty(FieldKey::Uid) {
            Some(uid) => uid.to_string(),
            None => self.ids.next_id(),
        };

        let mut event = NormalizedEvent::new(id, title, start, end);

        if let Some(description) = raw.non_empty(FieldKey::Description) {
            event = event.with_description(description);
        }

        if let Some(location) = raw.non_empty(FieldKey::Location) {
            event = event.with_location(location);
        }

        if let Some(url) = raw.non_empty(FieldKey::Url) {
            event = event.with_url(url);
        }

        Some(event)
    }

    /// Converts a batch, preserving order and dropping invalid records.
    pub fn normalize_records(&mut self, records: &[RawEventRecord]) -> Vec<NormalizedEvent> {
        let events: Vec<NormalizedEvent> = records
            .iter()
            .filter_map(|raw| self.normalize_record(raw))
            .collect();

        debug!(
            parsed = records.len(),
            valid = events.len(),
            dropped = records.len() - events.len(),
            "Normalized feed events"
        );
        events
    }
}

/// Batch normalize with random fallback ids.
pub fn normalize_events(records: &[RawEventRecord]) -> Vec<NormalizedEvent> {
    EventNormalizer::new().normalize_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn valid_record() -> RawEventRecord {
        RawEventRecord::new()
            .with(FieldKey::Uid, "evt-123")
            .with(FieldKey::Summary, "Team Meeting")
            .with(FieldKey::DtStart, "20250205T100000Z")
            .with(FieldKey::DtEnd, "20250205T110000Z")
    }

    fn normalizer() -> EventNormalizer<SequentialIds> {
        EventNormalizer::with_ids(SequentialIds::new("gen"))
    }

    mod basic_normalization {
        use super::*;

        #[test]
        fn normalizes_minimal_event() {
            let event = normalizer().normalize_record(&valid_record()).unwrap();

            assert_eq!(event.id, "evt-123");
            assert_eq!(event.title, "Team Meeting");
            assert_eq!(event.start, Utc.with_ymd_and_hms(2025, 2, 5, 10, 0, 0).unwrap());
            assert_eq!(event.end, Utc.with_ymd_and_hms(2025, 2, 5, 11, 0, 0).unwrap());
            assert_eq!(event.description, None);
            assert_eq!(event.location, None);
            assert_eq!(event.url, None);
        }

        #[test]
        fn copies_optional_fields() {
            let raw = valid_record()
                .with(FieldKey::Description, "Weekly sync")
                .with(FieldKey::Location, "Room 101")
                .with(FieldKey::Url, "https://example.com/e/1");

            let event = normalizer().normalize_record(&raw).unwrap();
            assert_eq!(event.description.as_deref(), Some("Weekly sync"));
            assert_eq!(event.location.as_deref(), Some("Room 101"));
            assert_eq!(event.url.as_deref(), Some("https://example.com/e/1"));
        }

        #[test]
        fn empty_optional_fields_become_absent() {
            let raw = valid_record()
                .with(FieldKey::Description, "")
                .with(FieldKey::Location, "")
                .with(FieldKey::Url, "");

            let event = normalizer().normalize_record(&raw).unwrap();
            assert_eq!(event.description, None);
            assert_eq!(event.location, None);
            assert_eq!(event.url, None);
        }

        #[test]
        fn uses_fallback_title() {
            let missing = valid_record();
            let missing = RawEventRecord {
                summary: None,
                ..missing
            };
            let empty = valid_record().with(FieldKey::Summary, "");

            let mut normalizer = normalizer();
            assert_eq!(normalizer.normalize_record(&missing).unwrap().title, "Untitled Event");
            assert_eq!(normalizer.normalize_record(&empty).unwrap().title, "Untitled Event");
        }

        #[test]
        fn generates_ids_when_uid_missing_or_empty() {
            let mut normalizer = normalizer();
            let no_uid = RawEventRecord {
                uid: None,
                ..valid_record()
            };
            let empty_uid = valid_record().with(FieldKey::Uid, "");

            assert_eq!(normalizer.normalize_record(&no_uid).unwrap().id, "gen-1");
            assert_eq!(normalizer.normalize_record(&empty_uid).unwrap().id, "gen-2");
        }

        #[test]
        fn uuid_ids_are_unique_within_batch() {
            let records: Vec<_> = (0..20)
                .map(|_| RawEventRecord {
                    uid: None,
                    ..valid_record()
                })
                .collect();

            let events = normalize_events(&records);
            let ids: std::collections::HashSet<_> = events.iter().map(|e| e.id.clone()).collect();
            assert_eq!(ids.len(), 20);
            assert!(ids.iter().all(|id| !id.is_empty()));
        }
    }

    mod date_handling {
        use super::*;

        #[test]
        fn falls_back_to_generic_parse() {
            let raw = valid_record()
                .with(FieldKey::DtStart, "2025-02-05T10:00:00Z")
                .with(FieldKey::DtEnd, "2025-02-05T11:30:00+00:00");

            let event = normalizer().normalize_record(&raw).unwrap();
            assert_eq!(event.duration_minutes(), 90);
        }

        #[test]
        fn date_only_values_are_all_day() {
            let raw = valid_record()
                .with(FieldKey::DtStart, "20250210")
                .with(FieldKey::DtEnd, "20250211");

            let event = normalizer().normalize_record(&raw).unwrap();
            assert!(event.all_day);
            assert_eq!(event.start, Utc.with_ymd_and_hms(2025, 2, 10, 0, 0, 0).unwrap());
        }

        #[test]
        fn end_before_start_is_accepted() {
            let raw = valid_record()
                .with(FieldKey::DtStart, "20250205T110000Z")
                .with(FieldKey::DtEnd, "20250205T100000Z");

            assert!(normalizer().normalize_record(&raw).is_some());
        }

        #[test]
        fn drops_missing_end() {
            let raw = RawEventRecord {
                dtend: None,
                ..valid_record()
            };
            assert!(normalizer().normalize_record(&raw).is_none());
        }

        #[test]
        fn drops_unparseable_start() {
            let raw = valid_record().with(FieldKey::DtStart, "sometime soon");
            assert!(normalizer().normalize_record(&raw).is_none());
        }

        #[test]
        fn dropped_records_do_not_consume_ids() {
            let mut normalizer = normalizer();
            let broken = RawEventRecord {
                uid: None,
                dtend: None,
                ..valid_record()
            };
            let ok = RawEventRecord {
                uid: None,
                ..valid_record()
            };

            assert!(normalizer.normalize_record(&broken).is_none());
            assert_eq!(normalizer.normalize_record(&ok).unwrap().id, "gen-1");
        }
    }

    mod batch_normalization {
        use super::*;

        #[test]
        fn drop_shrinks_batch_by_exactly_one() {
            let control = vec![
                valid_record(),
                valid_record().with(FieldKey::Uid, "evt-2"),
                valid_record().with(FieldKey::Uid, "evt-3"),
            ];
            let mut broken = control.clone();
            broken[1].dtend = Some("not a date".to_string());

            let control_events = normalizer().normalize_records(&control);
            let broken_events = normalizer().normalize_records(&broken);

            assert_eq!(control_events.len(), 3);
            assert_eq!(broken_events.len(), control_events.len() - 1);
            assert_eq!(broken_events[0].id, "evt-123");
            assert_eq!(broken_events[1].id, "evt-3");
        }

        #[test]
        fn does_not_deduplicate() {
            let events = normalizer().normalize_records(&[valid_record(), valid_record()]);
            assert_eq!(events.len(), 2);
            assert_eq!(events[0], events[1]);
        }

        #[test]
        fn every_emitted_event_is_valid() {
            let records = vec![
                valid_record(),
                RawEventRecord::new(),
                RawEventRecord::new().with(FieldKey::Summary, "No dates"),
                valid_record().with(FieldKey::Summary, ""),
                valid_record().with(FieldKey::DtStart, "2025-13-40"),
            ];

            let events = normalizer().normalize_records(&records);
            assert_eq!(events.len(), 2);
            assert!(events.iter().all(|e| !e.title.is_empty() && !e.id.is_empty()));
        }

        #[test]
        fn empty_batch() {
            assert!(normalizer().normalize_records(&[]).is_empty());
        }
    }
}
