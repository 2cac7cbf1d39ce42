//! Tolerant ICS event scanner.
//!
//! This is deliberately not an RFC 5545 parser. The text is cut at every
//! `BEGIN:VEVENT` marker and each piece is searched for the first
//! `KEY:value` line of each tracked field. Anything else is ignored, and the
//! scan never fails.

use tracing::debug;

use crate::raw_event::{FieldKey, RawEventRecord};

/// Marker that opens an event block.
pub const EVENT_BEGIN_MARKER: &str = "BEGIN:VEVENT";

/// Scans feed text into one record per event block, in source order.
///
/// A block runs from one marker to the next marker or the end of the text.
/// Text without any marker yields an empty vector.
pub fn parse_ics(text: &str) -> Vec<RawEventRecord> {
    let records: Vec<RawEventRecord> = text
        .split(EVENT_BEGIN_MARKER)
        .skip(1)
        .map(scan_block)
        .collect();

    debug!(blocks = records.len(), "Scanned ICS event blocks");
    records
}

/// Extracts the tracked fields from one block.
fn scan_block(block: &str) -> RawEventRecord {
    let mut record = RawEventRecord::new();

    for key in FieldKey::ALL {
        if let Some(value) = block
            .lines()
            .find_map(|line| line.strip_prefix(key.line_prefix()))
        {
            record.set(key, value.trim());
        }
    }

    debug!(uid = ?record.uid, summary = ?record.summary, "Scanned event block");
    record
}
