//! Date parsing for feed values.
//!
//! Feed dates arrive as raw strings. They are parsed in two stages:
//! 1. [`parse_ics_date`] understands the compact iCalendar encodings
//!    (`20250205T100000Z`, `20250205T100000`, `20250205`).
//! 2. [`parse_generic_date`] is the fallback for the looser formats some feeds
//!    emit anyway (RFC 3339, plain ISO 8601, RFC 2822).
//!
//! [`parse_feed_date`] chains both.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A parsed feed date.
///
/// Floating times (no `Z`, no offset) are interpreted as UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum FeedDate {
    /// A specific instant.
    DateTime(DateTime<Utc>),
    /// A calendar date without a time of day.
    Date(NaiveDate),
}

impl FeedDate {
    /// Returns `true` if this value carried no time of day.
    pub fn is_date(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    /// Converts to a UTC instant. Dates map to midnight UTC.
    pub fn to_utc_datetime(&self) -> DateTime<Utc> {
        match self {
            Self::DateTime(dt) => *dt,
            Self::Date(date) => date.and_time(chrono::NaiveTime::MIN).and_utc(),
        }
    }
}

/// Parses a feed date, trying the iCalendar encodings first and the generic
/// formats second.
pub fn parse_feed_date(s: &str) -> Option<FeedDate> {
    parse_ics_date(s).or_else(|| parse_generic_date(s))
}

/// Parses an iCalendar DATE or DATE-TIME value.
///
/// Handles formats like:
/// - 20250205T100000Z (UTC)
/// - 20250205T100000 (floating, taken as UTC)
/// - 20250205 (date only)
pub fn parse_ics_date(s: &str) -> Option<FeedDate> {
    let s = s.trim();

    if s.len() == 8 && s.chars().all(|c| c.is_ascii_digit()) {
        let date = NaiveDate::parse_from_str(s, "%Y%m%d").ok()?;
        return Some(FeedDate::Date(date));
    }

    let naive = s.strip_suffix('Z').unwrap_or(s);
    if naive.len() != 15 || naive.as_bytes()[8] != b'T' {
        return None;
    }

    let dt = NaiveDateTime::parse_from_str(naive, "%Y%m%dT%H%M%S").ok()?;
    Some(FeedDate::DateTime(Utc.from_utc_datetime(&dt)))
}

const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y%m%dT%H%M%S%z",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parses the loosely formatted date strings that are not iCalendar encodings.
pub fn parse_generic_date(s: &str) -> Option<FeedDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(FeedDate::DateTime(dt.with_timezone(&Utc)));
    }

    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Some(FeedDate::DateTime(dt.with_timezone(&Utc)));
        }
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(FeedDate::DateTime(Utc.from_utc_datetime(&dt)));
        }
    }

    if let Some(dt) = parse_hour_only(s) {
        return Some(FeedDate::DateTime(dt));
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(FeedDate::Date(date));
    }

    DateTime::parse_from_rfc2822(s)
        .ok()
        .map(|dt| FeedDate::DateTime(dt.with_timezone(&Utc)))
}

/// `2025-02-05T10`: chrono's parser needs a minute, so the hour is split off by hand.
fn parse_hour_only(s: &str) -> Option<DateTime<Utc>> {
    let (date, hour) = s.split_once('T')?;
    if hour.len() != 2 || !hour.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let dt = date.and_hms_opt(hour.parse().ok()?, 0, 0)?;
    Some(Utc.from_utc_datetime(&dt))
}
