//! Raw field records scanned out of a feed.
//!
//! A [`RawEventRecord`] holds the seven tracked fields of one event block as
//! plain strings, exactly as they appeared in the feed (trimmed). Nothing is
//! validated here; that is the normalizer's job.

use serde::{Deserialize, Serialize};

/// The field keys the scanner looks for, in record order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKey {
    Uid,
    Summary,
    Description,
    Location,
    Url,
    DtStart,
    DtEnd,
}

impl FieldKey {
    /// All tracked keys.
    pub const ALL: [FieldKey; 7] = [
        Self::Uid,
        Self::Summary,
        Self::Description,
        Self::Location,
        Self::Url,
        Self::DtStart,
        Self::DtEnd,
    ];

    /// The property name as written in the feed.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uid => "UID",
            Self::Summary => "SUMMARY",
            Self::Description => "DESCRIPTION",
            Self::Location => "LOCATION",
            Self::Url => "URL",
            Self::DtStart => "DTSTART",
            Self::DtEnd => "DTEND",
        }
    }

    /// The line prefix that introduces this field, e.g. `SUMMARY:`.
    pub fn line_prefix(&self) -> &'static str {
        match self {
            Self::Uid => "UID:",
            Self::Summary => "SUMMARY:",
            Self::Description => "DESCRIPTION:",
            Self::Location => "LOCATION:",
            Self::Url => "URL:",
            Self::DtStart => "DTSTART:",
            Self::DtEnd => "DTEND:",
        }
    }
}

/// One event block's raw field values. `None` means no line matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEventRecord {
    pub uid: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: Option<String>,
    pub dtstart: Option<String>,
    pub dtend: Option<String>,
}

impl RawEventRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for a key.
    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.slot(key).as_deref()
    }

    /// Sets the value for a key, replacing any previous value.
    pub fn set(&mut self, key: FieldKey, value: impl Into<String>) {
        *self.slot_mut(key) = Some(value.into());
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, key: FieldKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Returns the value for a key if it is present and not empty.
    pub fn non_empty(&self, key: FieldKey) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    fn slot(&self, key: FieldKey) -> &Option<String> {
        match key {
            FieldKey::Uid => &self.uid,
            FieldKey::Summary => &self.summary,
            FieldKey::Description => &self.description,
            FieldKey::Location => &self.location,
            FieldKey::Url => &self.url,
            FieldKey::DtStart => &self.dtstart,
            FieldKey::DtEnd => &self.dtend,
        }
    }

    fn slot_mut(&mut self, key: FieldKey) -> &mut Option<String> {
        match key {
            FieldKey::Uid => &mut self.uid,
            FieldKey::Summary => &mut self.summary,
            FieldKey::Description => &mut self.description,
            FieldKey::Location => &mut self.location,
            FieldKey::Url => &mut self.url,
            FieldKey::DtStart => &mut self.dtstart,
            FieldKey::DtEnd => &mut self.dtend,
        }
    }
}
