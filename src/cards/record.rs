//! Event records - the static facts printed on each card.
//!
//! A record's wire form is the catalog format: the year is a string
//! (`"-33"`, `"1914"`) and text fields are keyed by language code. In
//! memory the year is parsed once to an `i64` so comparisons never touch
//! strings.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Text keyed by language code (`"en"`, `"es"`, ...).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<String, String>);

impl LocalizedText {
    /// Create empty text.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a translation (builder pattern).
    #[must_use]
    pub fn with(mut self, lang: impl Into<String>, text: impl Into<String>) -> Self {
        self.0.insert(lang.into(), text.into());
        self
    }

    /// Exact lookup, no fallback.
    #[must_use]
    pub fn exact(&self, lang: &str) -> Option<&str> {
        self.0.get(lang).map(String::as_str)
    }

    /// Lookup with fallback: `lang`, then `fallback`, then any translation.
    #[must_use]
    pub fn get(&self, lang: &str, fallback: &str) -> Option<&str> {
        self.exact(lang)
            .or_else(|| self.exact(fallback))
            .or_else(|| self.0.values().next().map(String::as_str))
    }

    /// Available language codes.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Check if no translation is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Source URLs keyed by language code.
pub type Bibliography = BTreeMap<String, Vec<String>>;

/// A datable event.
///
/// `date` is a signed year; negative years are BCE.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEventRecord", into = "RawEventRecord")]
pub struct EventRecord {
    /// Signed year.
    pub date: i64,

    /// What happened.
    pub event_text: LocalizedText,

    /// Where it is recorded.
    pub reference_text: LocalizedText,

    /// Optional sources, per language.
    pub bibliography: Option<Bibliography>,
}

impl EventRecord {
    /// Create a record with no text.
    #[must_use]
    pub fn new(date: i64) -> Self {
        Self {
            date,
            event_text: LocalizedText::new(),
            reference_text: LocalizedText::new(),
            bibliography: None,
        }
    }

    /// Set the event text (builder pattern).
    #[must_use]
    pub fn with_event(mut self, text: LocalizedText) -> Self {
        self.event_text = text;
        self
    }

    /// Set the reference text (builder pattern).
    #[must_use]
    pub fn with_reference(mut self, text: LocalizedText) -> Self {
        self.reference_text = text;
        self
    }

    /// Set the bibliography (builder pattern).
    #[must_use]
    pub fn with_bibliography(mut self, sources: Bibliography) -> Self {
        self.bibliography = Some(sources);
        self
    }

    /// Sources for a language, empty if none are listed.
    #[must_use]
    pub fn sources(&self, lang: &str) -> &[String] {
        self.bibliography
            .as_ref()
            .and_then(|b| b.get(lang))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Catalog wire form of an [`EventRecord`].
///
/// Field names follow the published catalog, including its spelling of
/// `bibliografy`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawEventRecord {
    /// Year as written, e.g. `"-33"`.
    pub date: String,
    /// Event text.
    pub event: LocalizedText,
    /// Reference text.
    pub bible_reference: LocalizedText,
    /// Optional sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bibliografy: Option<Bibliography>,
}

/// A `date` string that is not a signed integer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidYear(pub String);

impl fmt::Display for InvalidYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "date {:?} is not a signed integer year", self.0)
    }
}

impl std::error::Error for InvalidYear {}

/// Parse a catalog year, tolerating surrounding whitespace.
pub fn parse_year(raw: &str) -> Result<i64, InvalidYear> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| InvalidYear(raw.to_string()))
}

impl TryFrom<RawEventRecord> for EventRecord {
    type Error = InvalidYear;

    fn try_from(raw: RawEventRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            date: parse_year(&raw.date)?,
            event_text: raw.event,
            reference_text: raw.bible_reference,
            bibliography: raw.bibliografy,
        })
    }
}

impl From<EventRecord> for RawEventRecord {
    fn from(record: EventRecord) -> Self {
        Self {
            date: record.date.to_string(),
            event: record.event_text,
            bible_reference: record.reference_text,
            bibliografy: record.bibliography,
        }
    }
}
