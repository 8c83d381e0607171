//! Card catalog - the read-only pool every deck is built from.
//!
//! Order in the catalog carries no gameplay meaning; it only determines
//! card ids. `sorted_by_date` exists for maintaining the catalog file.

use std::path::Path;

use tracing::debug;

use super::record::{EventRecord, RawEventRecord};
use crate::core::error::CatalogError;

/// The full set of event records.
///
/// ## Example
///
/// ```
/// use timeline_engine::cards::Catalog;
///
/// let catalog = Catalog::from_json(r#"[
///     {"date": "1914", "event": {"en": "A"}, "bible_reference": {"en": "a"}},
///     {"date": "-33", "event": {"en": "B"}, "bible_reference": {"en": "b"}}
/// ]"#).unwrap();
///
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.date_range(), Some((-33, 1914)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<EventRecord>,
}

impl Catalog {
    /// Create a catalog from records.
    #[must_use]
    pub fn new(records: Vec<EventRecord>) -> Self {
        Self { records }
    }

    /// Parse a catalog from its JSON form.
    ///
    /// Unparsable dates are reported with the offending entry's index.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawEventRecord> = serde_json::from_str(json)?;
        let records = raw
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                EventRecord::try_from(entry).map_err(|invalid| CatalogError::InvalidDate {
                    index,
                    value: invalid.0,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(records = records.len(), "parsed catalog");
        Ok(Self { records })
    }

    /// Read and parse a catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Render the catalog in its JSON form, four-space indented.
    pub fn to_json_pretty(&self) -> Result<String, CatalogError> {
        let raw: Vec<RawEventRecord> = self.records.iter().cloned().map(Into::into).collect();
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        serde::Serialize::serialize(&raw, &mut serializer)?;
        // serde_json only emits UTF-8
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Get a record by catalog index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&EventRecord> {
        self.records.get(index)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &EventRecord> {
        self.records.iter()
    }

    /// Earliest and latest year, if any.
    #[must_use]
    pub fn date_range(&self) -> Option<(i64, i64)> {
        let min = self.records.iter().map(|r| r.date).min()?;
        let max = self.records.iter().map(|r| r.date).max()?;
        Some((min, max))
    }

    /// Check if records are already in year order.
    #[must_use]
    pub fn is_sorted_by_date(&self) -> bool {
        self.records.windows(2).all(|pair| pair[0].date <= pair[1].date)
    }

    /// A copy ordered by year. Records with equal years keep their order.
    #[must_use]
    pub fn sorted_by_date(&self) -> Self {
        let mut records = self.records.clone();
        records.sort_by_key(|r| r.date);
        Self { records }
    }
}

impl From<Vec<EventRecord>> for Catalog {
    fn from(records: Vec<EventRecord>) -> Self {
        Self::new(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(date: &str, text: &str) -> String {
        let event = format!(r#"{{"en": "{text}"}}"#);
        format!(r#"{{"date": "{date}", "event": {event}, "bible_reference": {{"en": "ref"}}}}"#)
    }

    #[test]
    fn test_from_json() {
        let json = format!("[{}, {}]", entry("30", "a"), entry("-500", "b"));
        let catalog = Catalog::from_json(&json).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).unwrap().date, -500);
        assert!(catalog.get(2).is_none());
    }

    #[test]
    fn test_invalid_date_reports_index() {
        let json = format!("[{}, {}]", entry("30", "a"), entry("soon", "b"));
        let err = Catalog::from_json(&json).unwrap_err();

        match err {
            CatalogError::InvalidDate { index, value } => {
                assert_eq!(index, 1);
                assert_eq!(value, "soon");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_not_an_array() {
        let err = Catalog::from_json(r#"{"date": "1"}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::from_json("[]").unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.date_range(), None);
    }

    #[test]
    fn test_sorted_by_date_is_stable() {
        let json = format!(
            "[{}, {}, {}, {}]",
            entry("100", "late"),
            entry("-5", "early"),
            entry("50", "tie-first"),
            entry("50", "tie-second")
        );
        let catalog = Catalog::from_json(&json).unwrap();
        assert!(!catalog.is_sorted_by_date());

        let sorted = catalog.sorted_by_date();
        assert!(sorted.is_sorted_by_date());

        let order: Vec<_> = sorted
            .iter()
            .map(|r| r.event_text.exact("en").unwrap().to_string())
            .collect();
        assert_eq!(order, vec!["early", "tie-first", "tie-second", "late"]);
    }

    #[test]
    fn test_pretty_json_round_trip() {
        let json = format!("[{}, {}]", entry("-33", "a"), entry("1914", "b"));
        let catalog = Catalog::from_json(&json).unwrap();

        let pretty = catalog.to_json_pretty().unwrap();
        assert!(pretty.contains("\n    {"));
        assert!(pretty.contains("\"date\": \"-33\""));
        assert_eq!(Catalog::from_json(&pretty).unwrap(), catalog);
    }

    #[test]
    fn test_from_missing_path() {
        let err = Catalog::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
