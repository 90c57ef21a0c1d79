//! Trip document: a calendar anchor plus the item set.

use std::collections::HashSet;
use std::path::Path;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::timeline::{TimelineBounds, TimelineItem, MAX_DAY_COUNT};

/// A trip as handed over by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    /// Calendar date of day 0.
    pub start_date: NaiveDate,
    #[serde(default)]
    pub items: Vec<TimelineItem>,
}

impl Trip {
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            items: Vec::new(),
        }
    }

    pub fn with_items(mut self, items: Vec<TimelineItem>) -> Self {
        self.items = items;
        self
    }

    /// Parse a trip from JSON.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a trip file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn item(&self, id: &str) -> Option<&TimelineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Calendar date of the day containing `offset`.
    ///
    /// Returns `None` for non-finite or out-of-range offsets.
    pub fn date_for_offset(&self, offset: f64) -> Option<NaiveDate> {
        if !offset.is_finite() {
            return None;
        }
        let days = offset.floor();
        if days.abs() > i32::MAX as f64 {
            return None;
        }
        self.start_date
            .checked_add_signed(Duration::days(days as i64))
    }

    /// Calendar date of every grid day in `bounds`.
    pub fn day_labels(&self, bounds: &TimelineBounds) -> Vec<(f64, NaiveDate)> {
        bounds
            .day_offsets()
            .filter_map(|offset| Some((offset, self.date_for_offset(offset)?)))
            .collect()
    }

    /// Check the item set at the I/O boundary.
    ///
    /// # Errors
    /// Returns the first duplicate id or unusable offset/duration found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for item in &self.items {
            if !seen.insert(item.id.as_str()) {
                return Err(ValidationError::DuplicateId(item.id.clone()));
            }
            if !item.start_offset.is_finite() {
                return Err(ValidationError::InvalidValue {
                    id: item.id.clone(),
                    field: "startOffset".into(),
                    message: "must be a finite number".into(),
                });
            }
            if !item.duration.is_finite() || item.duration < 0.0 {
                return Err(ValidationError::InvalidValue {
                    id: item.id.clone(),
                    field: "duration".into(),
                    message: "must be a finite, non-negative number".into(),
                });
            }
            let limit = f64::from(MAX_DAY_COUNT);
            if item.start_offset.abs() > limit || item.end_offset().abs() > limit {
                return Err(ValidationError::InvalidValue {
                    id: item.id.clone(),
                    field: "startOffset".into(),
                    message: format!("must stay within {MAX_DAY_COUNT} days of the trip start"),
                });
            }
        }
        Ok(())
    }

    /// Look up an item, failing with [`ValidationError::UnknownItem`].
    pub fn require_item(&self, id: &str) -> Result<&TimelineItem, ValidationError> {
        self.item(id)
            .ok_or_else(|| ValidationError::UnknownItem(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn offsets_map_to_calendar_days() {
        let trip = Trip::new(date(2026, 5, 1));
        assert_eq!(trip.date_for_offset(0.0), Some(date(2026, 5, 1)));
        assert_eq!(trip.date_for_offset(2.75), Some(date(2026, 5, 3)));
        assert_eq!(trip.date_for_offset(-0.5), Some(date(2026, 4, 30)));
        assert_eq!(trip.date_for_offset(f64::NAN), None);
    }

    #[test]
    fn day_labels_cover_window() {
        let trip = Trip::new(date(2026, 5, 1));
        let bounds = TimelineBounds {
            start_offset: -1.0,
            day_count: 3,
        };
        let labels = trip.day_labels(&bounds);
        assert_eq!(labels.len(), 3);
        assert_eq!(labels[0], (-1.0, date(2026, 4, 30)));
        assert_eq!(labels[2], (1.0, date(2026, 5, 2)));
    }

    #[test]
    fn parses_json_document() {
        let trip = Trip::from_json(
            r#"{
                "startDate": "2026-05-01",
                "items": [
                    {"id": "a", "kind": "city", "startOffset": 0, "duration": 3, "title": "Rome"},
                    {"id": "t", "kind": "travel", "startOffset": 3, "duration": 0.1, "transportMode": "train"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(trip.items.len(), 2);
        assert_eq!(trip.item("a").unwrap().title, "Rome");
        assert!(trip.validate().is_ok());
    }

    #[test]
    fn load_roundtrips_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trip.json");
        let trip = Trip::new(date(2026, 5, 1)).with_items(vec![
            TimelineItem::city("a", "Rome", 0.0, 2.5),
            TimelineItem::activity("x", "Forum", 0.5, 0.5),
        ]);
        std::fs::write(&path, trip.to_json_pretty().unwrap()).unwrap();
        assert_eq!(Trip::load(&path).unwrap(), trip);
        assert!(matches!(
            Trip::load(&dir.path().join("missing.json")),
            Err(CoreError::Io(_))
        ));
    }

    #[test]
    fn validation_rejects_duplicates_and_bad_numbers() {
        let trip = Trip::new(date(2026, 5, 1)).with_items(vec![
            TimelineItem::city("a", "A", 0.0, 1.0),
            TimelineItem::city("a", "B", 1.0, 1.0),
        ]);
        assert_eq!(
            trip.validate(),
            Err(ValidationError::DuplicateId("a".into()))
        );

        let trip = Trip::new(date(2026, 5, 1))
            .with_items(vec![TimelineItem::city("a", "A", 0.0, -1.0)]);
        assert!(matches!(
            trip.validate(),
            Err(ValidationError::InvalidValue { .. })
        ));

        let trip = Trip::new(date(2026, 5, 1))
            .with_items(vec![TimelineItem::city("far", "Far", 1e12, 1.0)]);
        assert!(matches!(
            trip.validate(),
            Err(ValidationError::InvalidValue { ref field, .. }) if field == "startOffset"
        ));
        assert_eq!(
            trip.require_item("zzz"),
            Err(ValidationError::UnknownItem("zzz".into()))
        );
    }
}
