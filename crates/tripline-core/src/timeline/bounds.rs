//! Visible day window spanning every item on the timeline.

use serde::{Deserialize, Serialize};

use super::item::TimelineItem;

/// Widest window ever produced, in days (about a century).
pub const MAX_DAY_COUNT: u32 = 36_600;

/// Integer-aligned day window to render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineBounds {
    /// First visible day; always a whole number, may be negative.
    pub start_offset: f64,
    /// Number of visible days, at least 1.
    pub day_count: u32,
}

impl Default for TimelineBounds {
    fn default() -> Self {
        Self {
            start_offset: 0.0,
            day_count: 1,
        }
    }
}

impl TimelineBounds {
    /// Derive the window from the current item set.
    ///
    /// Items with a non-finite offset or duration are ignored. An empty or
    /// collapsed span yields the one-day default window.
    pub fn from_items(items: &[TimelineItem]) -> Self {
        let mut min_start = f64::INFINITY;
        let mut max_end = f64::NEG_INFINITY;
        let mut skipped = 0usize;

        for item in items {
            let end = item.end_offset();
            if !item.is_finite() || !end.is_finite() {
                skipped += 1;
                continue;
            }
            min_start = min_start.min(item.start_offset);
            max_end = max_end.max(end);
        }

        if skipped > 0 {
            tracing::warn!(skipped, "ignoring items with non-finite offset or duration");
        }

        if !min_start.is_finite() || !max_end.is_finite() || max_end <= min_start {
            return Self::default();
        }

        let start_offset = min_start.floor();
        let span = (max_end - start_offset).ceil();
        if span > f64::from(MAX_DAY_COUNT) {
            tracing::warn!(span, max = MAX_DAY_COUNT, "timeline window truncated");
        }
        Self {
            start_offset,
            day_count: (span.min(f64::from(MAX_DAY_COUNT)) as u32).max(1),
        }
    }

    pub fn end_offset(&self) -> f64 {
        self.start_offset + self.day_count as f64
    }

    pub fn contains(&self, offset: f64) -> bool {
        offset >= self.start_offset && offset <= self.end_offset()
    }

    /// Offsets of the whole-day grid lines, start inclusive.
    pub fn day_offsets(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.day_count).map(move |day| self.start_offset + day as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_yields_default_window() {
        assert_eq!(TimelineBounds::from_items(&[]), TimelineBounds::default());
    }

    #[test]
    fn fractional_items_get_integer_window() {
        let items = vec![
            TimelineItem::city("a", "A", 0.5, 1.0),
            TimelineItem::activity("b", "B", 2.25, 0.5),
        ];
        let bounds = TimelineBounds::from_items(&items);
        assert_eq!(bounds.start_offset, 0.0);
        assert_eq!(bounds.day_count, 3);
        assert!(bounds.contains(2.75));
    }

    #[test]
    fn negative_start_is_floored() {
        let items = vec![TimelineItem::city("a", "A", -1.5, 2.0)];
        let bounds = TimelineBounds::from_items(&items);
        assert_eq!(bounds.start_offset, -2.0);
        assert_eq!(bounds.day_count, 3);
        assert_eq!(bounds.day_offsets().collect::<Vec<_>>(), vec![-2.0, -1.0, 0.0]);
    }

    #[test]
    fn non_finite_items_are_ignored() {
        let items = vec![
            TimelineItem::city("nan", "x", f64::NAN, 2.0),
            TimelineItem::city("inf", "y", 0.0, f64::INFINITY),
            TimelineItem::city("ok", "z", 1.0, 2.0),
        ];
        let bounds = TimelineBounds::from_items(&items);
        assert_eq!(bounds.start_offset, 1.0);
        assert_eq!(bounds.day_count, 2);
    }

    #[test]
    fn far_out_items_are_truncated_to_max_window() {
        let items = vec![
            TimelineItem::city("a", "A", 0.0, 2.0),
            TimelineItem::city("far", "B", 1e12, 1.0),
        ];
        let bounds = TimelineBounds::from_items(&items);
        assert_eq!(bounds.start_offset, 0.0);
        assert_eq!(bounds.day_count, MAX_DAY_COUNT);
        assert_eq!(bounds.day_offsets().count(), MAX_DAY_COUNT as usize);
    }

    #[test]
    fn zero_length_span_collapses_to_default() {
        let items = vec![TimelineItem::city("a", "A", 4.0, 0.0)];
        assert_eq!(TimelineBounds::from_items(&items), TimelineBounds::default());
    }
}
