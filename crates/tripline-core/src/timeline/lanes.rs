//! Greedy lane packing for activities.

use std::cmp::Ordering;

use serde::Serialize;

use super::item::{ItemKind, TimelineItem};

/// Minimum visual gap between neighbours in one lane, in days.
pub const DEFAULT_LANE_GAP: f64 = 0.05;

/// Lanes reserved even when there are few or no activities.
pub const DEFAULT_MIN_LANES: usize = 2;

/// Packs activities into the fewest non-colliding lanes.
#[derive(Debug, Clone)]
pub struct LanePacker {
    min_lanes: usize,
    gap: f64,
}

impl LanePacker {
    pub fn new() -> Self {
        Self {
            min_lanes: DEFAULT_MIN_LANES,
            gap: DEFAULT_LANE_GAP,
        }
    }

    /// Set the number of lanes always reserved.
    pub fn with_min_lanes(mut self, min_lanes: usize) -> Self {
        self.min_lanes = min_lanes;
        self
    }

    /// Set the minimum gap between neighbours in a lane.
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap.max(0.0);
        self
    }

    /// Pack the `activity` items of `items`.
    ///
    /// Activities are visited by start, longest first on ties, and placed in
    /// the first lane whose last item ends at least `gap` before they start.
    pub fn pack<'a>(&self, items: &'a [TimelineItem]) -> PackedLanes<'a> {
        let mut activities: Vec<&TimelineItem> = items
            .iter()
            .filter(|item| item.kind == ItemKind::Activity && item.is_finite())
            .collect();
        activities.sort_by(|a, b| match a.start_offset.total_cmp(&b.start_offset) {
            Ordering::Equal => b.duration.total_cmp(&a.duration),
            other => other,
        });

        let mut lanes: Vec<Vec<&TimelineItem>> = Vec::new();
        for activity in activities {
            let free = lanes.iter().position(|lane| {
                lane.last()
                    .map_or(true, |last| last.end_offset() + self.gap <= activity.start_offset)
            });
            match free {
                Some(lane) => lanes[lane].push(activity),
                None => lanes.push(vec![activity]),
            }
        }

        while lanes.len() < self.min_lanes {
            lanes.push(Vec::new());
        }

        PackedLanes { lanes }
    }
}

impl Default for LanePacker {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of packing: each lane's items in start order.
#[derive(Debug, Clone, Serialize)]
pub struct PackedLanes<'a> {
    lanes: Vec<Vec<&'a TimelineItem>>,
}

impl<'a> PackedLanes<'a> {
    pub fn lanes(&self) -> &[Vec<&'a TimelineItem>] {
        &self.lanes
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    /// Lane holding the activity with `id`.
    pub fn lane_of(&self, id: &str) -> Option<usize> {
        self.lanes
            .iter()
            .position(|lane| lane.iter().any(|item| item.id == id))
    }

    /// Lane contents as ids.
    pub fn lane_ids(&self) -> Vec<Vec<String>> {
        self.lanes
            .iter()
            .map(|lane| lane.iter().map(|item| item.id.clone()).collect())
            .collect()
    }
}

/// Convenience function to pack with default settings
pub fn pack_activity_lanes(items: &[TimelineItem]) -> PackedLanes<'_> {
    LanePacker::new().pack(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_overlap_needs_second_lane() {
        let items = vec![
            TimelineItem::activity("a", "Walk", 0.0, 1.0),
            TimelineItem::activity("b", "Tour", 0.5, 1.0),
        ];
        let packed = pack_activity_lanes(&items);
        assert_eq!(packed.lane_of("a"), Some(0));
        assert_eq!(packed.lane_of("b"), Some(1));
    }

    #[test]
    fn gap_is_required_not_just_non_overlap() {
        let items = vec![
            TimelineItem::activity("a", "Walk", 0.0, 1.0),
            TimelineItem::activity("touching", "Tour", 1.0, 0.5),
            TimelineItem::activity("spaced", "Dinner", 2.0, 0.5),
        ];
        let packed = LanePacker::new().with_min_lanes(0).pack(&items);
        assert_eq!(packed.lane_of("touching"), Some(1));
        assert_eq!(packed.lane_of("spaced"), Some(0));
        assert_eq!(packed.lane_count(), 2);
    }

    #[test]
    fn longest_item_wins_tie() {
        let items = vec![
            TimelineItem::activity("short", "Coffee", 1.0, 0.5),
            TimelineItem::activity("long", "Hike", 1.0, 2.0),
        ];
        let packed = pack_activity_lanes(&items);
        assert_eq!(packed.lane_of("long"), Some(0));
        assert_eq!(packed.lane_of("short"), Some(1));
    }

    #[test]
    fn pads_to_min_lanes() {
        let packed = LanePacker::new().with_min_lanes(3).pack(&[]);
        assert_eq!(packed.lane_count(), 3);
        assert!(packed.lanes().iter().all(|lane| lane.is_empty()));
    }

    #[test]
    fn ignores_other_kinds_and_invalid_numbers() {
        let items = vec![
            TimelineItem::city("c", "Rome", 0.0, 3.0),
            TimelineItem::activity("nan", "Broken", f64::NAN, 1.0),
            TimelineItem::activity("a", "Forum", 0.5, 0.5),
        ];
        let packed = pack_activity_lanes(&items);
        assert_eq!(packed.lane_ids(), vec![vec!["a".to_string()], vec![]]);
    }
}
