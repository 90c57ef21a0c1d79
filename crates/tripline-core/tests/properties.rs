//! Property tests for layout and drag invariants.

use proptest::prelude::*;

use tripline_core::interaction::snap;
use tripline_core::timeline::{pack_activity_lanes, DEFAULT_LANE_GAP};
use tripline_core::{DragMode, DragSession, StackLayout, TimelineBounds, TimelineItem};

fn interval() -> impl Strategy<Value = (f64, f64)> {
    // Half-day grid positions like the editor produces, plus arbitrary ones.
    prop_oneof![
        (-20i32..40, 0i32..12).prop_map(|(s, d)| (s as f64 * 0.5, d as f64 * 0.5)),
        (-10.0f64..20.0, 0.0f64..6.0),
    ]
}

fn cities(max: usize) -> impl Strategy<Value = Vec<TimelineItem>> {
    prop::collection::vec(interval(), 0..max).prop_map(|spans| {
        spans
            .into_iter()
            .enumerate()
            .map(|(i, (start, duration))| {
                TimelineItem::city(format!("c{i}"), format!("City {i}"), start, duration)
            })
            .collect()
    })
}

fn activities(max: usize) -> impl Strategy<Value = Vec<TimelineItem>> {
    prop::collection::vec(interval(), 0..max).prop_map(|spans| {
        spans
            .into_iter()
            .enumerate()
            .map(|(i, (start, duration))| {
                TimelineItem::activity(format!("a{i}"), format!("Act {i}"), start, duration)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn bounds_cover_every_item(items in cities(12)) {
        let bounds = TimelineBounds::from_items(&items);
        prop_assert!(bounds.day_count >= 1);
        prop_assert_eq!(bounds.start_offset, bounds.start_offset.floor());
        let spans_something = items.iter().any(|i| i.duration > 0.0);
        if spans_something {
            for item in &items {
                prop_assert!(bounds.start_offset <= item.start_offset);
                prop_assert!(bounds.end_offset() >= item.end_offset());
            }
        }
    }

    #[test]
    fn stays_in_one_slot_never_overlap(items in cities(16)) {
        let layout = StackLayout::assign(&items);
        for lane in 0..layout.stack_count() {
            let stays = layout.cities_in_lane(&items, lane);
            for pair in stays.windows(2) {
                prop_assert!(pair[0].end_offset() <= pair[1].start_offset);
            }
        }
        prop_assert!(layout.slots().all(|(_, slot)| slot.stack_count == layout.stack_count()));
    }

    #[test]
    fn packed_lanes_keep_gap(items in activities(16)) {
        let packed = pack_activity_lanes(&items);
        let placed: usize = packed.lanes().iter().map(Vec::len).sum();
        prop_assert_eq!(placed, items.len());
        for lane in packed.lanes() {
            for pair in lane.windows(2) {
                prop_assert!(pair[0].end_offset() + DEFAULT_LANE_GAP <= pair[1].start_offset);
            }
        }
    }

    #[test]
    fn snap_is_idempotent(value in -1.0e6f64..1.0e6, fine in any::<bool>()) {
        let step = if fine { 0.05 } else { 0.5 };
        let once = snap(value, step);
        prop_assert_eq!(snap(once, step), once);
    }

    #[test]
    fn resize_cascade_conserves_span(
        count in 2usize..8,
        durations in prop::collection::vec(1i32..8, 8),
        target in 0usize..7,
        delta in -10.0f64..10.0,
    ) {
        // Contiguous route on the half-day grid.
        let mut items = Vec::new();
        let mut start = 0.0;
        for (i, d) in durations.iter().take(count).enumerate() {
            let duration = *d as f64 * 0.5;
            items.push(TimelineItem::city(format!("c{i}"), "City", start, duration));
            start += duration;
        }
        let target = target % count;
        let before_start = items[target].start_offset;
        let before_end = items.last().map(TimelineItem::end_offset).unwrap_or_default();

        let session = DragSession::begin(&items, &items[target].id, DragMode::ResizeRight, 0.0)
            .unwrap();
        let after = session.preview(delta);

        let change = after[target].duration - items[target].duration;
        prop_assert_eq!(after[target].start_offset, before_start);
        let after_end = after.last().map(TimelineItem::end_offset).unwrap_or_default();
        prop_assert!(((after_end - before_start) - (before_end - before_start + change)).abs() < 1e-9);
        for (old, new) in items.iter().zip(&after).skip(target + 1) {
            prop_assert!((new.start_offset - (old.start_offset + change)).abs() < 1e-9);
            prop_assert_eq!(new.duration, old.duration);
        }
        for (old, new) in items.iter().zip(&after).take(target) {
            prop_assert_eq!(old, new);
        }
    }
}
