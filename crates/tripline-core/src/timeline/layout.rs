//! One-pass derivation of everything the renderer reads.

use serde::{Deserialize, Serialize};

use super::bounds::TimelineBounds;
use super::defects::{CityDefects, DefectClassifier};
use super::item::TimelineItem;
use super::lanes::LanePacker;
use super::route::{RouteLink, RouteLinkResolver};
use super::stack::{plan_slot_key, PlanSlotKey, StackLayout, StackSlot};

/// Stack slot of one stay, flattened for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitySlot {
    pub city_id: String,
    #[serde(flatten)]
    pub slot: StackSlot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_key: Option<PlanSlotKey>,
}

/// Derived, read-only view of an item set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineLayout {
    pub bounds: TimelineBounds,
    pub stack_count: usize,
    pub city_slots: Vec<CitySlot>,
    /// Activity ids per lane.
    pub activity_lanes: Vec<Vec<String>>,
    pub route_links: Vec<RouteLink>,
    pub defects: Vec<CityDefects>,
}

impl TimelineLayout {
    pub fn slot(&self, city_id: &str) -> Option<StackSlot> {
        self.city_slots
            .iter()
            .find(|s| s.city_id == city_id)
            .map(|s| s.slot)
    }

    pub fn activity_lane(&self, activity_id: &str) -> Option<usize> {
        self.activity_lanes
            .iter()
            .position(|lane| lane.iter().any(|id| id == activity_id))
    }

    pub fn defects_for(&self, city_id: &str) -> Option<&CityDefects> {
        self.defects.iter().find(|d| d.city_id == city_id)
    }
}

/// Runs every layout component over an item set.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    packer: LanePacker,
    resolver: RouteLinkResolver,
    classifier: DefectClassifier,
}

impl LayoutEngine {
    pub fn new(
        packer: LanePacker,
        resolver: RouteLinkResolver,
        classifier: DefectClassifier,
    ) -> Self {
        Self {
            packer,
            resolver,
            classifier,
        }
    }

    pub fn compute(&self, items: &[TimelineItem]) -> TimelineLayout {
        let stacks = StackLayout::assign(items);

        let city_slots = stacks
            .slots()
            .filter_map(|(id, slot)| {
                let city = items.iter().find(|item| item.id == id)?;
                Some(CitySlot {
                    city_id: id.to_string(),
                    slot,
                    plan_key: plan_slot_key(city, slot),
                })
            })
            .collect();

        TimelineLayout {
            bounds: TimelineBounds::from_items(items),
            stack_count: stacks.stack_count(),
            city_slots,
            activity_lanes: self.packer.pack(items).lane_ids(),
            route_links: self.resolver.resolve(items, &stacks),
            defects: self.classifier.classify(items, &stacks),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::item::TransportMode;
    use crate::timeline::route::LinkStatus;

    #[test]
    fn computes_all_views() {
        let items = vec![
            TimelineItem::city("rome", "Rome", 0.0, 3.0),
            TimelineItem::city("flo", "Florence", 3.5, 2.0),
            TimelineItem::transfer("train", TransportMode::Train, 3.0, 0.1),
            TimelineItem::activity("forum", "Forum", 0.5, 0.5),
            TimelineItem::activity("vatican", "Vatican", 0.5, 1.0),
        ];
        let layout = LayoutEngine::default().compute(&items);

        assert_eq!(layout.bounds.start_offset, 0.0);
        assert_eq!(layout.bounds.day_count, 6);
        assert_eq!(layout.stack_count, 1);
        assert!(layout.slot("flo").unwrap().is_primary());
        assert_eq!(layout.activity_lane("vatican"), Some(0));
        assert_eq!(layout.activity_lane("forum"), Some(1));
        assert_eq!(layout.route_links[0].status, LinkStatus::Linked);
        assert!(layout.defects_for("flo").unwrap().gap_before());
    }

    #[test]
    fn report_serializes_flattened_slots() {
        let items = vec![TimelineItem::city("a", "A", 0.0, 1.0)];
        let layout = LayoutEngine::default().compute(&items);
        let json = serde_json::to_value(&layout).unwrap();
        assert_eq!(json["citySlots"][0]["stackIndex"], 0);
        assert_eq!(json["bounds"]["dayCount"], 1);
    }
}
