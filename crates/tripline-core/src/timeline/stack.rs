//! Overlap stacking for stays.
//!
//! Stays that overlap in time are spread over parallel stack slots using
//! first-fit interval colouring. Slot 0 is the primary lane: the trip's real
//! through-route. Deeper slots hold alternative or uncertain plans.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::item::TimelineItem;

/// Stack placement of one stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackSlot {
    pub stack_index: usize,
    /// Global stack depth, shared by every stay.
    pub stack_count: usize,
}

impl StackSlot {
    pub fn is_primary(&self) -> bool {
        self.stack_index == 0
    }
}

/// Stack slots for every stay with usable numbers.
#[derive(Debug, Clone, Default)]
pub struct StackLayout {
    /// (city id, slot) in start-offset order.
    order: Vec<(String, StackSlot)>,
    index: HashMap<String, usize>,
    stack_count: usize,
}

impl StackLayout {
    /// Assign stack slots to the `city` items of `items`.
    ///
    /// Stays are visited in start order (stable for ties) and placed in the
    /// lowest slot whose last stay has ended by their start.
    pub fn assign(items: &[TimelineItem]) -> Self {
        let mut cities: Vec<&TimelineItem> = items
            .iter()
            .filter(|item| item.is_city() && item.is_finite())
            .collect();
        cities.sort_by(|a, b| a.start_offset.total_cmp(&b.start_offset));

        // End offset of the last stay placed in each open lane.
        let mut lane_ends: Vec<f64> = Vec::new();
        let mut assigned: Vec<(String, usize)> = Vec::with_capacity(cities.len());

        for city in cities {
            let lane = match lane_ends.iter().position(|&end| end <= city.start_offset) {
                Some(lane) => lane,
                None => {
                    lane_ends.push(f64::NEG_INFINITY);
                    lane_ends.len() - 1
                }
            };
            lane_ends[lane] = city.end_offset();
            assigned.push((city.id.clone(), lane));
        }

        let stack_count = lane_ends.len();
        let order: Vec<(String, StackSlot)> = assigned
            .into_iter()
            .map(|(id, stack_index)| {
                (
                    id,
                    StackSlot {
                        stack_index,
                        stack_count,
                    },
                )
            })
            .collect();
        let index = order
            .iter()
            .enumerate()
            .map(|(pos, (id, _))| (id.clone(), pos))
            .collect();

        Self {
            order,
            index,
            stack_count,
        }
    }

    pub fn slot(&self, id: &str) -> Option<StackSlot> {
        self.index.get(id).map(|&pos| self.order[pos].1)
    }

    pub fn stack_count(&self) -> usize {
        self.stack_count
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Slots in start-offset order.
    pub fn slots(&self) -> impl Iterator<Item = (&str, StackSlot)> {
        self.order.iter().map(|(id, slot)| (id.as_str(), *slot))
    }

    /// Approved primary-lane stays of `items`, in start-offset order.
    pub fn primary_cities<'a>(&self, items: &'a [TimelineItem]) -> Vec<&'a TimelineItem> {
        self.cities_in_lane(items, 0)
            .into_iter()
            .filter(|city| city.approved)
            .collect()
    }

    /// Stays of `items` placed in `stack_index`, in start-offset order.
    pub fn cities_in_lane<'a>(
        &self,
        items: &'a [TimelineItem],
        stack_index: usize,
    ) -> Vec<&'a TimelineItem> {
        let by_id: HashMap<&str, &TimelineItem> = items
            .iter()
            .filter(|item| item.is_city())
            .map(|item| (item.id.as_str(), item))
            .collect();
        self.order
            .iter()
            .filter(|(_, slot)| slot.stack_index == stack_index)
            .filter_map(|(id, _)| by_id.get(id.as_str()).copied())
            .collect()
    }
}

/// Colour-slot key for an alternative stay.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSlotKey {
    pub group: Option<String>,
    pub option: u32,
}

/// Key used to colour alternative plan options consistently.
///
/// Returns `None` for ordinary primary stays. An explicit
/// `plan_option_index` takes precedence over the stack index.
pub fn plan_slot_key(city: &TimelineItem, slot: StackSlot) -> Option<PlanSlotKey> {
    if city.plan_group.is_none() && slot.is_primary() {
        return None;
    }
    let option = city
        .plan_option_index
        .unwrap_or(slot.stack_index as u32);
    Some(PlanSlotKey {
        group: city.plan_group.clone(),
        option,
    })
}
