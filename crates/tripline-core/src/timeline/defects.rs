//! Gap and overlap detection along the primary route.
//!
//! Consecutive primary stays should be contiguous. Users may break that, so
//! each stay is classified against its neighbours and offered a one-click
//! repair. Nothing here is applied automatically.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::item::TimelineItem;
use super::stack::StackLayout;

/// Tolerance below which a misalignment is ignored, in days.
pub const DEFAULT_DEFECT_EPSILON: f64 = 0.05;

/// Relation of a stay's edge to its neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Adjacency {
    Aligned,
    Gap,
    Overlap,
}

/// Suggested one-click repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    /// Stretch or snap to fill the space between neighbours.
    Stretch,
    /// Overlapped on both sides: shrink to the space available.
    Shrink,
}

/// Classification of one primary stay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityDefects {
    pub city_id: String,
    /// End of the previous stay, or day 0 for the first.
    pub ideal_start: f64,
    /// Start of the next stay, or the stay's own end for the last.
    pub ideal_end: f64,
    pub start_diff: f64,
    pub end_diff: f64,
    pub before: Adjacency,
    pub after: Adjacency,
    pub fill_mode: Option<FillMode>,
}

impl CityDefects {
    pub fn gap_before(&self) -> bool {
        self.before == Adjacency::Gap
    }

    pub fn overlap_before(&self) -> bool {
        self.before == Adjacency::Overlap
    }

    pub fn gap_after(&self) -> bool {
        self.after == Adjacency::Gap
    }

    pub fn overlap_after(&self) -> bool {
        self.after == Adjacency::Overlap
    }

    pub fn is_aligned(&self) -> bool {
        self.before == Adjacency::Aligned && self.after == Adjacency::Aligned
    }
}

/// Classifies primary stays against their neighbours.
#[derive(Debug, Clone)]
pub struct DefectClassifier {
    epsilon: f64,
}

impl DefectClassifier {
    pub fn new() -> Self {
        Self {
            epsilon: DEFAULT_DEFECT_EPSILON,
        }
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon.max(0.0);
        self
    }

    /// Classify every approved primary-lane stay of `items`.
    ///
    /// Neighbours are the adjacent approved stays in start order, drawn from
    /// the primary lane and from any deeper slot that is not part of a plan
    /// group. A stay pushed into a deeper slot by a mistaken overlap is still
    /// a neighbour; deliberate alternatives are not.
    pub fn classify(&self, items: &[TimelineItem], layout: &StackLayout) -> Vec<CityDefects> {
        let by_id: HashMap<&str, &TimelineItem> = items
            .iter()
            .filter(|item| item.is_city())
            .map(|item| (item.id.as_str(), item))
            .collect();
        let route: Vec<(&TimelineItem, bool)> = layout
            .slots()
            .filter_map(|(id, slot)| {
                let city = *by_id.get(id)?;
                let counts = city.approved && (slot.is_primary() || city.plan_group.is_none());
                counts.then_some((city, slot.is_primary()))
            })
            .collect();

        route
            .iter()
            .enumerate()
            .filter(|(_, (_, primary))| *primary)
            .map(|(i, (city, _))| {
                let prev = i.checked_sub(1).map(|p| route[p].0);
                let next = route.get(i + 1).map(|n| n.0);
                self.classify_city(city, prev, next)
            })
            .collect()
    }

    fn classify_city(
        &self,
        city: &TimelineItem,
        prev: Option<&TimelineItem>,
        next: Option<&TimelineItem>,
    ) -> CityDefects {
        let start = city.start_offset;
        let end = city.end_offset();
        let ideal_start = prev.map_or(0.0, TimelineItem::end_offset);
        let ideal_end = next.map_or(end, |n| n.start_offset);

        // Leading days before the first stay count as a gap; there is
        // nothing for it to overlap.
        let before = if start > ideal_start + self.epsilon {
            Adjacency::Gap
        } else if prev.is_some() && start < ideal_start - self.epsilon {
            Adjacency::Overlap
        } else {
            Adjacency::Aligned
        };
        let after = match next {
            Some(_) if ideal_end > end + self.epsilon => Adjacency::Gap,
            Some(_) if ideal_end < end - self.epsilon => Adjacency::Overlap,
            _ => Adjacency::Aligned,
        };

        let fill_mode = if before == Adjacency::Overlap && after == Adjacency::Overlap {
            Some(FillMode::Shrink)
        } else if before != Adjacency::Aligned || after != Adjacency::Aligned {
            Some(FillMode::Stretch)
        } else {
            None
        };

        CityDefects {
            city_id: city.id.clone(),
            ideal_start,
            ideal_end,
            start_diff: (start - ideal_start).abs(),
            end_diff: (end - ideal_end).abs(),
            before,
            after,
            fill_mode,
        }
    }
}

impl Default for DefectClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to classify with default settings
pub fn classify_defects(items: &[TimelineItem]) -> Vec<CityDefects> {
    let layout = StackLayout::assign(items);
    DefectClassifier::new().classify(items, &layout)
}

/// Apply the suggested repair for `city_id`.
///
/// The stay is fitted to `[ideal_start, ideal_end]`, keeping at least its
/// kind's minimum duration. Returns `None` when the id is not a classified
/// primary stay or when the stay is already aligned.
pub fn repair_city(
    items: &[TimelineItem],
    defects: &[CityDefects],
    city_id: &str,
) -> Option<Vec<TimelineItem>> {
    let defect = defects.iter().find(|d| d.city_id == city_id)?;
    defect.fill_mode?;

    let mut repaired = items.to_vec();
    let city = repaired.iter_mut().find(|item| item.id == city_id)?;
    let min_duration = city.kind.min_duration();
    city.start_offset = defect.ideal_start;
    city.duration = (defect.ideal_end - defect.ideal_start).max(min_duration);
    Some(repaired)
}
