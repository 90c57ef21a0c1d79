//! Route links between consecutive primary stays.
//!
//! Transfers store only their own offset and duration. Which two stays a
//! transfer connects is recovered here by offset matching, as a derived view
//! that never mutates the item set.

use serde::{Deserialize, Serialize};

use super::item::TimelineItem;
use super::stack::StackLayout;

/// Slack around the gap between two stays when matching transfers, in days.
pub const DEFAULT_LINK_TOLERANCE: f64 = 0.051;

/// How a pair of consecutive stays resolved against the transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkStatus {
    /// Exactly one transfer bridges the pair.
    Linked,
    /// No transfer bridges the pair; a placeholder may be synthesized.
    Unlinked,
    /// Several transfers qualify; none is chosen.
    AmbiguousTravel,
    /// Both stays start at the same offset, so their order is undefined.
    CoincidentCities,
}

/// Derived link between two consecutive primary stays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLink {
    pub id: String,
    pub from_city_id: String,
    pub to_city_id: String,
    /// Set only when `status` is `Linked`.
    pub travel_item_id: Option<String>,
    /// Every transfer that matched the pair's window.
    pub candidates: Vec<String>,
    pub status: LinkStatus,
}

impl RouteLink {
    pub fn is_linked(&self) -> bool {
        self.status == LinkStatus::Linked
    }
}

/// Matches consecutive primary stays with the transfers between them.
#[derive(Debug, Clone)]
pub struct RouteLinkResolver {
    tolerance: f64,
}

impl RouteLinkResolver {
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_LINK_TOLERANCE,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.max(0.0);
        self
    }

    /// Resolve links for `items`, given their stack layout.
    pub fn resolve(&self, items: &[TimelineItem], layout: &StackLayout) -> Vec<RouteLink> {
        let cities = layout.primary_cities(items);
        let transfers: Vec<&TimelineItem> = items
            .iter()
            .filter(|item| item.kind.is_transfer() && item.is_finite())
            .collect();

        cities
            .windows(2)
            .map(|pair| self.link_pair(pair[0], pair[1], &transfers))
            .collect()
    }

    fn link_pair(
        &self,
        from: &TimelineItem,
        to: &TimelineItem,
        transfers: &[&TimelineItem],
    ) -> RouteLink {
        let from_end = from.end_offset();
        let lo = from_end.min(to.start_offset) - self.tolerance;
        let hi = from_end.max(to.start_offset) + self.tolerance;

        let candidates: Vec<String> = transfers
            .iter()
            .filter(|travel| travel.start_offset >= lo && travel.start_offset <= hi)
            .map(|travel| travel.id.clone())
            .collect();

        let status = if from.start_offset == to.start_offset {
            LinkStatus::CoincidentCities
        } else {
            match candidates.len() {
                0 => LinkStatus::Unlinked,
                1 => LinkStatus::Linked,
                _ => LinkStatus::AmbiguousTravel,
            }
        };
        let travel_item_id = match status {
            LinkStatus::Linked => candidates.first().cloned(),
            _ => None,
        };

        RouteLink {
            id: link_id(&from.id, &to.id),
            from_city_id: from.id.clone(),
            to_city_id: to.id.clone(),
            travel_item_id,
            candidates,
            status,
        }
    }
}

impl Default for RouteLinkResolver {
    fn default() -> Self {
        Self::new()
    }
}

pub fn link_id(from_city_id: &str, to_city_id: &str) -> String {
    format!("{from_city_id}->{to_city_id}")
}

/// Convenience function to resolve links with default settings
pub fn resolve_route_links(items: &[TimelineItem]) -> Vec<RouteLink> {
    let layout = StackLayout::assign(items);
    RouteLinkResolver::new().resolve(items, &layout)
}

/// Copy of `items` with a transfer placeholder for every unlinked pair.
///
/// Pairs that are ambiguous or coincident are left alone.
pub fn fill_missing_transfers(items: &[TimelineItem], links: &[RouteLink]) -> Vec<TimelineItem> {
    let mut filled = items.to_vec();
    for link in links.iter().filter(|link| link.status == LinkStatus::Unlinked) {
        let from = items.iter().find(|item| item.id == link.from_city_id);
        let to = items.iter().find(|item| item.id == link.to_city_id);
        if let (Some(from), Some(to)) = (from, to) {
            filled.push(TimelineItem::placeholder_transfer(from, to));
        }
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::item::{ItemKind, TransportMode};

    fn trip() -> Vec<TimelineItem> {
        vec![
            TimelineItem::city("lis", "Lisbon", 0.0, 3.0),
            TimelineItem::city("opo", "Porto", 3.0, 2.0),
            TimelineItem::city("mad", "Madrid", 5.0, 3.0),
            TimelineItem::transfer("train", TransportMode::Train, 3.0, 0.15),
        ]
    }

    #[test]
    fn matches_transfer_at_city_boundary() {
        let links = resolve_route_links(&trip());
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].id, "lis->opo");
        assert_eq!(links[0].travel_item_id.as_deref(), Some("train"));
        assert!(links[0].is_linked());
    }

    #[test]
    fn reports_unlinked_pair() {
        let links = resolve_route_links(&trip());
        assert_eq!(links[1].status, LinkStatus::Unlinked);
        assert!(links[1].travel_item_id.is_none());
    }

    #[test]
    fn transfer_inside_gap_is_found() {
        let items = vec![
            TimelineItem::city("a", "A", 0.0, 2.0),
            TimelineItem::city("b", "B", 3.0, 2.0),
            TimelineItem::transfer("bus", TransportMode::Bus, 2.5, 0.3),
        ];
        let links = resolve_route_links(&items);
        assert_eq!(links[0].travel_item_id.as_deref(), Some("bus"));
    }

    #[test]
    fn multiple_candidates_are_flagged() {
        let mut items = trip();
        items.push(TimelineItem::transfer("flight", TransportMode::Flight, 3.05, 0.1));
        let links = resolve_route_links(&items);
        assert_eq!(links[0].status, LinkStatus::AmbiguousTravel);
        assert_eq!(links[0].candidates.len(), 2);
        assert!(links[0].travel_item_id.is_none());
    }

    #[test]
    fn alternative_stays_are_not_route_stops() {
        let mut items = trip();
        items.push(TimelineItem::city("alt", "Coimbra", 3.5, 1.0));
        let links = resolve_route_links(&items);
        assert!(links.iter().all(|l| l.from_city_id != "alt" && l.to_city_id != "alt"));
    }

    #[test]
    fn coincident_cities_are_flagged() {
        let items = vec![
            TimelineItem::city("a", "A", 2.0, 0.0),
            TimelineItem::city("b", "B", 2.0, 1.0),
        ];
        let links = resolve_route_links(&items);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].status, LinkStatus::CoincidentCities);
    }

    #[test]
    fn fill_adds_one_placeholder_per_unlinked_pair() {
        let items = trip();
        let links = resolve_route_links(&items);
        let filled = fill_missing_transfers(&items, &links);
        assert_eq!(filled.len(), items.len() + 1);

        let placeholder = filled.last().unwrap();
        assert_eq!(placeholder.kind, ItemKind::TravelEmpty);
        assert_eq!(placeholder.start_offset, 5.0);
        assert_eq!(placeholder.duration, 0.2);

        let relinked = resolve_route_links(&filled);
        assert!(relinked.iter().all(RouteLink::is_linked));
    }
}
