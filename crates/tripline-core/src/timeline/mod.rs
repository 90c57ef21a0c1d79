//! Timeline layout.
//!
//! This module provides:
//! - The visible day window over all items
//! - Overlap stacking for stays and lane packing for activities
//! - Route links between consecutive stays and the transfers bridging them
//! - Gap/overlap classification with one-click repairs

mod bounds;
mod defects;
mod item;
mod lanes;
mod layout;
mod route;
mod stack;

pub use bounds::{TimelineBounds, MAX_DAY_COUNT};
pub use defects::{
    classify_defects, repair_city, Adjacency, CityDefects, DefectClassifier, FillMode,
    DEFAULT_DEFECT_EPSILON,
};
pub use item::{
    DragHandle, ItemKind, TimelineItem, TransportMode, DAY_GRID_STEP,
    PLACEHOLDER_TRANSFER_DURATION, TRANSFER_GRID_STEP,
};
pub use lanes::{pack_activity_lanes, LanePacker, PackedLanes, DEFAULT_LANE_GAP, DEFAULT_MIN_LANES};
pub use layout::{CitySlot, LayoutEngine, TimelineLayout};
pub use route::{
    fill_missing_transfers, link_id, resolve_route_links, LinkStatus, RouteLink,
    RouteLinkResolver, DEFAULT_LINK_TOLERANCE,
};
pub use stack::{plan_slot_key, PlanSlotKey, StackLayout, StackSlot};
