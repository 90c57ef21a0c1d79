//! Timeline item types and utilities.

use serde::{Deserialize, Serialize};

/// Grid step for stays and activities (half a day).
pub const DAY_GRID_STEP: f64 = 0.5;

/// Grid step for transfers.
pub const TRANSFER_GRID_STEP: f64 = 0.05;

/// Nominal length of a synthesized transfer placeholder, in days.
pub const PLACEHOLDER_TRANSFER_DURATION: f64 = 0.2;

/// Kind of timeline item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemKind {
    City,        // Multi-day stay
    Travel,      // Configured transfer
    TravelEmpty, // Transfer placeholder, no transport chosen
    Activity,    // Bounded event
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::City => "city",
            Self::Travel => "travel",
            Self::TravelEmpty => "travel-empty",
            Self::Activity => "activity",
        }
    }

    pub fn is_transfer(&self) -> bool {
        matches!(self, Self::Travel | Self::TravelEmpty)
    }

    /// Quantization step all interactive edits round to.
    pub fn snap_step(&self) -> f64 {
        if self.is_transfer() {
            TRANSFER_GRID_STEP
        } else {
            DAY_GRID_STEP
        }
    }

    /// Smallest duration an edit may leave behind.
    pub fn min_duration(&self) -> f64 {
        self.snap_step()
    }

    /// Handles the presentation layer should expose for hit-testing.
    ///
    /// Only stays carry both edges. The interaction engine accepts any mode
    /// for any kind; this is advisory.
    pub fn drag_handles(&self) -> &'static [DragHandle] {
        match self {
            Self::City => &[DragHandle::Body, DragHandle::StartEdge, DragHandle::EndEdge],
            Self::Activity | Self::Travel => &[DragHandle::Body, DragHandle::EndEdge],
            Self::TravelEmpty => &[DragHandle::Body],
        }
    }
}

/// Part of an item the pointer can grab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DragHandle {
    Body,
    StartEdge,
    EndEdge,
}

/// Means of transport for a configured transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Flight,
    Train,
    Bus,
    Car,
    Ferry,
    Walk,
    Other,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flight => "flight",
            Self::Train => "train",
            Self::Bus => "bus",
            Self::Car => "car",
            Self::Ferry => "ferry",
            Self::Walk => "walk",
            Self::Other => "other",
        }
    }
}

/// A single item on the trip timeline.
///
/// Offsets and durations are measured in days from the trip's day 0 and may
/// be fractional; offsets may be negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineItem {
    pub id: String,
    pub kind: ItemKind,
    pub start_offset: f64,
    pub duration: f64,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Unapproved stays are drafts and never take part in the through-route.
    #[serde(default = "default_true")]
    pub approved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_mode: Option<TransportMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_before_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_after_minutes: Option<u32>,
    /// Groups alternative stays that compete for the same stretch of the trip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_option_index: Option<u32>,
}

fn default_true() -> bool {
    true
}

impl TimelineItem {
    /// Create a new item with no optional metadata.
    pub fn new(
        id: impl Into<String>,
        kind: ItemKind,
        title: impl Into<String>,
        start_offset: f64,
        duration: f64,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            start_offset,
            duration,
            title: title.into(),
            description: None,
            color: None,
            approved: true,
            transport_mode: None,
            activity_type: None,
            buffer_before_minutes: None,
            buffer_after_minutes: None,
            plan_group: None,
            plan_option_index: None,
        }
    }

    pub fn city(id: impl Into<String>, title: impl Into<String>, start_offset: f64, duration: f64) -> Self {
        Self::new(id, ItemKind::City, title, start_offset, duration)
    }

    pub fn activity(
        id: impl Into<String>,
        title: impl Into<String>,
        start_offset: f64,
        duration: f64,
    ) -> Self {
        Self::new(id, ItemKind::Activity, title, start_offset, duration)
    }

    pub fn transfer(
        id: impl Into<String>,
        mode: TransportMode,
        start_offset: f64,
        duration: f64,
    ) -> Self {
        let mut item = Self::new(id, ItemKind::Travel, mode.as_str(), start_offset, duration);
        item.transport_mode = Some(mode);
        item
    }

    /// Transfer placeholder anchored at the end of `from`, with a fresh id.
    pub fn placeholder_transfer(from: &TimelineItem, to: &TimelineItem) -> Self {
        Self::new(
            uuid::Uuid::new_v4().to_string(),
            ItemKind::TravelEmpty,
            format!("{} → {}", from.title, to.title),
            from.end_offset(),
            PLACEHOLDER_TRANSFER_DURATION,
        )
    }

    pub fn end_offset(&self) -> f64 {
        self.start_offset + self.duration
    }

    /// Whether offset and duration are usable numbers.
    pub fn is_finite(&self) -> bool {
        self.start_offset.is_finite() && self.duration.is_finite()
    }

    pub fn is_city(&self) -> bool {
        self.kind == ItemKind::City
    }

    /// Check if this item overlaps with another
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_offset < other.end_offset() && self.end_offset() > other.start_offset
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_approved(mut self, approved: bool) -> Self {
        self.approved = approved;
        self
    }

    pub fn with_activity_type(mut self, activity_type: impl Into<String>) -> Self {
        self.activity_type = Some(activity_type.into());
        self
    }

    pub fn with_buffers(mut self, before_minutes: u32, after_minutes: u32) -> Self {
        self.buffer_before_minutes = Some(before_minutes);
        self.buffer_after_minutes = Some(after_minutes);
        self
    }

    pub fn with_plan(mut self, group: impl Into<String>, option_index: Option<u32>) -> Self {
        self.plan_group = Some(group.into());
        self.plan_option_index = option_index;
        self
    }
}
