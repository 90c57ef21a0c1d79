//! Drag session: the baseline snapshot and the frame arithmetic.
//!
//! Every frame is recomputed from the baseline plus the total pointer
//! displacement, never from the previous frame, so rounding cannot drift
//! however many move events arrive.

use serde::{Deserialize, Serialize};

use super::snap::snap;
use crate::timeline::{ItemKind, StackLayout, TimelineItem};

/// Items starting this close to a resized stay's original end still follow it.
pub const DEFAULT_CASCADE_EPSILON: f64 = 0.051;

/// What the pointer grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DragMode {
    Move,
    ResizeLeft,
    ResizeRight,
}

impl DragMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::ResizeLeft => "resize-left",
            Self::ResizeRight => "resize-right",
        }
    }
}

impl std::str::FromStr for DragMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "move" => Ok(Self::Move),
            "resize-left" => Ok(Self::ResizeLeft),
            "resize-right" => Ok(Self::ResizeRight),
            other => Err(format!("unknown drag mode: {other}")),
        }
    }
}

/// State of one gesture, from pointer-down to release.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    target_id: String,
    target_index: usize,
    kind: ItemKind,
    mode: DragMode,
    /// The whole item set as it was at pointer-down.
    baseline: Vec<TimelineItem>,
    /// Day-axis pointer coordinate at pointer-down, in pixels.
    origin: f64,
    original_start: f64,
    original_duration: f64,
    /// End of the stay before the target in its stack slot.
    prev_city_end: Option<f64>,
    cascade_epsilon: f64,
    multi: bool,
    /// Last item set handed to the host.
    working: Option<Vec<TimelineItem>>,
}

impl DragSession {
    /// Snapshot `items` and start a gesture on `target_id`.
    ///
    /// Returns `None` when the target is not in `items`.
    pub fn begin(items: &[TimelineItem], target_id: &str, mode: DragMode, origin: f64) -> Option<Self> {
        let target_index = items.iter().position(|item| item.id == target_id)?;
        let target = &items[target_index];

        let prev_city_end = if target.is_city() {
            previous_city_end(items, target)
        } else {
            None
        };

        Some(Self {
            target_id: target.id.clone(),
            target_index,
            kind: target.kind,
            mode,
            baseline: items.to_vec(),
            origin,
            original_start: target.start_offset,
            original_duration: target.duration,
            prev_city_end,
            cascade_epsilon: DEFAULT_CASCADE_EPSILON,
            multi: false,
            working: None,
        })
    }

    pub fn with_cascade_epsilon(mut self, epsilon: f64) -> Self {
        self.cascade_epsilon = epsilon.max(0.0);
        self
    }

    pub fn with_multi(mut self, multi: bool) -> Self {
        self.multi = multi;
        self
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn mode(&self) -> DragMode {
        self.mode
    }

    pub fn origin(&self) -> f64 {
        self.origin
    }

    pub fn multi(&self) -> bool {
        self.multi
    }

    pub fn baseline(&self) -> &[TimelineItem] {
        &self.baseline
    }

    /// Item set most recently handed to the host, if any.
    pub fn working(&self) -> Option<&[TimelineItem]> {
        self.working.as_deref()
    }

    /// Record `items` as the latest frame. Returns `false` if unchanged.
    pub(crate) fn record_frame(&mut self, items: &[TimelineItem]) -> bool {
        if self.working.as_deref() == Some(items) {
            return false;
        }
        self.working = Some(items.to_vec());
        true
    }

    pub(crate) fn take_working(&mut self) -> Option<Vec<TimelineItem>> {
        self.working.take()
    }

    /// Item set after dragging by `delta_days` from the pointer-down position.
    pub fn preview(&self, delta_days: f64) -> Vec<TimelineItem> {
        let mut items = self.baseline.clone();
        if !delta_days.is_finite() {
            return items;
        }

        let step = self.kind.snap_step();
        let min_duration = self.kind.min_duration();

        match self.mode {
            DragMode::Move => {
                let target = &mut items[self.target_index];
                target.start_offset = snap(self.original_start + delta_days, step).max(0.0);
            }
            DragMode::ResizeRight => {
                let new_duration =
                    snap(self.original_duration + delta_days, step).max(min_duration);
                items[self.target_index].duration = new_duration;

                if self.kind == ItemKind::City {
                    let change = new_duration - self.original_duration;
                    let boundary = self.original_start + self.original_duration;
                    for (i, item) in items.iter_mut().enumerate() {
                        if i != self.target_index
                            && item.start_offset >= boundary - self.cascade_epsilon
                        {
                            item.start_offset += change;
                        }
                    }
                }
            }
            DragMode::ResizeLeft => {
                let fixed_end = self.original_start + self.original_duration;
                // Never drag further below day 0 than the item already was.
                let floor = self.original_start.min(0.0);
                let mut start = snap(self.original_start + delta_days, step).max(floor);
                if let Some(prev_end) = self.prev_city_end {
                    start = start.max(prev_end);
                }
                // The minimum duration wins over the neighbour clamp.
                start = start.min(fixed_end - min_duration);

                let target = &mut items[self.target_index];
                target.start_offset = start;
                target.duration = fixed_end - start;
            }
        }

        items
    }
}

/// End offset of the stay preceding `city` in its stack slot.
fn previous_city_end(items: &[TimelineItem], city: &TimelineItem) -> Option<f64> {
    let layout = StackLayout::assign(items);
    let slot = layout.slot(&city.id)?;
    let lane = layout.cities_in_lane(items, slot.stack_index);
    let pos = lane.iter().position(|c| c.id == city.id)?;
    pos.checked_sub(1).map(|p| lane[p].end_offset())
}
