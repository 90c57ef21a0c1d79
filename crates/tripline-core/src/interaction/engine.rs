//! Pointer-driven editing state machine.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> PendingDrag -> ActiveDrag -> Idle
//!              \-------------------->/
//! ```
//!
//! A gesture stays pending until the pointer travels past the drag threshold,
//! which is what tells a click from a drag. While active, every move emits a
//! deferred update; release emits the single committed update. Cancel drops
//! the gesture without committing.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = InteractionEngine::new(InteractionConfig::default());
//! engine.pointer_down(&items, "rome", DragMode::ResizeRight, point, false);
//! engine.pointer_move(next_point); // Some(Event::ItemsUpdated { defer_commit: true, .. })
//! engine.pointer_up(last_point);   // Some(Event::ItemsUpdated { defer_commit: false, .. })
//! ```

use serde::{Deserialize, Serialize};

use super::axis::{AxisProjection, Orientation, Point};
use super::session::{DragMode, DragSession, DEFAULT_CASCADE_EPSILON};
use crate::events::{Event, SelectOptions};
use crate::timeline::{repair_city, DefectClassifier, RouteLinkResolver, StackLayout, TimelineItem};

/// Pointer travel below which a gesture is still a click, in pixels.
pub const DEFAULT_DRAG_THRESHOLD_PX: f64 = 5.0;

pub const DEFAULT_PIXELS_PER_DAY: f64 = 80.0;

/// Tunables of the interaction engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionConfig {
    #[serde(default = "default_drag_threshold_px")]
    pub drag_threshold_px: f64,
    #[serde(default = "default_pixels_per_day")]
    pub pixels_per_day: f64,
    #[serde(default = "default_cascade_epsilon")]
    pub cascade_epsilon: f64,
    #[serde(default)]
    pub orientation: Orientation,
}

fn default_drag_threshold_px() -> f64 {
    DEFAULT_DRAG_THRESHOLD_PX
}
fn default_pixels_per_day() -> f64 {
    DEFAULT_PIXELS_PER_DAY
}
fn default_cascade_epsilon() -> f64 {
    DEFAULT_CASCADE_EPSILON
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: DEFAULT_DRAG_THRESHOLD_PX,
            pixels_per_day: DEFAULT_PIXELS_PER_DAY,
            cascade_epsilon: DEFAULT_CASCADE_EPSILON,
            orientation: Orientation::Horizontal,
        }
    }
}

/// Where the engine is in a gesture.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InteractionState {
    #[default]
    Idle,
    PendingDrag(DragSession),
    ActiveDrag(DragSession),
}

/// Coarse phase of [`InteractionState`], for queries and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionPhase {
    Idle,
    PendingDrag,
    ActiveDrag,
}

impl InteractionState {
    pub fn phase(&self) -> InteractionPhase {
        match self {
            Self::Idle => InteractionPhase::Idle,
            Self::PendingDrag(_) => InteractionPhase::PendingDrag,
            Self::ActiveDrag(_) => InteractionPhase::ActiveDrag,
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        match self {
            Self::Idle => None,
            Self::PendingDrag(session) | Self::ActiveDrag(session) => Some(session),
        }
    }
}

/// Interaction engine.
///
/// Owns the drag session exclusively for the length of a gesture. The host's
/// item set is only read at pointer-down and only replaced through the
/// returned events.
#[derive(Debug, Clone)]
pub struct InteractionEngine<P = Orientation> {
    config: InteractionConfig,
    projection: P,
    can_edit: bool,
    state: InteractionState,
    /// Item whose trailing click is swallowed after a committed drag.
    suppress_click: Option<String>,
}

impl InteractionEngine<Orientation> {
    /// Create an engine projecting along the configured orientation.
    pub fn new(config: InteractionConfig) -> Self {
        let projection = config.orientation;
        Self::with_projection(config, projection)
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.config.orientation = orientation;
        self.projection = orientation;
    }
}

impl<P: AxisProjection> InteractionEngine<P> {
    /// Create an engine with a custom screen-to-day-axis projection.
    pub fn with_projection(config: InteractionConfig, projection: P) -> Self {
        Self {
            config,
            projection,
            can_edit: true,
            state: InteractionState::Idle,
            suppress_click: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn phase(&self) -> InteractionPhase {
        self.state.phase()
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn can_edit(&self) -> bool {
        self.can_edit
    }

    // ── Settings ─────────────────────────────────────────────────────

    /// Change the scale. Takes effect on the next move, including mid-drag.
    pub fn set_pixels_per_day(&mut self, pixels_per_day: f64) {
        self.config.pixels_per_day = pixels_per_day;
    }

    /// Disable or enable every mutating entry point.
    pub fn set_can_edit(&mut self, can_edit: bool) {
        self.can_edit = can_edit;
    }

    // ── Pointer events ───────────────────────────────────────────────

    /// Start a gesture on `target_id`.
    ///
    /// Snapshots the whole of `items`. The engine stays idle when the target
    /// is not present. A gesture still in progress is cancelled first; the
    /// returned event retracts its previews.
    pub fn pointer_down(
        &mut self,
        items: &[TimelineItem],
        target_id: &str,
        mode: DragMode,
        point: Point,
        multi: bool,
    ) -> Option<Event> {
        let retracted = self.pointer_cancel();
        self.suppress_click = None;
        let origin = self.projection.day_axis(point);
        match DragSession::begin(items, target_id, mode, origin) {
            Some(session) => {
                let session = session
                    .with_cascade_epsilon(self.config.cascade_epsilon)
                    .with_multi(multi);
                tracing::debug!(target_id, mode = mode.as_str(), "drag pending");
                self.state = InteractionState::PendingDrag(session);
            }
            None => {
                tracing::debug!(target_id, "pointer down on unknown item, ignoring");
            }
        }
        retracted
    }

    /// Track the pointer. Returns a deferred update when the preview changes.
    ///
    /// An active drag whose editing rights were revoked ends here with the
    /// baseline restored.
    pub fn pointer_move(&mut self, point: Point) -> Option<Event> {
        let axis = self.projection.day_axis(point);
        match std::mem::take(&mut self.state) {
            InteractionState::Idle => None,
            InteractionState::PendingDrag(session) => {
                let displacement = (axis - session.origin()).abs();
                if !self.can_edit || !(displacement >= self.config.drag_threshold_px) {
                    self.state = InteractionState::PendingDrag(session);
                    return None;
                }
                tracing::debug!(target_id = session.target_id(), displacement, "drag active");
                self.frame(session, axis)
            }
            InteractionState::ActiveDrag(session) if !self.can_edit => {
                tracing::debug!(target_id = session.target_id(), "editing revoked mid-drag");
                Self::retract(&session)
            }
            InteractionState::ActiveDrag(session) => self.frame(session, axis),
        }
    }

    /// Finish the gesture.
    ///
    /// A real drag commits its final item set and suppresses the click on the
    /// dragged item that follows. A gesture that never became a drag is a
    /// click and selects the target. Without editing rights an active drag
    /// is cancelled instead of committed.
    pub fn pointer_up(&mut self, point: Point) -> Option<Event> {
        let axis = self.projection.day_axis(point);
        match std::mem::take(&mut self.state) {
            InteractionState::Idle => None,
            InteractionState::PendingDrag(session) => Some(Event::Selected {
                id: Some(session.target_id().to_string()),
                options: SelectOptions {
                    multi: session.multi(),
                    is_city: session.kind() == crate::timeline::ItemKind::City,
                },
            }),
            InteractionState::ActiveDrag(session) if !self.can_edit => {
                tracing::debug!(target_id = session.target_id(), "editing revoked, drag dropped");
                Self::retract(&session)
            }
            InteractionState::ActiveDrag(mut session) => {
                let items = match self.delta_days(&session, axis) {
                    Some(delta) => session.preview(delta),
                    None => session
                        .take_working()
                        .unwrap_or_else(|| session.baseline().to_vec()),
                };
                tracing::debug!(target_id = session.target_id(), "drag committed");
                self.suppress_click = Some(session.target_id().to_string());
                Some(Event::ItemsUpdated {
                    items,
                    defer_commit: false,
                })
            }
        }
    }

    /// Abandon the gesture without committing.
    ///
    /// If previews were already emitted, the baseline is re-emitted as a
    /// deferred update so the host can drop them.
    pub fn pointer_cancel(&mut self) -> Option<Event> {
        match std::mem::take(&mut self.state) {
            InteractionState::ActiveDrag(session) => {
                tracing::debug!(target_id = session.target_id(), "drag cancelled");
                Self::retract(&session)
            }
            _ => None,
        }
    }

    /// A click that did not come through a pointer gesture of this engine,
    /// e.g. on the background (`target: None`) or from the keyboard.
    ///
    /// Only the click on the item a drag just released is swallowed.
    pub fn click(&mut self, target: Option<&TimelineItem>, multi: bool) -> Option<Event> {
        let dragged = self.suppress_click.take();
        if dragged.is_some() && dragged.as_deref() == target.map(|item| item.id.as_str()) {
            return None;
        }
        Some(Event::Selected {
            id: target.map(|item| item.id.clone()),
            options: SelectOptions {
                multi,
                is_city: target.is_some_and(TimelineItem::is_city),
            },
        })
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Add a transfer placeholder between two stays.
    ///
    /// No-op when editing is disabled, either stay is unknown, or a transfer
    /// already links them.
    pub fn add_transfer(
        &mut self,
        items: &[TimelineItem],
        from_city_id: &str,
        to_city_id: &str,
    ) -> Option<Event> {
        if !self.can_edit {
            return None;
        }
        let from = items.iter().find(|item| item.id == from_city_id && item.is_city())?;
        let to = items.iter().find(|item| item.id == to_city_id && item.is_city())?;

        let layout = StackLayout::assign(items);
        let already_linked = RouteLinkResolver::new()
            .resolve(items, &layout)
            .iter()
            .any(|link| {
                link.from_city_id == from.id && link.to_city_id == to.id && link.is_linked()
            });
        if already_linked {
            return None;
        }

        let mut updated = items.to_vec();
        updated.push(TimelineItem::placeholder_transfer(from, to));
        Some(Event::ItemsUpdated {
            items: updated,
            defer_commit: false,
        })
    }

    /// Apply the suggested gap/overlap repair to one stay.
    pub fn apply_repair(&mut self, items: &[TimelineItem], city_id: &str) -> Option<Event> {
        if !self.can_edit {
            return None;
        }
        let layout = StackLayout::assign(items);
        let defects = DefectClassifier::new().classify(items, &layout);
        let repaired = repair_city(items, &defects, city_id)?;
        Some(Event::ItemsUpdated {
            items: repaired,
            defer_commit: false,
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn delta_days(&self, session: &DragSession, axis: f64) -> Option<f64> {
        let pixels_per_day = self.config.pixels_per_day;
        if !pixels_per_day.is_finite() || pixels_per_day <= 0.0 || !axis.is_finite() {
            return None;
        }
        Some((axis - session.origin()) / pixels_per_day)
    }

    /// Baseline re-emitted as a preview, if the host saw any frame.
    fn retract(session: &DragSession) -> Option<Event> {
        session.working().map(|_| Event::ItemsUpdated {
            items: session.baseline().to_vec(),
            defer_commit: true,
        })
    }

    fn frame(&mut self, mut session: DragSession, axis: f64) -> Option<Event> {
        let event = self.delta_days(&session, axis).and_then(|delta| {
            let items = session.preview(delta);
            tracing::trace!(target_id = session.target_id(), delta, "drag frame");
            session.record_frame(&items).then_some(Event::ItemsUpdated {
                items,
                defer_commit: true,
            })
        });
        self.state = InteractionState::ActiveDrag(session);
        event
    }
}
