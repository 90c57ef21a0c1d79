mod axis;
mod engine;
mod session;
mod snap;

pub use axis::{offset_to_pixels, pixels_to_offset, AxisProjection, Orientation, Point};
pub use engine::{
    InteractionConfig, InteractionEngine, InteractionPhase, InteractionState,
    DEFAULT_DRAG_THRESHOLD_PX, DEFAULT_PIXELS_PER_DAY,
};
pub use session::{DragMode, DragSession, DEFAULT_CASCADE_EPSILON};
pub use snap::snap;
