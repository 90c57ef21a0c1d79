//! # Tripline Core Library
//!
//! This library provides the scheduling and interaction logic behind the
//! Tripline itinerary planner. A trip is a set of stays, transfers and
//! activities placed on a timeline measured in fractional days. The library is
//! presentation-agnostic: hosts feed it items and pointer events and paint
//! whatever it derives.
//!
//! ## Architecture
//!
//! - **Timeline**: Day window, overlap stacking for stays, lane packing for
//!   activities, route links between stays, gap/overlap classification
//! - **Interaction**: A synchronous pointer state machine for moving and
//!   resizing items with snapping, cascading and deferred commit
//! - **Storage**: TOML-based configuration of the tunables
//!
//! ## Key Components
//!
//! - [`LayoutEngine`]: Every read-only view of an item set in one pass
//! - [`InteractionEngine`]: Move/resize gesture state machine
//! - [`Trip`]: Calendar anchor plus items
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod interaction;
pub mod storage;
pub mod timeline;
pub mod trip;

pub use error::{ConfigError, CoreError, ValidationError};
pub use events::{Event, SelectOptions, TimelineHost};
pub use interaction::{
    DragMode, DragSession, InteractionConfig, InteractionEngine, InteractionPhase, Orientation,
    Point,
};
pub use storage::Config;
pub use timeline::{
    CityDefects, ItemKind, LayoutEngine, RouteLink, StackLayout, TimelineBounds, TimelineItem,
    TimelineLayout,
};
pub use trip::Trip;
