//! Screen-axis projection.
//!
//! The engine only ever reasons about one coordinate: the position along the
//! day axis. Which screen axis that is belongs to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::timeline::TimelineBounds;

/// Pointer position in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Maps a screen point onto the day axis, in pixels.
pub trait AxisProjection {
    fn day_axis(&self, point: Point) -> f64;
}

/// Layout direction of the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Days run left to right.
    #[default]
    Horizontal,
    /// Days run top to bottom.
    Vertical,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

impl std::str::FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            other => Err(format!("unknown orientation: {other}")),
        }
    }
}

impl AxisProjection for Orientation {
    fn day_axis(&self, point: Point) -> f64 {
        match self {
            Self::Horizontal => point.x,
            Self::Vertical => point.y,
        }
    }
}

impl<F> AxisProjection for F
where
    F: Fn(Point) -> f64,
{
    fn day_axis(&self, point: Point) -> f64 {
        self(point)
    }
}

/// Pixel position of `offset` inside a window starting at `bounds`.
pub fn offset_to_pixels(offset: f64, bounds: &TimelineBounds, pixels_per_day: f64) -> f64 {
    (offset - bounds.start_offset) * pixels_per_day
}

/// Day offset at pixel position `pixels` inside a window starting at `bounds`.
///
/// Returns the window start when the scale is unusable.
pub fn pixels_to_offset(pixels: f64, bounds: &TimelineBounds, pixels_per_day: f64) -> f64 {
    if !pixels_per_day.is_finite() || pixels_per_day <= 0.0 {
        return bounds.start_offset;
    }
    bounds.start_offset + pixels / pixels_per_day
}
