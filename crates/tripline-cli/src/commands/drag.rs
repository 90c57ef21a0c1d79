use std::path::PathBuf;

use clap::Args;
use tripline_core::interaction::offset_to_pixels;
use tripline_core::{Config, DragMode, Event, Orientation, Point, TimelineBounds};

use super::{load_trip, print_json};

#[derive(Args)]
pub struct DragArgs {
    /// Trip document (JSON)
    pub trip: PathBuf,
    /// Item to grab
    #[arg(long)]
    pub item: String,
    /// Which part of the item is grabbed (move, resize-left, resize-right)
    #[arg(long, default_value = "move")]
    pub mode: DragMode,
    /// Pointer travel along the day axis, in pixels
    #[arg(long, allow_negative_numbers = true)]
    pub delta: f64,
    /// Pointer travel across the day axis, in pixels
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub cross: f64,
    /// Number of pointer-move events between press and release
    #[arg(long, default_value_t = 4)]
    pub steps: u32,
    /// Layout direction (horizontal, vertical); defaults to the configured one
    #[arg(long)]
    pub orientation: Option<Orientation>,
    /// Timeline scale; defaults to the configured one
    #[arg(long)]
    pub pixels_per_day: Option<f64>,
    /// Add to the selection instead of replacing it
    #[arg(long)]
    pub multi: bool,
    /// Cancel the gesture instead of releasing it
    #[arg(long)]
    pub cancel: bool,
}

/// Screen point at `along` pixels on the day axis and `across` pixels off it.
fn screen_point(orientation: Orientation, along: f64, across: f64) -> Point {
    match orientation {
        Orientation::Horizontal => Point::new(along, across),
        Orientation::Vertical => Point::new(across, along),
    }
}

pub fn run(args: DragArgs) -> Result<(), Box<dyn std::error::Error>> {
    let trip = load_trip(&args.trip)?;
    let target = trip.require_item(&args.item)?;

    let mut config = Config::load_or_default();
    if let Some(orientation) = args.orientation {
        config.interaction.orientation = orientation;
    }
    if let Some(pixels_per_day) = args.pixels_per_day {
        config.interaction.pixels_per_day = pixels_per_day;
    }
    let orientation = config.interaction.orientation;
    let mut engine = config.interaction_engine();

    // Press on the grabbed handle of the item as it is painted.
    let bounds = TimelineBounds::from_items(&trip.items);
    let grabbed = match args.mode {
        DragMode::ResizeRight => target.end_offset(),
        DragMode::Move | DragMode::ResizeLeft => target.start_offset,
    };
    let origin = offset_to_pixels(grabbed, &bounds, config.interaction.pixels_per_day);

    let mut events: Vec<Event> = Vec::new();
    engine.pointer_down(
        &trip.items,
        &args.item,
        args.mode,
        screen_point(orientation, origin, 0.0),
        args.multi,
    );

    let steps = args.steps.max(1);
    for step in 1..=steps {
        let fraction = f64::from(step) / f64::from(steps);
        let point = screen_point(
            orientation,
            origin + args.delta * fraction,
            args.cross * fraction,
        );
        events.extend(engine.pointer_move(point));
    }

    let release = screen_point(orientation, origin + args.delta, args.cross);
    let last = if args.cancel {
        engine.pointer_cancel()
    } else {
        engine.pointer_up(release)
    };
    events.extend(last);

    tracing::debug!(
        events = events.len(),
        committed = events.iter().any(Event::is_commit),
        "gesture replayed"
    );
    print_json(&events)
}
