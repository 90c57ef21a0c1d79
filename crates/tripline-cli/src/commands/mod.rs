pub mod config;
pub mod drag;
pub mod layout;
pub mod links;
pub mod repair;

use std::path::Path;

use tripline_core::Trip;

/// Read a trip document and reject malformed items.
pub(crate) fn load_trip(path: &Path) -> Result<Trip, Box<dyn std::error::Error>> {
    let trip = Trip::load(path)?;
    trip.validate()?;
    tracing::debug!(path = %path.display(), items = trip.items.len(), "trip loaded");
    Ok(trip)
}

pub(crate) fn print_json<T: serde::Serialize + ?Sized>(
    value: &T,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
