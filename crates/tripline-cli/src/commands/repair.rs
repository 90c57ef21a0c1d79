use std::path::PathBuf;

use clap::Args;
use tripline_core::timeline::repair_city;
use tripline_core::Config;

use super::load_trip;

#[derive(Args)]
pub struct RepairArgs {
    /// Trip document (JSON)
    pub trip: PathBuf,
    /// Stay to fit to its neighbours
    pub city_id: String,
}

pub fn run(args: RepairArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut trip = load_trip(&args.trip)?;
    let city = trip.require_item(&args.city_id)?;
    if !city.is_city() {
        return Err(format!("'{}' is not a stay", args.city_id).into());
    }

    let layout = Config::load_or_default().layout_engine().compute(&trip.items);
    match repair_city(&trip.items, &layout.defects, &args.city_id) {
        Some(items) => trip.items = items,
        None => tracing::info!(city_id = %args.city_id, "nothing to repair"),
    }
    println!("{}", trip.to_json_pretty()?);
    Ok(())
}
