use std::path::PathBuf;

use clap::Args;
use tripline_core::timeline::{fill_missing_transfers, LinkStatus};
use tripline_core::Config;

use super::{load_trip, print_json};

#[derive(Args)]
pub struct LinksArgs {
    /// Trip document (JSON)
    pub trip: PathBuf,
    /// Print the trip with placeholder transfers added for unlinked stays
    #[arg(long)]
    pub fill: bool,
}

pub fn run(args: LinksArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut trip = load_trip(&args.trip)?;
    let links = Config::load_or_default()
        .layout_engine()
        .compute(&trip.items)
        .route_links;

    for link in &links {
        match link.status {
            LinkStatus::AmbiguousTravel => tracing::warn!(
                link = %link.id,
                candidates = ?link.candidates,
                "several transfers could bridge these stays"
            ),
            LinkStatus::CoincidentCities => {
                tracing::warn!(link = %link.id, "stays start at the same offset")
            }
            LinkStatus::Linked | LinkStatus::Unlinked => {}
        }
    }

    if !args.fill {
        return print_json(&links);
    }

    let before = trip.items.len();
    trip.items = fill_missing_transfers(&trip.items, &links);
    tracing::info!(added = trip.items.len() - before, "placeholder transfers added");
    println!("{}", trip.to_json_pretty()?);
    Ok(())
}
