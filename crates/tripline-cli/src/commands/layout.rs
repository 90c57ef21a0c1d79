use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use tripline_core::{Config, TimelineLayout};

use super::{load_trip, print_json};

#[derive(Args)]
pub struct LayoutArgs {
    /// Trip document (JSON)
    pub trip: PathBuf,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DayLabel {
    offset: f64,
    date: NaiveDate,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LayoutReport {
    start_date: NaiveDate,
    days: Vec<DayLabel>,
    #[serde(flatten)]
    layout: TimelineLayout,
}

pub fn run(args: LayoutArgs) -> Result<(), Box<dyn std::error::Error>> {
    let trip = load_trip(&args.trip)?;
    let layout = Config::load_or_default().layout_engine().compute(&trip.items);

    let days = trip
        .day_labels(&layout.bounds)
        .into_iter()
        .map(|(offset, date)| DayLabel { offset, date })
        .collect();
    print_json(&LayoutReport {
        start_date: trip.start_date,
        days,
        layout,
    })
}
