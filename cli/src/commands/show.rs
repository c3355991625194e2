use std::path::Path;

use anyhow::Result;
use impactmap::{io::geojson::write_record_geojson_bytes, Pipeline, RowSelector, Snapshot, SourceFeed};
use tracing::{debug, info, warn};

use crate::cli::{Cli, OutputFormat, ShowArgs};

use super::{is_remote, load_config};

pub fn run(cli: &Cli, args: &ShowArgs) -> Result<()> {
    let mut config = load_config(cli, args.feed.as_deref())?;
    if let Some(row) = args.row {
        config.selector = RowSelector::Index(row);
    }
    let pipeline = Pipeline::new(config)?;
    let feed_location = pipeline.config().feed_url.as_str();

    let feed = if is_remote(feed_location) {
        info!("[feed] GET {feed_location}");
        pipeline.load_feed()?
    } else {
        info!("[feed] reading {feed_location}");
        SourceFeed::read_csv(Path::new(feed_location))?
    };
    debug!("[feed] {} rows; columns {:?}", feed.height(), feed.column_names());
    let snapshot = pipeline.refresh_from(&feed)?;

    let Snapshot { record, geometry_error } = snapshot;
    match (&geometry_error, &record.fields().geometry_ref) {
        (Some(err), _) => warn!("[geometry] {err}; showing record without boundaries"),
        (None, Some(reference)) => info!("[geometry] {} boundaries from {reference}", record.boundaries().len()),
        (None, None) => info!("[geometry] no KML reference"),
    }
    if !record.boundaries().is_empty() && !record.centroid_within_boundaries() {
        warn!("[geometry] project location lies outside every boundary");
    }

    match args.format {
        OutputFormat::Table => print_table(&record),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
        OutputFormat::Geojson => println!("{}", String::from_utf8(write_record_geojson_bytes(&record)?)?),
    }
    Ok(())
}

fn print_table(record: &impactmap::ImpactRecord) {
    let params = record.parameters();
    let width = params.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

    println!("Token Information:");
    for (label, value) in &params {
        println!("  {label:<width$}  {value}");
    }

    let sdgs = record.sdgs();
    if !sdgs.known().is_empty() {
        println!();
        for sdg in sdgs.known() {
            println!("  {sdg:<6} {}", sdg.title());
        }
    }
    for tag in sdgs.unrecognized() {
        println!("  {tag:<6} (unrecognized)");
    }

    let bounds = record.bounds();
    println!();
    println!(
        "  {} boundaries; map bounds S {:.5} W {:.5} N {:.5} E {:.5}",
        record.boundaries().len(), bounds.south, bounds.west, bounds.north, bounds.east,
    );
}
