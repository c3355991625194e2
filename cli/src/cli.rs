use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};

/// Impact-token feed inspector
#[derive(Parser, Debug)]
#[command(name = "impactmap", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Pipeline config (JSON)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the newest (or a chosen) token from the feed
    Show(ShowArgs),

    /// Resolve a KML/KMZ reference and print its polygons as GeoJSON
    Geometry(GeometryArgs),
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
pub enum OutputFormat { Table, Json, Geojson }

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Feed URL, or a local CSV path
    #[arg(long, env = "IMPACTMAP_FEED_URL", value_hint = ValueHint::Url)]
    pub feed: Option<String>,

    /// Zero-based row to show instead of the last one
    #[arg(long)]
    pub row: Option<usize>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct GeometryArgs {
    /// KML/KMZ URL or cloud-drive share link
    pub reference: String,
}
