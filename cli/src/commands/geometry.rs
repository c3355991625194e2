use anyhow::{Context, Result};
use impactmap::{geometry::{direct_download_url, share_link_id}, io::geojson::boundaries_to_geojson, HttpFetcher, GeometryResolver, PipelineConfig};
use tracing::info;

use crate::cli::{Cli, GeometryArgs};

pub fn run(cli: &Cli, args: &GeometryArgs) -> Result<()> {
    // Only the timeout and user agent matter here.
    let config = match &cli.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::new(String::new()),
    };
    let fetcher = HttpFetcher::new(&config)?;

    if let Some(id) = share_link_id(&args.reference) {
        info!("[geometry] share link for file {id}; fetching {}", direct_download_url(&args.reference));
    }

    let boundaries = GeometryResolver::new(&fetcher)
        .resolve(Some(&args.reference))
        .with_context(|| format!("failed to resolve {}", args.reference))?;
    info!("[geometry] {} boundaries", boundaries.len());

    println!("{}", serde_json::to_string_pretty(&boundaries_to_geojson(&boundaries))?);
    Ok(())
}
