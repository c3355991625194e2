pub mod geometry;
pub mod show;

use anyhow::{bail, Result};
use impactmap::PipelineConfig;

use crate::cli::Cli;

/// Config file (if any), with `feed` taking precedence over its `feed_url`.
pub(crate) fn load_config(cli: &Cli, feed: Option<&str>) -> Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => match feed {
            Some(feed) => PipelineConfig::new(feed),
            None => bail!("no feed given: pass --feed, set IMPACTMAP_FEED_URL, or use --config"),
        },
    };
    if let Some(feed) = feed {
        config.feed_url = feed.to_string();
    }
    Ok(config)
}

/// Remote feeds are fetched; anything else is read from disk.
pub(crate) fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}
