use std::{path::Path, time::Duration};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::feed::RowSelector;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_USER_AGENT: &str = concat!("impactmap/", env!("CARGO_PKG_VERSION"));

/// Where the feed lives and how to talk to it.
///
/// Passed into [`crate::Pipeline`] at construction; nothing about the feed
/// location is compiled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// CSV feed URL.
    pub feed_url: String,
    /// Per-request timeout, applied to the feed fetch and the geometry fetch.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Which feed row becomes the record (e.g. `"last"` or `{"index": 3}`).
    #[serde(default)]
    pub selector: RowSelector,
}

fn default_timeout_secs() -> u64 { DEFAULT_TIMEOUT_SECS }

fn default_user_agent() -> String { DEFAULT_USER_AGENT.to_string() }

impl PipelineConfig {
    pub fn new(feed_url: impl Into<String>) -> Self {
        Self {
            feed_url: feed_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            selector: RowSelector::default(),
        }
    }

    pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }

    /// Read a config from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("[config] Failed to read {}", path.display()))?;
        Self::from_json_bytes(&bytes)
            .with_context(|| format!("[config] Failed to parse {}", path.display()))
    }

    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        let config: PipelineConfig = serde_json::from_slice(bytes)?;
        anyhow::ensure!(!config.feed_url.trim().is_empty(), "feed_url must not be empty");
        anyhow::ensure!(config.timeout_secs > 0, "timeout_secs must be positive");
        Ok(config)
    }
}
