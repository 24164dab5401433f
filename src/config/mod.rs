//! JSON configuration for both binaries.
//!
//! Loading is fail-fast: a missing file, unparseable JSON or a missing
//! required key is an error the binaries propagate out of `main`. Individual
//! malformed catalog entities are tolerated later, at catalog load time.

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

fn default_node_port() -> u16 {
    54321
}

fn default_aggregator_port() -> u16 {
    54320
}

fn default_frontend() -> String {
    "frontend/index.html".to_owned()
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Couldn't read config file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Couldn't parse config file {}", path.display()))
}

/// Configuration of a media node: the port to serve on and the catalog
/// content.
///
/// Artist entries are kept as raw JSON values; `load_catalog` validates each
/// entity individually and skips the malformed ones.
#[derive(Debug, Deserialize)]
pub struct NodeConfig {
    #[serde(default = "default_node_port")]
    pub port: u16,
    pub artists: Vec<serde_json::Value>,
}

impl NodeConfig {
    pub fn load(path: &Path) -> Result<NodeConfig> {
        read_json(path)
    }
}

/// Configuration of an aggregator: the addresses of the media nodes to
/// mirror and how often to refresh them.
#[derive(Debug, Deserialize)]
pub struct AggregatorConfig {
    #[serde(default = "default_aggregator_port")]
    pub port: u16,
    /// Seconds between poll cycles. Required, must be greater than zero.
    pub refresh_interval_seconds: u64,
    /// `host:port` addresses of the media nodes to mirror.
    pub nodes: Vec<String>,
    /// Path of the static front-end asset served at `/`.
    #[serde(default = "default_frontend")]
    pub frontend: String,
}

impl AggregatorConfig {
    pub fn load(path: &Path) -> Result<AggregatorConfig> {
        let config: AggregatorConfig = read_json(path)?;
        if config.refresh_interval_seconds == 0 {
            bail!("refresh_interval_seconds must be greater than zero");
        }
        Ok(config)
    }
}
