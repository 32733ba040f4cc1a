//! gridfit.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::types::ServiceDemand;

/// Node name pattern excluded from snapshots unless configured otherwise.
pub const DEFAULT_EXCLUDE_PATTERN: &str = "control-plane";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GridfitConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    #[serde(default)]
    pub services: Vec<ServiceDemand>,
}

/// Where node metrics come from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    /// `kubectl get --raw` against the metrics.k8s.io API.
    Kubectl { context: Option<String> },
    /// A NodeMetricsList JSON document on disk.
    File { path: PathBuf },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Kubectl { context: None }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnapshotConfig {
    /// Regex patterns; nodes whose name matches any of them are skipped.
    #[serde(default = "default_exclude_nodes")]
    pub exclude_nodes: Vec<String>,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            exclude_nodes: default_exclude_nodes(),
        }
    }
}

fn default_exclude_nodes() -> Vec<String> {
    vec![DEFAULT_EXCLUDE_PATTERN.to_string()]
}

impl GridfitConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GridfitConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Scaffold a gridfit.toml with a small sample workload.
    pub fn scaffold() -> Self {
        GridfitConfig {
            source: SourceConfig::default(),
            snapshot: SnapshotConfig::default(),
            services: vec![
                ServiceDemand::new("1", 10.0, 5120),
                ServiceDemand::new("2", 20.0, 10240),
                ServiceDemand::new("3", 15.0, 4096),
            ],
        }
    }
}
