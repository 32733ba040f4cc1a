pub mod allocate;
pub mod init;
pub mod snapshot;

use std::path::Path;

use anyhow::{Context, Result};
use gridfit_core::{ClusterCapacity, GridfitConfig, config::SourceConfig};
use gridfit_metrics::{FileSource, KubectlSource, MetricsSource, NodeFilter, SnapshotBuilder};
use tracing::{debug, info};

const DEFAULT_CONFIG: &str = "gridfit.toml";

/// Load the explicit config, else ./gridfit.toml, else defaults.
pub fn load_config(path: Option<&str>) -> Result<GridfitConfig> {
    match path {
        Some(path) => GridfitConfig::from_file(Path::new(path))
            .with_context(|| format!("Failed to load config from {path}")),
        None if Path::new(DEFAULT_CONFIG).is_file() => {
            debug!("Using {}", DEFAULT_CONFIG);
            GridfitConfig::from_file(Path::new(DEFAULT_CONFIG))
                .with_context(|| format!("Failed to load config from {DEFAULT_CONFIG}"))
        }
        None => Ok(GridfitConfig::default()),
    }
}

fn metrics_source(config: &GridfitConfig, metrics_file: Option<&str>) -> Box<dyn MetricsSource> {
    if let Some(file) = metrics_file {
        return Box::new(FileSource::new(file));
    }
    match &config.source {
        SourceConfig::File { path } => Box::new(FileSource::new(path)),
        SourceConfig::Kubectl { context } => Box::new(KubectlSource::new(context.clone())),
    }
}

/// Fetch node metrics and turn them into a filtered capacity snapshot.
pub fn capture_snapshot(config: &GridfitConfig, metrics_file: Option<&str>) -> Result<Vec<ClusterCapacity>> {
    let list = metrics_source(config, metrics_file)
        .fetch()
        .context("Failed to fetch cluster metrics")?;
    let filter = NodeFilter::new(config.snapshot.exclude_nodes.as_slice())?;
    let snapshot = SnapshotBuilder::new(filter).build(&list);

    info!(nodes = list.items.len(), schedulable = snapshot.len(), "captured capacity snapshot");
    Ok(snapshot)
}
