//! `gridfit allocate` — snapshot capacity, run the planner, report.

use std::path::Path;

use anyhow::{Context, Result, bail};
use gridfit_core::ServiceDemand;
use gridfit_placement::Planner;

use super::{capture_snapshot, load_config};
use crate::report;

pub fn allocate(config: Option<&str>, metrics: Option<&str>, services: Option<&str>, format: &str) -> Result<()> {
    let config = load_config(config)?;

    let demands = match services {
        Some(path) => read_services(Path::new(path))?,
        None => config.services.clone(),
    };

    let clusters = capture_snapshot(&config, metrics)?;
    if clusters.is_empty() {
        bail!("No cluster metrics available, nothing to allocate against");
    }

    let result = Planner::default().plan(&clusters, &demands)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => print!("{}", report::format_allocation(&clusters, &result)),
    }
    Ok(())
}

fn read_services(path: &Path) -> Result<Vec<ServiceDemand>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read services from {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid services file {}", path.display()))
}
