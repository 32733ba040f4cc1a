use anyhow::Result;

use super::{capture_snapshot, load_config};
use crate::report;

pub fn snapshot(config: Option<&str>, metrics: Option<&str>, format: &str) -> Result<()> {
    let config = load_config(config)?;
    let clusters = capture_snapshot(&config, metrics)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&clusters)?),
        _ => print!("{}", report::format_clusters(&clusters, "Cluster Metrics:")),
    }
    Ok(())
}
