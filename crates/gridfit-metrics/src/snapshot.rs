//! Capacity snapshot builder.
//!
//! Each schedulable node becomes one `ClusterCapacity` with available equal
//! to total. A node whose quantities cannot be parsed is kept but reported
//! with zero capacity, so one bad node never sinks the whole snapshot.

use gridfit_core::ClusterCapacity;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::{MetricsError, MetricsResult};
use crate::node_metrics::{NodeMetrics, NodeMetricsList};
use crate::quantity::{parse_cpu_millis, parse_memory_kib};

/// Decides which nodes count as schedulable.
#[derive(Debug, Clone, Default)]
pub struct NodeFilter {
    exclude: Vec<Regex>,
}

impl NodeFilter {
    /// Exclude nodes whose name matches any of `patterns`.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> MetricsResult<Self> {
        let exclude = patterns
            .iter()
            .map(|p| {
                Regex::new(p.as_ref()).map_err(|source| MetricsError::InvalidPattern {
                    pattern: p.as_ref().to_string(),
                    source,
                })
            })
            .collect::<MetricsResult<Vec<_>>>()?;
        Ok(Self { exclude })
    }

    /// A filter that admits every node.
    pub fn allow_all() -> Self {
        Self::default()
    }

    pub fn includes(&self, node_name: &str) -> bool {
        !self.exclude.iter().any(|re| re.is_match(node_name))
    }
}

/// Builds capacity snapshots from node metrics listings.
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuilder {
    filter: NodeFilter,
}

impl SnapshotBuilder {
    pub fn new(filter: NodeFilter) -> Self {
        Self { filter }
    }

    /// One record per included node, in listing order.
    pub fn build(&self, list: &NodeMetricsList) -> Vec<ClusterCapacity> {
        list.items
            .iter()
            .filter(|node| {
                let keep = self.filter.includes(node.name());
                if !keep {
                    debug!(node = node.name(), "excluded from snapshot");
                }
                keep
            })
            .map(node_capacity)
            .collect()
    }
}

/// Normalize one node. Any unparseable quantity zeroes both dimensions.
pub fn node_capacity(node: &NodeMetrics) -> ClusterCapacity {
    let cpu = node.cpu().and_then(parse_cpu_millis);
    let memory = node.memory().and_then(parse_memory_kib);
    match (cpu, memory) {
        (Ok(cpu), Ok(memory)) => ClusterCapacity::new(node.name(), cpu, memory),
        (cpu, memory) => {
            warn!(
                node = node.name(),
                usage = %node.usage,
                cpu_error = ?cpu.err(),
                memory_error = ?memory.err(),
                "malformed node metrics, treating node as full"
            );
            ClusterCapacity::degraded(node.name())
        }
    }
}
