//! gridfit-metrics — capacity snapshots from cluster node metrics.
//!
//! Turns a `metrics.k8s.io/v1beta1` node metrics listing into normalized
//! `ClusterCapacity` records for the allocation planner. Unit parsing,
//! degraded-node fallback, and the schedulable-node filter all live here so
//! the planner only ever sees plain numbers.
//!
//! # Architecture
//!
//! ```text
//! MetricsSource (FileSource | KubectlSource)
//!   └── fetch() → NodeMetricsList
//!
//! SnapshotBuilder
//!   ├── NodeFilter (regex exclusions, e.g. control-plane)
//!   └── build() → Vec<ClusterCapacity>
//! ```

pub mod error;
pub mod node_metrics;
pub mod quantity;
pub mod snapshot;
pub mod source;

pub use error::{MetricsError, MetricsResult};
pub use node_metrics::{NodeMetrics, NodeMetricsList};
pub use quantity::{QuantityError, parse_cpu_millis, parse_memory_kib};
pub use snapshot::{NodeFilter, SnapshotBuilder};
pub use source::{FileSource, KubectlSource, MetricsSource};
