//! gridfit allocation planner — multi-dimensional best-fit-decreasing.
//!
//! Assigns services to clusters so that every cluster's CPU and memory
//! stay within its residual capacity. The planner operates purely on
//! in-memory records from `gridfit-core`; it does no I/O and knows nothing
//! about where the capacity snapshot came from.
//!
//! # Components
//!
//! - **`capacity`** — Run-scoped working copy of cluster capacity
//! - **`scorer`** — Eligibility and best-fit ranking of clusters
//! - **`placer`** — Demand ordering and the single-pass greedy planner

pub mod capacity;
pub mod error;
pub mod placer;
pub mod scorer;

pub use capacity::CapacityTable;
pub use error::{PlacementError, PlacementResult};
pub use placer::{Planner, PlannerOptions, allocate, demand_order};
pub use scorer::{FitScore, best_fit, first_by_id, fit_cluster, rank_clusters};
