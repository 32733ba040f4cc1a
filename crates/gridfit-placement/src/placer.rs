//! Allocation planner — best-fit-decreasing over a capacity snapshot.
//!
//! One run:
//! 1. Validates the snapshot and the demand set (fail fast on negatives)
//! 2. Orders services largest first (CPU, then memory)
//! 3. Places each service on its best-fit cluster and commits the demand
//!    so later services see the reduced residual capacity
//!
//! Placements are never revisited. A service with no eligible cluster is
//! recorded as unplaced and the run continues.

use std::cmp::Ordering;

use gridfit_core::{AllocationResult, ClusterCapacity, Placement, ServiceDemand, validate_inputs};
use tracing::{debug, info, warn};

use crate::capacity::CapacityTable;
use crate::error::PlacementResult;
use crate::scorer::{best_fit, first_by_id};

/// Tunables for the planner.
#[derive(Debug, Clone)]
pub struct PlannerOptions {
    /// Place zero-demand services on the eligible cluster with the
    /// smallest id instead of the tightest fit.
    pub zero_demand_by_id: bool,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            zero_demand_by_id: true,
        }
    }
}

/// Single-pass greedy planner.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    options: PlannerOptions,
}

impl Planner {
    pub fn new(options: PlannerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PlannerOptions {
        &self.options
    }

    /// Allocate `services` onto `clusters`.
    ///
    /// The caller's snapshot is copied, never mutated; the residual state
    /// is returned in `AllocationResult::clusters`.
    pub fn plan(
        &self,
        clusters: &[ClusterCapacity],
        services: &[ServiceDemand],
    ) -> PlacementResult<AllocationResult> {
        validate_inputs(clusters, services)?;

        let mut table = CapacityTable::from_snapshot(clusters);
        let mut placements = Vec::with_capacity(services.len());
        let mut unplaced = Vec::new();

        if table.is_empty() && !services.is_empty() {
            warn!(services = services.len(), "empty capacity snapshot, no basis for allocation");
        }

        for index in demand_order(services) {
            let service = &services[index];

            let choice = if service.is_zero() && self.options.zero_demand_by_id {
                first_by_id(table.clusters(), service)
            } else {
                best_fit(table.clusters(), service)
            };
            let Some(target) = choice.map(|fit| fit.index) else {
                warn!(
                    service = %service.id,
                    cpu = service.required_cpu,
                    memory = service.required_memory,
                    "no cluster has enough residual capacity"
                );
                unplaced.push(service.clone());
                continue;
            };

            let cluster = table.commit(target, service);
            debug!(
                service = %service.id,
                cluster = %cluster.id,
                leftover_cpu = cluster.available_cpu,
                leftover_memory = cluster.available_memory,
                "placed service"
            );
            placements.push(Placement {
                service_id: service.id.clone(),
                cluster_id: cluster.id.clone(),
            });
        }

        info!(
            clusters = table.len(),
            placed = placements.len(),
            unplaced = unplaced.len(),
            "allocation run finished"
        );

        Ok(AllocationResult {
            placements,
            unplaced,
            clusters: table.into_clusters(),
        })
    }
}

/// Allocate with default options.
pub fn allocate(
    clusters: &[ClusterCapacity],
    services: &[ServiceDemand],
) -> PlacementResult<AllocationResult> {
    Planner::default().plan(clusters, services)
}

/// Processing order of `services`, as indices into the slice.
///
/// CPU descending, memory descending, then id and input position
/// ascending, which makes the order total.
pub fn demand_order(services: &[ServiceDemand]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..services.len()).collect();
    order.sort_by(|&a, &b| compare_demand(&services[a], &services[b]).then(a.cmp(&b)));
    order
}

fn compare_demand(a: &ServiceDemand, b: &ServiceDemand) -> Ordering {
    // + 0.0 folds -0.0 into 0.0 before the total order sees the sign.
    (b.required_cpu + 0.0)
        .total_cmp(&(a.required_cpu + 0.0))
        .then(b.required_memory.cmp(&a.required_memory))
        .then_with(|| a.id.cmp(&b.id))
}
