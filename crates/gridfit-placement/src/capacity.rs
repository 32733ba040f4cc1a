//! Run-scoped working copy of cluster capacity.
//!
//! The planner never mutates caller-held snapshot records. It clones them
//! into a `CapacityTable` at the start of a run, and `commit` is the only
//! place residual capacity changes.

use gridfit_core::{ClusterCapacity, ServiceDemand};

/// Residual capacity of every cluster for a single allocation run.
#[derive(Debug, Clone)]
pub struct CapacityTable {
    clusters: Vec<ClusterCapacity>,
}

impl CapacityTable {
    /// Copy a snapshot into a fresh table, keeping input order.
    ///
    /// `-0.0` CPU is folded into `0.0` so it ties with zero when ranked.
    pub fn from_snapshot(snapshot: &[ClusterCapacity]) -> Self {
        let clusters = snapshot
            .iter()
            .map(|c| ClusterCapacity {
                total_cpu: c.total_cpu + 0.0,
                available_cpu: c.available_cpu + 0.0,
                ..c.clone()
            })
            .collect();
        Self { clusters }
    }

    pub fn clusters(&self) -> &[ClusterCapacity] {
        &self.clusters
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Subtract `demand` from the cluster at `index`.
    ///
    /// The caller must have checked eligibility; committing a demand the
    /// cluster cannot host is a logic error.
    pub fn commit(&mut self, index: usize, demand: &ServiceDemand) -> &ClusterCapacity {
        let cluster = &mut self.clusters[index];
        debug_assert!(cluster.can_host(demand), "committed an ineligible placement");

        cluster.available_cpu -= demand.required_cpu;
        cluster.available_memory -= demand.required_memory;

        debug_assert!(cluster.available_cpu >= 0.0 && cluster.available_cpu <= cluster.total_cpu);
        debug_assert!(cluster.available_memory <= cluster.total_memory);
        cluster
    }

    pub fn into_clusters(self) -> Vec<ClusterCapacity> {
        self.clusters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_subtracts_both_dimensions() {
        let mut table = CapacityTable::from_snapshot(&[ClusterCapacity::new("a", 20.0, 10240)]);
        let after = table.commit(0, &ServiceDemand::new("s", 15.0, 4096));

        assert_eq!(after.available_cpu, 5.0);
        assert_eq!(after.available_memory, 6144);
        assert_eq!(after.total_cpu, 20.0);
        assert_eq!(after.total_memory, 10240);
    }

    #[test]
    fn snapshot_is_not_aliased() {
        let snapshot = vec![ClusterCapacity::new("a", 20.0, 10240)];
        let mut table = CapacityTable::from_snapshot(&snapshot);
        table.commit(0, &ServiceDemand::new("s", 20.0, 10240));

        assert_eq!(snapshot[0].available_cpu, 20.0);
        assert_eq!(table.clusters()[0].available_cpu, 0.0);
    }

    #[test]
    fn exact_fit_drains_to_zero() {
        let mut table = CapacityTable::from_snapshot(&[ClusterCapacity::new("a", 0.75, 3)]);
        table.commit(0, &ServiceDemand::new("s", 0.25, 1));
        table.commit(0, &ServiceDemand::new("t", 0.5, 2));

        let c = &table.clusters()[0];
        assert_eq!(c.available_cpu, 0.0);
        assert_eq!(c.available_memory, 0);
    }

    #[test]
    fn negative_zero_cpu_is_folded() {
        let table = CapacityTable::from_snapshot(&[ClusterCapacity::new("a", -0.0, 1)]);
        let c = &table.clusters()[0];

        assert!(c.available_cpu.is_sign_positive());
        assert!(c.total_cpu.is_sign_positive());
        assert_eq!(table.len(), 1);
    }
}
