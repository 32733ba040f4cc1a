//! Cluster scoring for placement decisions.
//!
//! Selection is two-phase: a cluster is first checked for eligibility
//! (both CPU and memory must cover the demand), and only eligible
//! clusters are ranked. Ranking is best-fit:
//! - **Leftover CPU** after placement, ascending (tightest fit first)
//! - **Leftover memory** after placement, ascending
//! - **Cluster id**, ascending, so the order is total

use std::cmp::Ordering;

use gridfit_core::{ClusterCapacity, ServiceDemand};

/// Fit of one eligible cluster for one service. Lower is better.
#[derive(Debug, Clone)]
pub struct FitScore<'a> {
    /// Position of the cluster in the table it was scored from.
    pub index: usize,
    pub cluster_id: &'a str,
    /// CPU left on the cluster if the service were placed there.
    pub leftover_cpu: f64,
    /// Memory left on the cluster if the service were placed there.
    pub leftover_memory: u64,
}

impl PartialEq for FitScore<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FitScore<'_> {}

impl Ord for FitScore<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.leftover_cpu
            .total_cmp(&other.leftover_cpu)
            .then(self.leftover_memory.cmp(&other.leftover_memory))
            .then_with(|| self.cluster_id.cmp(other.cluster_id))
    }
}

impl PartialOrd for FitScore<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Score a single cluster. `None` means the cluster cannot host the demand.
pub fn fit_cluster<'a>(
    index: usize,
    cluster: &'a ClusterCapacity,
    demand: &ServiceDemand,
) -> Option<FitScore<'a>> {
    if !cluster.can_host(demand) {
        return None;
    }

    Some(FitScore {
        index,
        cluster_id: &cluster.id,
        // + 0.0 turns -0.0 into 0.0; total_cmp would order them apart.
        leftover_cpu: cluster.available_cpu - demand.required_cpu + 0.0,
        leftover_memory: cluster.available_memory - demand.required_memory,
    })
}

/// Score all clusters and return the eligible ones, best first.
pub fn rank_clusters<'a>(clusters: &'a [ClusterCapacity], demand: &ServiceDemand) -> Vec<FitScore<'a>> {
    let mut scores: Vec<FitScore<'a>> = clusters
        .iter()
        .enumerate()
        .filter_map(|(i, c)| fit_cluster(i, c, demand))
        .collect();

    scores.sort();
    scores
}

/// The single best eligible cluster, if any.
pub fn best_fit<'a>(clusters: &'a [ClusterCapacity], demand: &ServiceDemand) -> Option<FitScore<'a>> {
    clusters
        .iter()
        .enumerate()
        .filter_map(|(i, c)| fit_cluster(i, c, demand))
        .min()
}

/// The eligible cluster with the smallest id, ignoring leftovers.
pub fn first_by_id<'a>(clusters: &'a [ClusterCapacity], demand: &ServiceDemand) -> Option<FitScore<'a>> {
    clusters
        .iter()
        .enumerate()
        .filter_map(|(i, c)| fit_cluster(i, c, demand))
        .min_by(|a, b| a.cluster_id.cmp(b.cluster_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster(id: &str, cpu: f64, mem: u64) -> ClusterCapacity {
        ClusterCapacity::new(id, cpu, mem)
    }

    fn demand(cpu: f64, mem: u64) -> ServiceDemand {
        ServiceDemand::new("svc", cpu, mem)
    }

    #[test]
    fn rejects_insufficient_cpu() {
        let c = cluster("a", 9.0, 10240);
        assert!(fit_cluster(0, &c, &demand(10.0, 1)).is_none());
    }

    #[test]
    fn rejects_insufficient_memory() {
        let c = cluster("a", 100.0, 1000);
        assert!(fit_cluster(0, &c, &demand(10.0, 1024)).is_none());
    }

    #[test]
    fn exact_fit_has_zero_leftover() {
        let c = cluster("a", 20.0, 10240);
        let score = fit_cluster(3, &c, &demand(20.0, 10240)).unwrap();
        assert_eq!(score.index, 3);
        assert_eq!(score.leftover_cpu, 0.0);
        assert_eq!(score.leftover_memory, 0);
    }

    #[test]
    fn best_fit_prefers_tightest_cpu() {
        let clusters = vec![cluster("roomy", 100.0, 100), cluster("tight", 12.0, 100)];
        let best = best_fit(&clusters, &demand(10.0, 10)).unwrap();
        assert_eq!(best.cluster_id, "tight");
        assert_eq!(best.index, 1);
    }

    #[test]
    fn memory_breaks_cpu_ties() {
        let clusters = vec![cluster("a", 10.0, 500), cluster("b", 10.0, 200)];
        let best = best_fit(&clusters, &demand(5.0, 100)).unwrap();
        assert_eq!(best.cluster_id, "b");
    }

    #[test]
    fn id_breaks_full_ties() {
        let clusters = vec![cluster("zeta", 10.0, 200), cluster("alpha", 10.0, 200)];
        let best = best_fit(&clusters, &demand(5.0, 100)).unwrap();
        assert_eq!(best.cluster_id, "alpha");
    }

    #[test]
    fn negative_zero_leftover_ties_with_zero() {
        let clusters = vec![cluster("b", -0.0, 100), cluster("a", 0.0, 100)];
        let best = best_fit(&clusters, &demand(0.0, 10)).unwrap();
        assert_eq!(best.cluster_id, "a");
        assert!(best.leftover_cpu.is_sign_positive());
    }

    #[test]
    fn cpu_dominates_memory() {
        // "a" is tighter on memory but looser on CPU.
        let clusters = vec![cluster("a", 50.0, 100), cluster("b", 11.0, 9000)];
        let best = best_fit(&clusters, &demand(10.0, 100)).unwrap();
        assert_eq!(best.cluster_id, "b");
    }

    #[test]
    fn ineligible_clusters_are_not_ranked() {
        let clusters = vec![cluster("small", 1.0, 1), cluster("big", 100.0, 1000), cluster("mid", 20.0, 500)];
        let ranked = rank_clusters(&clusters, &demand(10.0, 100));

        let ids: Vec<&str> = ranked.iter().map(|s| s.cluster_id).collect();
        assert_eq!(ids, vec!["mid", "big"]);
    }

    #[test]
    fn no_eligible_cluster_yields_none() {
        let clusters = vec![cluster("a", 1.0, 1)];
        assert!(best_fit(&clusters, &demand(2.0, 1)).is_none());
        assert!(best_fit(&[], &demand(0.0, 0)).is_none());
    }

    #[test]
    fn first_by_id_ignores_leftover() {
        let clusters = vec![cluster("b", 1.0, 1), cluster("a", 100.0, 1000)];
        assert_eq!(first_by_id(&clusters, &demand(0.0, 0)).unwrap().cluster_id, "a");
        assert_eq!(best_fit(&clusters, &demand(0.0, 0)).unwrap().cluster_id, "b");
    }
}
