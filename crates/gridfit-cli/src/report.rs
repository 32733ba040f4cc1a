//! Human-readable rendering of snapshots and allocation results.

use std::fmt::Write;

use gridfit_core::{AllocationResult, ClusterCapacity};

pub fn format_clusters(clusters: &[ClusterCapacity], heading: &str) -> String {
    let mut out = format!("\n{heading}\n");
    for c in clusters {
        let _ = writeln!(
            out,
            "Cluster {} - Total CPU: {:.2}, Available CPU: {:.2} / Total Memory: {} KiB, Available Memory: {} KiB",
            c.id, c.total_cpu, c.available_cpu, c.total_memory, c.available_memory
        );
    }
    out
}

/// Before/after capacity plus the placement outcome.
pub fn format_allocation(before: &[ClusterCapacity], result: &AllocationResult) -> String {
    let mut out = format_clusters(before, "Cluster Metrics Before Allocation:");

    out.push_str("\nAllocations:\n");
    for p in &result.placements {
        let _ = writeln!(out, "Service {} -> Cluster {}", p.service_id, p.cluster_id);
    }

    if result.is_complete() {
        out.push_str("\nAll services were successfully allocated.\n");
    } else {
        out.push_str("\nUnallocated Services:\n");
        for s in &result.unplaced {
            let _ = writeln!(
                out,
                "Service {} (CPU: {}, Memory: {})",
                s.id, s.required_cpu, s.required_memory
            );
        }
    }

    out.push_str(&format_clusters(&result.clusters, "Cluster Metrics After Allocation:"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridfit_core::{Placement, ServiceDemand};

    #[test]
    fn cluster_line_format() {
        let out = format_clusters(&[ClusterCapacity::new("a", 20.0, 10240)], "Cluster Metrics:");
        assert_eq!(
            out,
            "\nCluster Metrics:\nCluster a - Total CPU: 20.00, Available CPU: 20.00 / Total Memory: 10240 KiB, Available Memory: 10240 KiB\n"
        );
    }

    #[test]
    fn lists_unallocated_services() {
        let before = vec![ClusterCapacity::new("a", 20.0, 10240)];
        let mut after = before.clone();
        after[0].available_cpu = 0.0;
        after[0].available_memory = 0;

        let result = AllocationResult {
            placements: vec![Placement {
                service_id: "2".to_string(),
                cluster_id: "a".to_string(),
            }],
            unplaced: vec![ServiceDemand::new("1", 10.0, 5120)],
            clusters: after,
        };
        let out = format_allocation(&before, &result);

        assert!(out.contains("Service 2 -> Cluster a"));
        assert!(out.contains("Unallocated Services:\nService 1 (CPU: 10, Memory: 5120)"));
        assert!(out.contains("Available CPU: 0.00"));
        assert!(!out.contains("All services were successfully allocated."));
    }

    #[test]
    fn reports_complete_allocation() {
        let before = vec![ClusterCapacity::new("a", 20.0, 10240)];
        let result = AllocationResult {
            placements: Vec::new(),
            unplaced: Vec::new(),
            clusters: before.clone(),
        };
        assert!(format_allocation(&before, &result).contains("All services were successfully allocated."));
    }
}
