//! Domain types shared by the snapshot builder, the planner, and the CLI.
//!
//! CPU is expressed in millicores (`f64`), memory in KiB (`u64`). These
//! are the units the metrics adapter normalizes to; the planner never
//! converts units itself.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Resource, ValidationError, ValidationResult};

/// Unique identifier for a cluster (or node) within one allocation run.
pub type ClusterId = String;

/// Unique identifier for a service within one allocation run.
pub type ServiceId = String;

// ── Capacity ──────────────────────────────────────────────────────

/// Capacity of a single cluster at snapshot time plus its residual
/// capacity during an allocation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClusterCapacity {
    pub id: ClusterId,
    /// Total CPU in millicores. Informational, never mutated.
    pub total_cpu: f64,
    /// Total memory in KiB. Informational, never mutated.
    pub total_memory: u64,
    /// Residual CPU in millicores.
    pub available_cpu: f64,
    /// Residual memory in KiB.
    pub available_memory: u64,
}

impl ClusterCapacity {
    /// A fresh snapshot record: available equals total.
    pub fn new(id: impl Into<ClusterId>, cpu: f64, memory: u64) -> Self {
        Self {
            id: id.into(),
            total_cpu: cpu,
            total_memory: memory,
            available_cpu: cpu,
            available_memory: memory,
        }
    }

    /// A node whose metrics could not be read. Placeable-as-full.
    pub fn degraded(id: impl Into<ClusterId>) -> Self {
        Self::new(id, 0.0, 0)
    }

    /// Both dimensions meet or exceed the demand.
    pub fn can_host(&self, demand: &ServiceDemand) -> bool {
        self.available_cpu >= demand.required_cpu && self.available_memory >= demand.required_memory
    }

    pub fn validate(&self) -> ValidationResult<()> {
        for (resource, value) in [(Resource::Cpu, self.total_cpu), (Resource::Cpu, self.available_cpu)] {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite {
                    owner: format!("cluster {}", self.id),
                    resource,
                });
            }
            if value < 0.0 {
                return Err(ValidationError::NegativeCapacity {
                    cluster: self.id.clone(),
                    resource,
                    value,
                });
            }
        }
        if self.available_cpu > self.total_cpu {
            return Err(ValidationError::AvailableExceedsTotal {
                cluster: self.id.clone(),
                resource: Resource::Cpu,
            });
        }
        if self.available_memory > self.total_memory {
            return Err(ValidationError::AvailableExceedsTotal {
                cluster: self.id.clone(),
                resource: Resource::Memory,
            });
        }
        Ok(())
    }
}

// ── Demand ────────────────────────────────────────────────────────

/// Resource demand of one service. Immutable for the duration of a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceDemand {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: ServiceId,
    /// Required CPU in millicores.
    #[serde(alias = "cpu_millis")]
    pub required_cpu: f64,
    /// Required memory in KiB.
    #[serde(alias = "memory_kib")]
    pub required_memory: u64,
}

impl ServiceDemand {
    pub fn new(id: impl Into<ServiceId>, cpu: f64, memory: u64) -> Self {
        Self {
            id: id.into(),
            required_cpu: cpu,
            required_memory: memory,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.required_cpu == 0.0 && self.required_memory == 0
    }

    pub fn validate(&self) -> ValidationResult<()> {
        if !self.required_cpu.is_finite() {
            return Err(ValidationError::NonFinite {
                owner: format!("service {}", self.id),
                resource: Resource::Cpu,
            });
        }
        if self.required_cpu < 0.0 {
            return Err(ValidationError::NegativeDemand {
                service: self.id.clone(),
                resource: Resource::Cpu,
                value: self.required_cpu,
            });
        }
        Ok(())
    }
}

/// Service ids show up as integers in hand-written inputs.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Str(String),
    Int(i64),
}

fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ServiceId, D::Error> {
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Str(s) => s,
        RawId::Int(n) => n.to_string(),
    })
}

/// Validate a whole run's inputs: every record individually, then id
/// uniqueness on both sides.
pub fn validate_inputs(clusters: &[ClusterCapacity], services: &[ServiceDemand]) -> ValidationResult<()> {
    let mut seen = HashSet::new();
    for cluster in clusters {
        cluster.validate()?;
        if !seen.insert(cluster.id.as_str()) {
            return Err(ValidationError::DuplicateCluster(cluster.id.clone()));
        }
    }

    let mut seen = HashSet::new();
    for service in services {
        service.validate()?;
        if !seen.insert(service.id.as_str()) {
            return Err(ValidationError::DuplicateService(service.id.clone()));
        }
    }
    Ok(())
}

// ── Result ────────────────────────────────────────────────────────

/// A successful match of a service onto a cluster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Placement {
    pub service_id: ServiceId,
    pub cluster_id: ClusterId,
}

/// Outcome of one allocation run.
///
/// Every input service appears exactly once, either in `placements` or in
/// `unplaced`. `clusters` is the residual capacity table after the run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AllocationResult {
    /// In processing order.
    pub placements: Vec<Placement>,
    /// In processing order.
    pub unplaced: Vec<ServiceDemand>,
    pub clusters: Vec<ClusterCapacity>,
}

impl AllocationResult {
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    pub fn placed_count(&self) -> usize {
        self.placements.len()
    }

    pub fn cluster_for(&self, service_id: &str) -> Option<&str> {
        self.placements
            .iter()
            .find(|p| p.service_id == service_id)
            .map(|p| p.cluster_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cluster_starts_full() {
        let c = ClusterCapacity::new("a", 20.0, 10240);
        assert_eq!(c.available_cpu, c.total_cpu);
        assert_eq!(c.available_memory, c.total_memory);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn degraded_cluster_is_empty_but_valid() {
        let c = ClusterCapacity::degraded("broken");
        assert_eq!(c.total_cpu, 0.0);
        assert_eq!(c.total_memory, 0);
        assert!(c.validate().is_ok());
        assert!(c.can_host(&ServiceDemand::new("z", 0.0, 0)));
        assert!(!c.can_host(&ServiceDemand::new("s", 1.0, 0)));
    }

    #[test]
    fn can_host_requires_both_dimensions() {
        let c = ClusterCapacity::new("a", 10.0, 100);
        assert!(c.can_host(&ServiceDemand::new("s", 10.0, 100)));
        assert!(!c.can_host(&ServiceDemand::new("s", 10.5, 100)));
        assert!(!c.can_host(&ServiceDemand::new("s", 10.0, 101)));
    }

    #[test]
    fn rejects_negative_cpu_capacity() {
        let c = ClusterCapacity::new("a", -1.0, 100);
        assert!(matches!(
            c.validate(),
            Err(ValidationError::NegativeCapacity { resource: Resource::Cpu, .. })
        ));
    }

    #[test]
    fn rejects_available_above_total() {
        let mut c = ClusterCapacity::new("a", 10.0, 100);
        c.available_memory = 200;
        assert_eq!(
            c.validate(),
            Err(ValidationError::AvailableExceedsTotal {
                cluster: "a".to_string(),
                resource: Resource::Memory,
            })
        );
    }

    #[test]
    fn rejects_nan_demand() {
        let s = ServiceDemand::new("s", f64::NAN, 0);
        assert!(matches!(s.validate(), Err(ValidationError::NonFinite { .. })));
    }

    #[test]
    fn rejects_negative_demand() {
        let s = ServiceDemand::new("s", -0.5, 0);
        assert!(matches!(s.validate(), Err(ValidationError::NegativeDemand { .. })));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let clusters = vec![ClusterCapacity::new("a", 1.0, 1), ClusterCapacity::new("a", 2.0, 2)];
        assert_eq!(
            validate_inputs(&clusters, &[]),
            Err(ValidationError::DuplicateCluster("a".to_string()))
        );

        let services = vec![ServiceDemand::new("1", 1.0, 1), ServiceDemand::new("1", 1.0, 1)];
        assert_eq!(
            validate_inputs(&[], &services),
            Err(ValidationError::DuplicateService("1".to_string()))
        );
    }

    #[test]
    fn service_id_accepts_integers() {
        let s: ServiceDemand =
            serde_json::from_str(r#"{"id": 2, "required_cpu": 20, "required_memory": 10240}"#).unwrap();
        assert_eq!(s.id, "2");
        assert_eq!(s.required_cpu, 20.0);

        let s: ServiceDemand =
            serde_json::from_str(r#"{"id": "web", "cpu_millis": 1.5, "memory_kib": 64}"#).unwrap();
        assert_eq!(s.id, "web");
        assert_eq!(s.required_memory, 64);
    }

    #[test]
    fn cluster_for_finds_placement() {
        let result = AllocationResult {
            placements: vec![Placement {
                service_id: "2".to_string(),
                cluster_id: "a".to_string(),
            }],
            unplaced: vec![ServiceDemand::new("1", 10.0, 5120)],
            clusters: Vec::new(),
        };
        assert_eq!(result.cluster_for("2"), Some("a"));
        assert_eq!(result.cluster_for("1"), None);
        assert_eq!(result.placed_count(), 1);
        assert!(!result.is_complete());
    }
}
