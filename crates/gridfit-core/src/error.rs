//! Input validation errors.

use thiserror::Error;

/// Result type alias for record validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Resource dimension a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Cpu,
    Memory,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Cpu => f.write_str("cpu"),
            Resource::Memory => f.write_str("memory"),
        }
    }
}

/// Errors raised when a capacity or demand record cannot take part in
/// an allocation run.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("cluster {cluster}: negative {resource} value {value}")]
    NegativeCapacity {
        cluster: String,
        resource: Resource,
        value: f64,
    },

    #[error("service {service}: negative {resource} demand {value}")]
    NegativeDemand {
        service: String,
        resource: Resource,
        value: f64,
    },

    #[error("{owner}: {resource} value is not a finite number")]
    NonFinite { owner: String, resource: Resource },

    #[error("cluster {cluster}: available {resource} exceeds total")]
    AvailableExceedsTotal { cluster: String, resource: Resource },

    #[error("duplicate cluster id: {0}")]
    DuplicateCluster(String),

    #[error("duplicate service id: {0}")]
    DuplicateService(String),
}
