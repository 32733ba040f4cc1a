//! Metrics acquisition error types.

use thiserror::Error;

pub type MetricsResult<T> = Result<T, MetricsError>;

/// Errors raised while fetching or decoding node metrics.
///
/// Per-node value problems never surface here; those degrade the node to
/// zero capacity instead.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("failed to read metrics: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode node metrics: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("metrics command failed: {0}")]
    Command(String),

    #[error("invalid node exclusion pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
