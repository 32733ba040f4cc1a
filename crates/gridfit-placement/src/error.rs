//! Planner error types.

use gridfit_core::ValidationError;
use thiserror::Error;

/// Errors that can occur before an allocation run starts.
///
/// Failing to place a service is never an error; it is reported through
/// `AllocationResult::unplaced`.
#[derive(Debug, Error, PartialEq)]
pub enum PlacementError {
    #[error("invalid input: {0}")]
    Invalid(#[from] ValidationError),
}

pub type PlacementResult<T> = Result<T, PlacementError>;
