pub mod config;
pub mod error;
pub mod types;

pub use config::GridfitConfig;
pub use error::{Resource, ValidationError, ValidationResult};
pub use types::*;
