//! Error types for engine operations

use growth_domain::GrowthError;
use growth_store::StoreError;
use thiserror::Error;

/// Result alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur above the domain layer
#[derive(Error, Debug)]
pub enum EngineError {
    /// Domain computation failed
    #[error(transparent)]
    Growth(#[from] GrowthError),

    /// A report could not be assembled
    #[error("Render error: {0}")]
    Render(String),

    /// Report encoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reference data could not be loaded
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}
