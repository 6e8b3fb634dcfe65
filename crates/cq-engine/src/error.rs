//! Error types for cq-engine

use thiserror::Error;

/// Errors surfaced by a migration run
#[derive(Error, Debug)]
pub enum EngineError {
    /// Catalog discovery or script loading failure
    #[error(transparent)]
    Catalog(#[from] cq_core::CoreError),

    /// Store, ledger, or migration execution failure
    #[error(transparent)]
    Store(#[from] cq_store::StoreError),
}

/// Result type alias for EngineError
pub type EngineResult<T> = Result<T, EngineError>;
