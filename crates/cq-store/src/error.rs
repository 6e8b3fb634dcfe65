//! Error types for cq-store

use thiserror::Error;

/// Store operation errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Connection or session error (S001)
    #[error("[S001] Store connection failed: {0}")]
    Connection(String),

    /// Statement execution error (S002)
    #[error("[S002] CQL execution failed: {0}")]
    Execution(String),

    /// A schema migration statement failed (S003)
    #[error("[S003] Error during migration of script {script} while executing '{statement}': {message}")]
    Migration {
        script: String,
        statement: String,
        message: String,
    },

    /// Ledger read/write error (S004)
    #[error("[S004] Ledger operation failed: {0}")]
    Ledger(String),

    /// Bulk data load error, absorbed by the executor (S005)
    #[error("[S005] Data load failed: {0}")]
    DataLoad(String),
}

/// Result type alias for StoreError
pub type StoreResult<T> = Result<T, StoreError>;
