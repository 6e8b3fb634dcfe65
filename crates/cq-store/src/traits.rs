//! Store trait definition

use crate::error::StoreResult;
use crate::ledger::LedgerRecord;
use async_trait::async_trait;

/// Keyspace store abstraction for Cqlflow
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Store: Send + Sync {
    /// Execute a single CQL statement at quorum consistency
    async fn execute(&self, statement: &str) -> StoreResult<()>;

    /// Check whether a table exists in the given keyspace
    async fn table_exists(&self, keyspace: &str, table: &str) -> StoreResult<bool>;

    /// Greatest version among successfully applied records in the ledger
    /// table, or `None` when no successful record exists
    async fn latest_applied_version(&self, table: &str) -> StoreResult<Option<i32>>;

    /// Append one record to the ledger table
    async fn append_record(&self, table: &str, record: &LedgerRecord) -> StoreResult<()>;

    /// Store type identifier for logging
    fn store_type(&self) -> &'static str;
}
