//! In-memory store backend
//!
//! Records executed statements and appended ledger records instead of
//! talking to a cluster. Backs the unit tests across the workspace so
//! the engine can be exercised without a live keyspace.

use crate::error::{StoreError, StoreResult};
use crate::ledger::LedgerRecord;
use crate::traits::Store;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

/// In-memory [`Store`] stand-in with failure injection
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    statements: Vec<String>,
    records: Vec<LedgerRecord>,
    tables: HashSet<String>,
    fail_marker: Option<String>,
}

impl MemoryStore {
    /// Create an empty store with no tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any executed statement containing `marker`.
    pub fn fail_on(&self, marker: impl Into<String>) {
        self.inner.lock().unwrap().fail_marker = Some(marker.into());
    }

    /// Statements executed so far, in order.
    pub fn statements(&self) -> Vec<String> {
        self.inner.lock().unwrap().statements.clone()
    }

    /// Ledger records appended so far, in order.
    pub fn records(&self) -> Vec<LedgerRecord> {
        self.inner.lock().unwrap().records.clone()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn execute(&self, statement: &str) -> StoreResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(marker) = &inner.fail_marker {
            if statement.contains(marker.as_str()) {
                return Err(StoreError::Execution(format!(
                    "injected failure on '{marker}'"
                )));
            }
        }
        if let Some(table) = created_table_name(statement) {
            inner.tables.insert(table);
        }
        inner.statements.push(statement.to_string());
        Ok(())
    }

    async fn table_exists(&self, _keyspace: &str, table: &str) -> StoreResult<bool> {
        Ok(self.inner.lock().unwrap().tables.contains(table))
    }

    async fn latest_applied_version(&self, _table: &str) -> StoreResult<Option<i32>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .records
            .iter()
            .filter(|r| r.schema_applied)
            .map(|r| r.version)
            .max())
    }

    async fn append_record(&self, _table: &str, record: &LedgerRecord) -> StoreResult<()> {
        self.inner.lock().unwrap().records.push(record.clone());
        Ok(())
    }

    fn store_type(&self) -> &'static str {
        "memory"
    }
}

/// Table name from a `CREATE TABLE` statement, if it is one.
fn created_table_name(statement: &str) -> Option<String> {
    let rest = statement.trim().strip_prefix("CREATE TABLE ")?;
    let name = rest.split_whitespace().next()?;
    Some(name.trim_end_matches('(').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(version: i32, schema_applied: bool) -> LedgerRecord {
        LedgerRecord {
            version,
            schema_applied,
            data_applied: None,
            script_name: format!("{version}_test.cql"),
            script: String::new(),
            executed_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_empty_store_has_no_version() {
        let store = MemoryStore::new();
        assert_eq!(store.latest_applied_version("t").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_version_projection_ignores_failed_records() {
        let store = MemoryStore::new();
        store.append_record("t", &record(5, true)).await.unwrap();
        store.append_record("t", &record(6, false)).await.unwrap();
        assert_eq!(store.latest_applied_version("t").await.unwrap(), Some(5));
    }

    #[tokio::test]
    async fn test_create_table_registers_table() {
        let store = MemoryStore::new();
        assert!(!store.table_exists("ks", "schema_migration").await.unwrap());
        store
            .execute("CREATE TABLE schema_migration (version int PRIMARY KEY)")
            .await
            .unwrap();
        assert!(store.table_exists("ks", "schema_migration").await.unwrap());
    }

    #[tokio::test]
    async fn test_fail_on_marker() {
        let store = MemoryStore::new();
        store.fail_on("boom");
        assert!(store.execute("CREATE TABLE ok (id int)").await.is_ok());
        assert!(store.execute("ALTER TABLE boom ADD c int").await.is_err());
    }
}
