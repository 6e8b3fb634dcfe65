//! Scylla store backend
//!
//! Speaks the CQL native protocol via the scylla driver; works against
//! both ScyllaDB and Apache Cassandra clusters.

use crate::error::{StoreError, StoreResult};
use crate::ledger::LedgerRecord;
use crate::traits::Store;
use async_trait::async_trait;
use scylla::client::session::Session;
use scylla::client::session_builder::SessionBuilder;
use scylla::statement::{Consistency, Statement};

const TABLE_LOOKUP: &str =
    "SELECT table_name FROM system_schema.tables WHERE keyspace_name = ? AND table_name = ?";

/// Scylla-driver store backend
pub struct ScyllaStore {
    session: Session,
}

impl ScyllaStore {
    /// Connect to the cluster and switch the session to `keyspace`.
    ///
    /// The keyspace must already exist; creating it is not the migration
    /// runner's job.
    pub async fn connect(
        contact_points: &[String],
        port: u16,
        keyspace: &str,
    ) -> StoreResult<Self> {
        let mut builder = SessionBuilder::new();
        for host in contact_points {
            builder = builder.known_node(format!("{host}:{port}"));
        }
        let session = builder
            .build()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        session
            .use_keyspace(keyspace, false)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(Self { session })
    }
}

#[async_trait]
impl Store for ScyllaStore {
    async fn execute(&self, statement: &str) -> StoreResult<()> {
        let mut cql = Statement::new(statement);
        cql.set_consistency(Consistency::Quorum);
        self.session
            .query_unpaged(cql, ())
            .await
            .map_err(|e| StoreError::Execution(e.to_string()))?;
        // Migration statements are mostly DDL; wait for the cluster to
        // agree on the new schema before the next statement runs.
        self.session
            .await_schema_agreement()
            .await
            .map_err(|e| StoreError::Execution(e.to_string()))?;
        Ok(())
    }

    async fn table_exists(&self, keyspace: &str, table: &str) -> StoreResult<bool> {
        let rows = self
            .session
            .query_unpaged(TABLE_LOOKUP, (keyspace, table))
            .await
            .map_err(|e| StoreError::Ledger(e.to_string()))?
            .into_rows_result()
            .map_err(|e| StoreError::Ledger(e.to_string()))?;
        Ok(rows.rows_num() > 0)
    }

    async fn latest_applied_version(&self, table: &str) -> StoreResult<Option<i32>> {
        let query = format!(
            "SELECT version FROM {table} WHERE applied_successful = True \
             ORDER BY version DESC LIMIT 1"
        );
        let rows = self
            .session
            .query_unpaged(query, ())
            .await
            .map_err(|e| StoreError::Ledger(e.to_string()))?
            .into_rows_result()
            .map_err(|e| StoreError::Ledger(e.to_string()))?;
        let row = rows
            .maybe_first_row::<(i32,)>()
            .map_err(|e| StoreError::Ledger(e.to_string()))?;
        Ok(row.map(|(version,)| version))
    }

    async fn append_record(&self, table: &str, record: &LedgerRecord) -> StoreResult<()> {
        let insert = format!(
            "INSERT INTO {table} (applied_successful, version, data_successful, \
             script_name, script, executed_at) VALUES (?, ?, ?, ?, ?, ?)"
        );
        self.session
            .query_unpaged(
                insert,
                (
                    record.schema_applied,
                    record.version,
                    record.data_applied,
                    record.script_name.as_str(),
                    record.script.as_str(),
                    record.executed_at,
                ),
            )
            .await
            .map_err(|e| StoreError::Ledger(e.to_string()))?;
        Ok(())
    }

    fn store_type(&self) -> &'static str {
        "scylla"
    }
}
