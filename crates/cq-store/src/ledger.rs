//! Version ledger and migration executor
//!
//! The ledger is the append-only `schema_migration` table in the managed
//! keyspace: one row per apply attempt, never updated or deleted. The
//! current schema version is a projection over it: the greatest version
//! with a successful schema record.

use crate::error::{StoreError, StoreResult};
use crate::loader::BulkLoader;
use crate::traits::Store;
use chrono::{DateTime, Utc};
use cq_core::Migration;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Name of the table that tracks migration attempts.
pub const LEDGER_TABLE: &str = "schema_migration";

/// Fixed name of the generated bulk-load command file.
pub const COMMAND_FILE: &str = "command.cql";

/// The delimiter between two cql statements.
const STATEMENT_DELIMITER: char = ';';

/// One row of the migration ledger.
///
/// `data_applied` is `None` when no data step was attempted for the
/// recorded outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRecord {
    pub version: i32,
    pub schema_applied: bool,
    pub data_applied: Option<bool>,
    pub script_name: String,
    pub script: String,
    pub executed_at: DateTime<Utc>,
}

impl LedgerRecord {
    fn attempt(migration: &Migration, schema_applied: bool, data_applied: Option<bool>) -> Self {
        Self {
            version: migration.version,
            schema_applied,
            data_applied,
            script_name: migration.name.clone(),
            script: migration.cql.clone(),
            executed_at: Utc::now(),
        }
    }
}

/// The version ledger and migration executor for one keyspace.
///
/// Owns the session handle (via the store) for the duration of a run;
/// cluster-level resources stay with the caller.
pub struct Ledger {
    store: Arc<dyn Store>,
    keyspace: String,
}

impl Ledger {
    /// Open the ledger, creating the tracking table when a lookup shows
    /// it absent.
    ///
    /// The existence check and creation are not guarded against
    /// concurrent creators; a single runner per keyspace is assumed.
    pub async fn open(store: Arc<dyn Store>, keyspace: impl Into<String>) -> StoreResult<Self> {
        let ledger = Self {
            store,
            keyspace: keyspace.into(),
        };
        ledger.ensure_table().await?;
        Ok(ledger)
    }

    /// Name of the keyspace managed by this ledger.
    pub fn keyspace(&self) -> &str {
        &self.keyspace
    }

    async fn ensure_table(&self) -> StoreResult<()> {
        if self
            .store
            .table_exists(&self.keyspace, LEDGER_TABLE)
            .await?
        {
            return Ok(());
        }
        log::debug!("Creating ledger table {}.{}", self.keyspace, LEDGER_TABLE);
        self.store
            .execute(&format!(
                "CREATE TABLE {LEDGER_TABLE} (applied_successful boolean, version int, \
                 data_successful boolean, script_name varchar, script text, \
                 executed_at timestamp, PRIMARY KEY (applied_successful, version))"
            ))
            .await
    }

    /// Current schema version: the greatest version with a successful
    /// record, or 0 when none exists.
    pub async fn current_version(&self) -> StoreResult<i32> {
        Ok(self
            .store
            .latest_applied_version(LEDGER_TABLE)
            .await?
            .unwrap_or(0))
    }

    /// Execute a migration's schema statements and record the outcome.
    ///
    /// Statements run one at a time in split order. The first failure is
    /// appended to the ledger as an unsuccessful attempt and aborts the
    /// script; earlier statements are not rolled back, as the store offers
    /// no multi-statement atomicity.
    pub async fn apply_schema(&self, migration: &Migration) -> StoreResult<()> {
        log::debug!(
            "About to execute migration {} to version {}",
            migration.name,
            migration.version
        );
        for statement in migration.cql.split(STATEMENT_DELIMITER) {
            let statement = statement.trim();
            if statement.is_empty() {
                continue;
            }
            if let Err(e) = self.store.execute(statement).await {
                if let Err(append_err) = self
                    .append(LedgerRecord::attempt(migration, false, None))
                    .await
                {
                    log::error!("Failed to record unsuccessful attempt: {append_err}");
                }
                return Err(StoreError::Migration {
                    script: migration.name.clone(),
                    statement: statement.to_string(),
                    message: e.to_string(),
                });
            }
        }
        self.append(LedgerRecord::attempt(migration, true, None))
            .await?;
        log::debug!(
            "Successfully applied migration {} to version {}",
            migration.name,
            migration.version
        );
        Ok(())
    }

    /// Run the optional bulk-load step for a migration.
    ///
    /// Never fails the run: any error is logged, appended to the ledger
    /// as an unsuccessful data step, and absorbed. A missing data
    /// directory counts as "no data step attempted" and is recorded with
    /// a null data outcome.
    pub async fn apply_data(&self, migration: &Migration, data_root: &Path, loader: &dyn BulkLoader) {
        log::info!("Begin data load for version {}", migration.version);
        if let Err(e) = self.try_apply_data(migration, data_root, loader).await {
            log::error!("Data load for script {} failed: {e}", migration.name);
            if let Err(append_err) = self
                .append(LedgerRecord::attempt(migration, true, Some(false)))
                .await
            {
                log::error!("Failed to record data load failure: {append_err}");
            }
        }
        log::info!("End data load for version {}", migration.version);
    }

    async fn try_apply_data(
        &self,
        migration: &Migration,
        data_root: &Path,
        loader: &dyn BulkLoader,
    ) -> StoreResult<()> {
        let dir = data_root.join(migration.version.to_string());
        if !dir.is_dir() {
            log::info!(
                "No data directory at {}, skipping data load",
                dir.display()
            );
            self.append(LedgerRecord::attempt(migration, true, None))
                .await?;
            return Ok(());
        }

        let script = self.build_load_script(&dir).await?;
        let command_file = dir.join(COMMAND_FILE);
        tokio::fs::write(&command_file, script)
            .await
            .map_err(|e| StoreError::DataLoad(e.to_string()))?;
        log::info!("Command file path {}", command_file.display());

        loader.load(&command_file).await?;

        self.append(LedgerRecord::attempt(migration, true, Some(true)))
            .await?;
        log::debug!(
            "Successfully loaded data for migration {} to version {}",
            migration.name,
            migration.version
        );
        if let Err(e) = tokio::fs::remove_file(&command_file).await {
            log::warn!(
                "Failed to remove generated command file {}: {e}",
                command_file.display()
            );
        }
        Ok(())
    }

    /// Synthesize the bulk-load command script for one data directory:
    /// a `USE` for the managed keyspace, then one `COPY` per data file.
    /// A stale generated command file is never listed as data.
    async fn build_load_script(&self, dir: &Path) -> StoreResult<String> {
        let mut entries = tokio::fs::read_dir(dir)
            .await
            .map_err(|e| StoreError::DataLoad(e.to_string()))?;
        let mut files: Vec<PathBuf> = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::DataLoad(e.to_string()))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| StoreError::DataLoad(e.to_string()))?;
            if file_type.is_dir() {
                continue;
            }
            if entry.file_name() == COMMAND_FILE {
                continue;
            }
            files.push(entry.path());
        }
        files.sort();
        log::info!("Found {} data files in {}", files.len(), dir.display());

        let mut script = format!("USE {};\n", self.keyspace);
        for path in &files {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let absolute = std::path::absolute(path)
                .map_err(|e| StoreError::DataLoad(e.to_string()))?;
            script.push_str(&format!("COPY {} FROM '{}';\n", name, absolute.display()));
        }
        Ok(script)
    }

    async fn append(&self, record: LedgerRecord) -> StoreResult<()> {
        self.store.append_record(LEDGER_TABLE, &record).await
    }

    /// Release the session handle. Cluster-level resources owned by the
    /// caller are untouched. A run that errors out releases the handle
    /// through drop instead.
    pub fn close(self) {
        log::debug!("Closing ledger session for keyspace {}", self.keyspace);
    }
}
