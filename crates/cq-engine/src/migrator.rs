//! Migration orchestration
//!
//! Compares the ledger's current version against the catalog's latest
//! and drives every newer migration through the executor in ascending
//! version order.

use crate::error::EngineResult;
use cq_core::Catalog;
use cq_store::{BulkLoader, Ledger};
use std::path::PathBuf;

/// Result of a migration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// The keyspace already carries the catalog's latest version; the
    /// store was not touched beyond the version lookup.
    UpToDate { version: i32 },

    /// Pending migrations were applied.
    Migrated { from: i32, to: i32, applied: usize },
}

/// Drives pending migrations against one keyspace.
///
/// The bulk-load invocation is environment-dependent and comes in as a
/// [`BulkLoader`] chosen by the caller; nothing here knows how data gets
/// loaded.
pub struct Migrator {
    catalog: Catalog,
    ledger: Ledger,
    data_root: PathBuf,
    loader: Box<dyn BulkLoader>,
}

impl Migrator {
    /// Create a migrator over an opened ledger and a discovered catalog.
    pub fn new(
        catalog: Catalog,
        ledger: Ledger,
        data_root: impl Into<PathBuf>,
        loader: Box<dyn BulkLoader>,
    ) -> Self {
        Self {
            catalog,
            ledger,
            data_root: data_root.into(),
            loader,
        }
    }

    /// Run the migration to completion.
    ///
    /// A no-op when the keyspace is up to date. Otherwise every pending
    /// migration is applied in ascending order: schema step first, then
    /// the data step. A schema failure propagates immediately after
    /// being recorded: later versions are never attempted and the
    /// keyspace stays at the last fully successful version. Data-step
    /// failures never abort the run.
    ///
    /// The session handle is released on completion; the error path
    /// releases it through drop.
    pub async fn run(self) -> EngineResult<MigrationOutcome> {
        let current = self.ledger.current_version().await?;
        let latest = self.catalog.latest_version();
        if current >= latest {
            log::info!(
                "Keyspace {} is already up to date at version {}",
                self.ledger.keyspace(),
                current
            );
            self.ledger.close();
            return Ok(MigrationOutcome::UpToDate { version: current });
        }

        let pending = self.catalog.migrations_newer_than(current)?;
        log::info!(
            "Applying {} pending migrations to keyspace {}",
            pending.len(),
            self.ledger.keyspace()
        );
        for migration in &pending {
            self.ledger.apply_schema(migration).await?;
            self.ledger
                .apply_data(migration, &self.data_root, self.loader.as_ref())
                .await;
        }

        let to = self.ledger.current_version().await?;
        log::info!(
            "Migrated keyspace {} to version {}",
            self.ledger.keyspace(),
            to
        );
        self.ledger.close();
        Ok(MigrationOutcome::Migrated {
            from: current,
            to,
            applied: pending.len(),
        })
    }
}

#[cfg(test)]
#[path = "migrator_test.rs"]
mod tests;
