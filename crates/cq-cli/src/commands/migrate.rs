//! Migrate command implementation - applies pending migrations

use anyhow::{Context, Result};
use cq_engine::{MigrationOutcome, Migrator};
use cq_store::CqlshLoader;

use crate::cli::GlobalArgs;
use crate::commands::common::{build_catalog, load_config, open_ledger, project_root};

/// Execute the migrate command
pub(crate) async fn execute(global: &GlobalArgs) -> Result<()> {
    let root = project_root(global);
    let config = load_config(global)?;
    let catalog = build_catalog(&config, &root)?;
    let ledger = open_ledger(&config).await?;

    let loader_command = config.loader_command();
    log::debug!("Bulk-load invocation: {loader_command:?}");
    let migrator = Migrator::new(
        catalog,
        ledger,
        config.data_path_absolute(&root),
        Box::new(CqlshLoader::new(loader_command)),
    );

    match migrator.run().await.context("Migration failed")? {
        MigrationOutcome::UpToDate { version } => {
            println!(
                "Keyspace {} is already up to date at version {}",
                config.keyspace, version
            );
        }
        MigrationOutcome::Migrated { from, to, applied } => {
            println!(
                "Migrated keyspace {} from version {} to {} ({} scripts applied)",
                config.keyspace, from, to, applied
            );
        }
    }
    Ok(())
}
