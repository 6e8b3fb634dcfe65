//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use cq_core::{Catalog, Config, DirSource, Profile};
use cq_store::{Ledger, ScyllaStore, Store};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::{GlobalArgs, ProfileArg};

/// Project root from the global CLI arguments.
pub(crate) fn project_root(global: &GlobalArgs) -> PathBuf {
    PathBuf::from(&global.project_dir)
}

/// Load the project config, honoring `--config` and `--profile`.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    let mut config = match &global.config {
        Some(path) => Config::load_file(Path::new(path)),
        None => Config::load(&project_root(global)),
    }
    .context("Failed to load project config")?;

    if let Some(profile) = global.profile {
        config.profile = match profile {
            ProfileArg::Direct => Profile::Direct,
            ProfileArg::Container => Profile::Container,
        };
    }
    Ok(config)
}

/// Discover the script catalog from the configured directory.
pub(crate) fn build_catalog(config: &Config, root: &Path) -> Result<Catalog> {
    let scripts = config.script_path_absolute(root);
    Catalog::discover(Box::new(DirSource::new(scripts)))
        .context("Failed to discover migration scripts")
}

/// Connect to the store and open the migration ledger.
pub(crate) async fn open_ledger(config: &Config) -> Result<Ledger> {
    let store = ScyllaStore::connect(&config.contact_points, config.port, &config.keyspace)
        .await
        .context("Failed to connect to the store")?;
    log::debug!(
        "Connected to {} store at {:?} port {}",
        store.store_type(),
        config.contact_points,
        config.port
    );
    Ledger::open(Arc::new(store), config.keyspace.clone())
        .await
        .context("Failed to open the migration ledger")
}

/// Print a formatted table to stdout.
///
/// Calculates column widths from `headers` and `rows`, then prints a
/// left-aligned header row, a separator line of dashes, and each data
/// row. Columns are separated by two spaces.
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }

    let header_parts: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{:<width$}", h, width = w))
        .collect();
    println!("{}", header_parts.join("  "));

    let sep_parts: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep_parts.join("  "));

    for row in rows {
        let row_parts: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
            .collect();
        println!("{}", row_parts.join("  "));
    }
}
