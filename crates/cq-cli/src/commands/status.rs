//! Status command implementation - read-only view of ledger vs catalog

use anyhow::Result;
use serde::Serialize;

use crate::cli::{GlobalArgs, StatusArgs, StatusOutput};
use crate::commands::common::{build_catalog, load_config, open_ledger, print_table, project_root};

#[derive(Debug, Serialize)]
struct StatusReport {
    keyspace: String,
    current_version: i32,
    latest_version: i32,
    pending: Vec<PendingScript>,
}

#[derive(Debug, Serialize)]
struct PendingScript {
    version: i32,
    script: String,
}

/// Execute the status command
pub(crate) async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let root = project_root(global);
    let config = load_config(global)?;
    let catalog = build_catalog(&config, &root)?;
    let ledger = open_ledger(&config).await?;

    let current = ledger.current_version().await?;
    ledger.close();

    let report = StatusReport {
        keyspace: config.keyspace.clone(),
        current_version: current,
        latest_version: catalog.latest_version(),
        pending: catalog
            .scripts()
            .iter()
            .filter(|s| s.version > current)
            .map(|s| PendingScript {
                version: s.version,
                script: s.name.clone(),
            })
            .collect(),
    };

    match args.output {
        StatusOutput::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        StatusOutput::Table => {
            println!("Keyspace:        {}", report.keyspace);
            println!("Current version: {}", report.current_version);
            println!("Latest version:  {}", report.latest_version);
            if report.pending.is_empty() {
                println!("Keyspace is up to date.");
            } else {
                println!();
                let rows: Vec<Vec<String>> = report
                    .pending
                    .iter()
                    .map(|p| vec![p.version.to_string(), p.script.clone()])
                    .collect();
                print_table(&["VERSION", "SCRIPT"], &rows);
            }
        }
    }
    Ok(())
}
