//! Init command implementation - scaffolds a new Cqlflow project

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::cli::InitArgs;

/// Execute the init command
pub(crate) async fn execute(args: &InitArgs) -> Result<()> {
    // Reject names that could cause path traversal or confusing directory names
    if args.name.contains('/')
        || args.name.contains('\\')
        || args.name.contains("..")
        || args.name.starts_with('.')
        || args.name.starts_with('-')
    {
        anyhow::bail!(
            "Invalid project name '{}': must not contain '/', '\\', '..', or start with '.' or '-'",
            args.name
        );
    }

    let project_dir = Path::new(&args.name);

    if project_dir.exists() {
        anyhow::bail!(
            "Directory '{}' already exists. Choose a different project name.",
            args.name
        );
    }

    println!("Creating new Cqlflow project: {}\n", args.name);

    let dirs = ["", "migrations/scripts", "migrations/data"];
    for dir in &dirs {
        let path = project_dir.join(dir);
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }

    // Generate cqlflow.yml
    let keyspace = args.keyspace.as_deref().unwrap_or(&args.name);
    let safe_keyspace = keyspace.replace('"', "\\\"");
    let config_content = format!(
        r#"keyspace: "{keyspace}"

contact_points:
  - 127.0.0.1
port: 9042

script_path: migrations/scripts
data_path: migrations/data

# Selects the default bulk-load invocation: `direct` runs cqlsh on this
# host, `container` runs it inside the named docker container.
profile: direct
container: cassandra

# Explicit override of the bulk-load invocation template:
# loader_command: ["kubectl", "exec", "cass-0", "--", "cqlsh", "-f"]
"#,
        keyspace = safe_keyspace,
    );
    fs::write(project_dir.join("cqlflow.yml"), config_content)
        .context("Failed to write cqlflow.yml")?;

    // Generate example migration script
    let example_cql = r#"-- Example migration. The integer prefix of the filename is the
-- version; scripts run in ascending version order. Statements must be
-- separated by ';' because comment stripping joins lines together.
CREATE TABLE example (
    id uuid PRIMARY KEY,
    name text,
    created_at timestamp
);
"#;
    fs::write(
        project_dir.join("migrations/scripts/1_create_example.cql"),
        example_cql,
    )
    .context("Failed to write example migration script")?;

    println!("Created project structure:");
    println!("  {}/", args.name);
    println!("  ├── cqlflow.yml");
    println!("  └── migrations/");
    println!("      ├── scripts/1_create_example.cql");
    println!("      └── data/");
    println!();
    println!("Next steps:");
    println!("  cd {}", args.name);
    println!("  cqf status");
    println!("  cqf migrate");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::InitArgs;
    use serial_test::serial;

    fn args(name: &str) -> InitArgs {
        InitArgs {
            name: name.to_string(),
            keyspace: None,
        }
    }

    #[tokio::test]
    async fn test_init_rejects_path_traversal_names() {
        for bad in ["../evil", "a/b", ".hidden", "-flag"] {
            assert!(execute(&args(bad)).await.is_err());
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_init_scaffolds_project() {
        let tmp = tempfile::TempDir::new().unwrap();
        let cwd = std::env::current_dir().unwrap();
        std::env::set_current_dir(tmp.path()).unwrap();

        let result = execute(&args("orders_ks")).await;
        std::env::set_current_dir(cwd).unwrap();
        result.unwrap();

        let root = tmp.path().join("orders_ks");
        assert!(root.join("cqlflow.yml").exists());
        assert!(root
            .join("migrations/scripts/1_create_example.cql")
            .exists());
        assert!(root.join("migrations/data").is_dir());

        let config = cq_core::Config::load(&root).unwrap();
        assert_eq!(config.keyspace, "orders_ks");
    }

    #[tokio::test]
    #[serial]
    async fn test_init_refuses_existing_directory() {
        let tmp = tempfile::TempDir::new().unwrap();
        let cwd = std::env::current_dir().unwrap();
        std::env::set_current_dir(tmp.path()).unwrap();

        std::fs::create_dir("taken").unwrap();
        let result = execute(&args("taken")).await;
        std::env::set_current_dir(cwd).unwrap();
        assert!(result.is_err());
    }
}
