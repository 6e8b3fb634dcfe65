//! External bulk-load invocation

use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

/// Runs the environment's bulk-load command over a generated command file.
///
/// Kept behind a trait so orchestration never hard-codes how the load is
/// invoked; a native bulk-load API can be substituted without touching
/// the engine.
#[async_trait]
pub trait BulkLoader: Send + Sync {
    /// Invoke the loader on the given command file.
    async fn load(&self, command_file: &Path) -> StoreResult<()>;
}

/// Invokes an external `cqlsh`-style process with the command file path
/// appended as the final argument.
pub struct CqlshLoader {
    command: Vec<String>,
}

impl CqlshLoader {
    /// `command` is the invocation template, e.g. `["cqlsh", "-f"]` or
    /// `["docker", "exec", "casscon", "cqlsh", "-f"]`.
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

#[async_trait]
impl BulkLoader for CqlshLoader {
    async fn load(&self, command_file: &Path) -> StoreResult<()> {
        let Some((program, args)) = self.command.split_first() else {
            return Err(StoreError::DataLoad("empty loader command".to_string()));
        };
        log::info!(
            "Invoking {} {}",
            self.command.join(" "),
            command_file.display()
        );

        let mut child = Command::new(program)
            .args(args)
            .arg(command_file)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| StoreError::DataLoad(format!("failed to spawn {program}: {e}")))?;

        // Drain both pipes concurrently so neither can fill up and stall
        // the child.
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let drain_stdout = async {
            if let Some(out) = stdout {
                let mut lines = BufReader::new(out).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    log::info!("{line}");
                }
            }
        };
        let drain_stderr = async {
            if let Some(err) = stderr {
                let mut lines = BufReader::new(err).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    log::error!("Std ERROR : {line}");
                }
            }
        };
        tokio::join!(drain_stdout, drain_stderr);

        let status = child
            .wait()
            .await
            .map_err(|e| StoreError::DataLoad(e.to_string()))?;
        if !status.success() {
            return Err(StoreError::DataLoad(format!("loader exited with {status}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn command_file(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("command.cql");
        std::fs::write(&path, "USE orders;\n").unwrap();
        path
    }

    #[tokio::test]
    async fn test_successful_invocation() {
        let dir = TempDir::new().unwrap();
        let loader = CqlshLoader::new(vec!["cat".to_string()]);
        loader.load(&command_file(&dir)).await.unwrap();
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_an_error() {
        let dir = TempDir::new().unwrap();
        let loader = CqlshLoader::new(vec!["false".to_string()]);
        assert!(matches!(
            loader.load(&command_file(&dir)).await,
            Err(StoreError::DataLoad(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_program_is_an_error() {
        let dir = TempDir::new().unwrap();
        let loader = CqlshLoader::new(vec!["definitely-not-a-real-binary".to_string()]);
        assert!(matches!(
            loader.load(&command_file(&dir)).await,
            Err(StoreError::DataLoad(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_command_is_an_error() {
        let dir = TempDir::new().unwrap();
        let loader = CqlshLoader::new(Vec::new());
        assert!(matches!(
            loader.load(&command_file(&dir)).await,
            Err(StoreError::DataLoad(_))
        ));
    }
}
