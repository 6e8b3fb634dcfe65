//! Configuration types and parsing for cqlflow.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main project configuration from cqlflow.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Keyspace managed by this project
    pub keyspace: String,

    /// Store contact points (hostnames or addresses)
    #[serde(default = "default_contact_points")]
    pub contact_points: Vec<String>,

    /// Native protocol port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory containing migration scripts
    #[serde(default = "default_script_path")]
    pub script_path: String,

    /// Root directory containing per-version bulk-load data
    #[serde(default = "default_data_path")]
    pub data_path: String,

    /// Execution environment; selects the default bulk-load invocation
    #[serde(default)]
    pub profile: Profile,

    /// Container name used by the `container` profile
    #[serde(default = "default_container")]
    pub container: String,

    /// Explicit bulk-load invocation, overriding the profile default.
    /// The generated command file path is appended as the last argument.
    #[serde(default)]
    pub loader_command: Option<Vec<String>>,
}

/// Execution environment for the bulk-load step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// cqlsh available on the local host
    #[default]
    Direct,
    /// cqlsh inside a docker container
    Container,
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Profile::Direct => write!(f, "direct"),
            Profile::Container => write!(f, "container"),
        }
    }
}

fn default_contact_points() -> Vec<String> {
    vec!["127.0.0.1".to_string()]
}

fn default_port() -> u16 {
    9042
}

fn default_script_path() -> String {
    "migrations/scripts".to_string()
}

fn default_data_path() -> String {
    "migrations/data".to_string()
}

fn default_container() -> String {
    "cassandra".to_string()
}

impl Config {
    /// Load configuration from `cqlflow.yml` (or `cqlflow.yaml`) in `dir`.
    pub fn load(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("cqlflow.yml");
        let yaml_path = dir.join("cqlflow.yaml");
        let path = if yml_path.exists() {
            yml_path
        } else if yaml_path.exists() {
            yaml_path
        } else {
            return Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            });
        };
        Self::load_file(&path)
    }

    /// Load configuration from an explicit file path.
    pub fn load_file(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Script directory resolved against the project root.
    pub fn script_path_absolute(&self, root: &Path) -> PathBuf {
        resolve(root, &self.script_path)
    }

    /// Data root resolved against the project root.
    pub fn data_path_absolute(&self, root: &Path) -> PathBuf {
        resolve(root, &self.data_path)
    }

    /// The bulk-load invocation: the explicit override when present,
    /// else the profile default.
    pub fn loader_command(&self) -> Vec<String> {
        if let Some(command) = &self.loader_command {
            return command.clone();
        }
        match self.profile {
            Profile::Direct => vec!["cqlsh".to_string(), "-f".to_string()],
            Profile::Container => vec![
                "docker".to_string(),
                "exec".to_string(),
                self.container.clone(),
                "cqlsh".to_string(),
                "-f".to_string(),
            ],
        }
    }
}

fn resolve(root: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
