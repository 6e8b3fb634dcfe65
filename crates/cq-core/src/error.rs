//! Error types for cq-core

use thiserror::Error;

/// Core error type for Cqlflow
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Script location cannot be scanned
    #[error("[C001] Cannot scan script location {location}: {reason}")]
    Discovery { location: String, reason: String },

    /// C002: Filename does not encode an integer version
    #[error("[C002] Unable to extract version from script {script}")]
    VersionParse { script: String },

    /// C003: Two scripts claim the same version
    #[error("[C003] Duplicate version {version} in {first} and {second}")]
    DuplicateVersion {
        version: i32,
        first: String,
        second: String,
    },

    /// C004: Script content could not be read
    #[error("[C004] Failed to read script {script}: {reason}")]
    ScriptRead { script: String, reason: String },

    /// C005: Configuration file not found
    #[error("[C005] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C006: YAML parse error
    #[error("[C006] Failed to parse config: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// C007: IO error
    #[error("[C007] IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
