//! cq-core - Core library for Cqlflow
//!
//! This crate provides the migration script catalog, project
//! configuration, and the shared error type used across all Cqlflow
//! components.

pub mod catalog;
pub mod config;
pub mod error;
pub mod script;
pub mod source;

pub use catalog::{Catalog, SCRIPT_EXTENSION, VERSION_DELIMITER};
pub use config::{Config, Profile};
pub use error::{CoreError, CoreResult};
pub use script::{Migration, Script};
pub use source::{DirSource, EmbeddedSource, ScriptFile, ScriptSource};
