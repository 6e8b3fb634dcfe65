//! cq-engine - Migration orchestrator for Cqlflow
//!
//! This crate coordinates the script catalog and the version ledger:
//! it decides whether a keyspace needs work and drives pending
//! migrations through the executor in order.

pub mod error;
pub mod migrator;

pub use error::{EngineError, EngineResult};
pub use migrator::{MigrationOutcome, Migrator};
