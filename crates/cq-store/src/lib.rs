//! cq-store - Store-facing layer for Cqlflow
//!
//! This crate provides the `Store` trait with its scylla and in-memory
//! implementations, the append-only migration ledger and executor, and
//! the external bulk loader.

pub mod error;
pub mod ledger;
pub mod loader;
pub mod memory;
pub mod scylla;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use ledger::{Ledger, LedgerRecord, COMMAND_FILE, LEDGER_TABLE};
pub use loader::{BulkLoader, CqlshLoader};
pub use memory::MemoryStore;
pub use scylla::ScyllaStore;
pub use traits::Store;
