//! Discovered migration scripts and their materialized form

/// A migration script discovered at the catalog location, prior to
/// content loading.
///
/// Equality covers the full `(locator, name, version)` triple so two
/// distinct files never collapse into one catalog entry; ordering within
/// the catalog is by `version` alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Script {
    /// Version encoded in the filename prefix
    pub version: i32,

    /// File name, e.g. `2_create_users.cql`
    pub name: String,

    /// Opaque handle used to load the content later
    pub locator: String,
}

/// A script with its content materialized, ready for execution.
///
/// The body has comment lines already removed and is passed to the
/// executor by reference; nothing holds onto it after the apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    /// Version this migration brings the keyspace to
    pub version: i32,

    /// Script file name, stored verbatim in the ledger
    pub name: String,

    /// Full script body with comment lines removed
    pub cql: String,
}
