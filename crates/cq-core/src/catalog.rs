//! Script catalog - discovery, ordering, and loading of migration scripts

use crate::error::{CoreError, CoreResult};
use crate::script::{Migration, Script};
use crate::source::ScriptSource;
use std::collections::HashSet;

/// The file extension a migration script must carry. Files without it
/// are skipped during discovery.
pub const SCRIPT_EXTENSION: &str = ".cql";

/// Delimiter between the version prefix and the rest of the script name.
pub const VERSION_DELIMITER: char = '_';

/// Ordered collection of the migration scripts available at one location.
///
/// The version parsed from each filename is the sole source of truth for
/// ordering; directory structure and script content are irrelevant to it.
pub struct Catalog {
    source: Box<dyn ScriptSource>,
    scripts: Vec<Script>,
}

impl Catalog {
    /// Scan the source and build the catalog.
    ///
    /// Files without the `.cql` extension are skipped with a warning,
    /// not an error, and an empty location yields an empty catalog.
    /// Fails when the location cannot be scanned, when a qualifying
    /// filename does not encode a positive integer version, or when two
    /// distinct files claim the same version.
    pub fn discover(source: Box<dyn ScriptSource>) -> CoreResult<Self> {
        log::debug!(
            "Scanning for cql migration scripts in {}",
            source.location()
        );

        let mut seen: HashSet<Script> = HashSet::new();
        let mut scripts = Vec::new();
        for file in source.scan()? {
            if !file.name.ends_with(SCRIPT_EXTENSION) {
                log::warn!(
                    "Ignoring file {} because it is not a cql file",
                    file.locator
                );
                continue;
            }
            let script = Script {
                version: extract_version(&file.name)?,
                name: file.name,
                locator: file.locator,
            };
            if seen.insert(script.clone()) {
                scripts.push(script);
            }
        }
        scripts.sort_by(|a, b| a.version.cmp(&b.version));

        for pair in scripts.windows(2) {
            if pair[0].version == pair[1].version {
                return Err(CoreError::DuplicateVersion {
                    version: pair[0].version,
                    first: pair[0].name.clone(),
                    second: pair[1].name.clone(),
                });
            }
        }

        log::info!("Found {} migration scripts", scripts.len());
        Ok(Self { source, scripts })
    }

    /// The discovered scripts in ascending version order.
    pub fn scripts(&self) -> &[Script] {
        &self.scripts
    }

    /// Highest version present, or 0 for an empty catalog.
    pub fn latest_version(&self) -> i32 {
        self.scripts.last().map(|s| s.version).unwrap_or(0)
    }

    /// Load a script's content with comment lines removed.
    ///
    /// Lines whose trimmed form starts with `--` or `//` are dropped and
    /// the surviving lines are concatenated **without** a separator, so
    /// statement boundaries must come from the `;` delimiter. A script
    /// whose statements are separated only by newlines collapses into one
    /// run-on statement; that is a constraint on script authors, not
    /// something the catalog repairs.
    pub fn content_of(&self, script: &Script) -> CoreResult<String> {
        let raw = self.source.read(&script.locator)?;
        Ok(strip_comments(&raw))
    }

    /// All migrations newer than `version`, ascending, with content
    /// loaded. Empty when none qualify; never includes `version` itself.
    pub fn migrations_newer_than(&self, version: i32) -> CoreResult<Vec<Migration>> {
        let mut migrations = Vec::new();
        for script in self.scripts.iter().filter(|s| s.version > version) {
            migrations.push(Migration {
                version: script.version,
                name: script.name.clone(),
                cql: self.content_of(script)?,
            });
        }
        Ok(migrations)
    }
}

/// Parse the positive integer version prefix before the first `_`.
fn extract_version(name: &str) -> CoreResult<i32> {
    let prefix = name.split(VERSION_DELIMITER).next().unwrap_or(name);
    match prefix.parse::<i32>() {
        Ok(version) if version > 0 => Ok(version),
        _ => Err(CoreError::VersionParse {
            script: name.to_string(),
        }),
    }
}

/// Drop single-line comments and join the survivors without separators.
fn strip_comments(raw: &str) -> String {
    raw.lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("--") && !trimmed.starts_with("//")
        })
        .collect()
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
