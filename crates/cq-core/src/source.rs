//! Script sources - where migration scripts are scanned from
//!
//! The catalog is parameterized over a [`ScriptSource`] so the scanning
//! mode is an explicit constructor argument rather than ambient
//! environment state. [`DirSource`] scans a filesystem directory;
//! [`EmbeddedSource`] scans scripts compiled into the consumer binary
//! with `rust-embed`.

use crate::error::{CoreError, CoreResult};
use rust_embed::RustEmbed;
use std::marker::PhantomData;
use std::path::PathBuf;

/// A candidate file reported by a scan, prior to any filtering.
#[derive(Debug, Clone)]
pub struct ScriptFile {
    /// Bare file name, e.g. `2_create_users.cql`
    pub name: String,

    /// Handle understood by the source's `read`
    pub locator: String,
}

/// Where migration scripts are read from.
pub trait ScriptSource: Send + Sync {
    /// List every file at the source location.
    ///
    /// Fails when the location itself cannot be scanned; an empty
    /// location yields an empty list, not an error.
    fn scan(&self) -> CoreResult<Vec<ScriptFile>>;

    /// Load the raw content behind a locator returned by [`scan`](Self::scan).
    fn read(&self, locator: &str) -> CoreResult<String>;

    /// Human-readable location for logs and error messages.
    fn location(&self) -> String;
}

/// Scans a filesystem directory (non-recursive).
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Create a source over the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ScriptSource for DirSource {
    fn scan(&self) -> CoreResult<Vec<ScriptFile>> {
        if !self.root.is_dir() {
            return Err(CoreError::Discovery {
                location: self.root.display().to_string(),
                reason: "not a directory".to_string(),
            });
        }
        let entries = std::fs::read_dir(&self.root).map_err(|e| CoreError::Discovery {
            location: self.root.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CoreError::Discovery {
                location: self.root.display().to_string(),
                reason: e.to_string(),
            })?;
            let path = entry.path();
            if path.is_dir() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            files.push(ScriptFile {
                name: name.to_string(),
                locator: path.display().to_string(),
            });
        }
        Ok(files)
    }

    fn read(&self, locator: &str) -> CoreResult<String> {
        std::fs::read_to_string(locator).map_err(|e| CoreError::ScriptRead {
            script: locator.to_string(),
            reason: e.to_string(),
        })
    }

    fn location(&self) -> String {
        self.root.display().to_string()
    }
}

/// Scans scripts bundled into the binary with `rust-embed`.
///
/// Library consumers derive `RustEmbed` over their migration folder and
/// hand the type here to ship migrations inside their own binary instead
/// of alongside it.
pub struct EmbeddedSource<E: RustEmbed> {
    prefix: String,
    _assets: PhantomData<E>,
}

impl<E: RustEmbed> EmbeddedSource<E> {
    /// Create a source over a sub-folder of the embedded tree.
    ///
    /// Pass `""` for the whole tree. A trailing slash is added when
    /// missing so prefix matching stays on folder boundaries.
    pub fn new(prefix: &str) -> Self {
        let mut prefix = prefix.trim_start_matches('/').to_string();
        if !prefix.is_empty() && !prefix.ends_with('/') {
            prefix.push('/');
        }
        Self {
            prefix,
            _assets: PhantomData,
        }
    }
}

impl<E: RustEmbed + Send + Sync> ScriptSource for EmbeddedSource<E> {
    fn scan(&self) -> CoreResult<Vec<ScriptFile>> {
        let mut files = Vec::new();
        for path in E::iter() {
            let path = path.as_ref();
            let Some(rest) = path.strip_prefix(&self.prefix) else {
                continue;
            };
            // Direct children only, matching DirSource's non-recursive scan
            if rest.is_empty() || rest.contains('/') {
                continue;
            }
            files.push(ScriptFile {
                name: rest.to_string(),
                locator: path.to_string(),
            });
        }
        Ok(files)
    }

    fn read(&self, locator: &str) -> CoreResult<String> {
        let file = E::get(locator).ok_or_else(|| CoreError::ScriptRead {
            script: locator.to_string(),
            reason: "not present in embedded assets".to_string(),
        })?;
        String::from_utf8(file.data.into_owned()).map_err(|e| CoreError::ScriptRead {
            script: locator.to_string(),
            reason: e.to_string(),
        })
    }

    fn location(&self) -> String {
        format!("embedded:{}", self.prefix)
    }
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
