use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key the calculator's snapshot is stored under.
pub const DEFAULT_SNAPSHOT_KEY: &str = "tradeSimulator";

/// Errors raised by a snapshot store.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid snapshot key '{0}': use letters, digits, '-' or '_'")]
    InvalidKey(String),
    #[error("snapshot store I/O failed for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
}

/// Key-value persistence for encoded snapshots.
///
/// Implementations store opaque text; decoding and defaulting belong to
/// [`SnapshotCodec`](crate::snapshot::codec::SnapshotCodec).
pub trait SnapshotStore {
    /// Stored text for `key`, or `None` if nothing was ever saved.
    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError>;

    /// Replace whatever is stored under `key`.
    fn save(&mut self, key: &str, contents: &str) -> Result<(), SnapshotError>;
}

/// In-process store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entry, e.g. a record written by an older version.
    pub fn with_entry(mut self, key: impl Into<String>, contents: impl Into<String>) -> Self {
        self.entries.insert(key.into(), contents.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, contents: &str) -> Result<(), SnapshotError> {
        self.entries.insert(key.to_string(), contents.to_string());
        Ok(())
    }
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`. Keys are restricted so they cannot escape `dir`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, SnapshotError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(SnapshotError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SnapshotError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn save(&mut self, key: &str, contents: &str) -> Result<(), SnapshotError> {
        let path = self.path_for(key)?;
        let io_err = |source: io::Error| SnapshotError::Io {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_err)?;
        fs::write(&path, contents).map_err(io_err)?;
        log::debug!("Snapshot '{}' written to {}", key, path.display());
        Ok(())
    }
}
