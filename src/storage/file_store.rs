//! File-backed key-value store
//!
//! Each key lives in its own `<key>.json` file inside one directory.
//! Writes go through [`write_atomic`] so a crash never leaves a torn value.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{LedgerError, LedgerResult};

use super::file_io::{read_string, write_atomic};
use super::kv::KeyValueStore;

/// Key-value store with one file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the value files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> LedgerResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(LedgerError::Storage(format!("Invalid store key: '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> LedgerResult<Option<String>> {
        let path = self.path_for(key)?;
        debug!(key, path = %path.display(), "reading value");
        read_string(path)
    }

    fn set(&self, key: &str, value: &str) -> LedgerResult<()> {
        let path = self.path_for(key)?;
        debug!(key, path = %path.display(), bytes = value.len(), "writing value");
        write_atomic(path, value.as_bytes())
    }
}
