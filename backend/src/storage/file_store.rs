//! # File Key-Value Store
//!
//! Stores each key as its own file in the data directory:
//!
//! ```text
//! data/
//! ├── food_tracker.yaml     ← configuration (see `config`)
//! └── SavedItemsV3.value    ← one file per key
//! ```
//!
//! Writes go through a temp file and a rename so a crash mid-write never
//! leaves a truncated value behind.

use anyhow::Result;
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::connection::FileConnection;
use super::traits::KeyValueStorage;

const VALUE_EXTENSION: &str = "value";

/// Keys become file names, so only `[A-Za-z0-9_.-]` is allowed and a key
/// cannot start with '.'
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(anyhow::anyhow!("Storage key cannot be empty"));
    }
    if key.starts_with('.') {
        return Err(anyhow::anyhow!("Storage key cannot start with '.': {}", key));
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
    {
        return Err(anyhow::anyhow!("Storage key contains invalid characters: {}", key));
    }
    Ok(())
}

/// File-backed key-value store
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    connection: FileConnection,
}

impl FileKeyValueStore {
    pub fn new(connection: FileConnection) -> Self {
        Self { connection }
    }

    fn value_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self
            .connection
            .base_directory()
            .join(format!("{}.{}", key, VALUE_EXTENSION)))
    }
}

impl KeyValueStorage for FileKeyValueStore {
    fn get_value(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.value_path(key)?;
        match fs::read(&path) {
            Ok(bytes) => {
                debug!("Read {} bytes from {:?}", bytes.len(), path);
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put_value(&self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.value_path(key)?;
        self.connection.write_atomic(&path, value)?;
        debug!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }
}
