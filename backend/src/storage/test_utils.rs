//! Test utilities for automatic cleanup and consistent test infrastructure.
//!
//! RAII-based cleanup removes test data even if a test panics.

use anyhow::Result;
use std::sync::Arc;
use tempfile::TempDir;

use super::connection::FileConnection;
use super::file_store::FileKeyValueStore;
use super::memory_store::InMemoryKeyValueStore;

/// Test environment that provides a temporary directory and connection
/// that will be automatically cleaned up when the environment is dropped,
/// even if tests panic or fail.
pub struct TestEnvironment {
    pub connection: FileConnection,
    /// Base directory path for manual inspection if needed
    pub base_path: std::path::PathBuf,
    _temp_dir: TempDir, // Keep alive to prevent cleanup
}

impl TestEnvironment {
    /// Create a new test environment with a temporary directory
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = FileConnection::new(temp_dir.path())?;
        Ok(Self {
            connection,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }

    /// A file-backed store living in this environment's directory
    pub fn file_store(&self) -> Arc<FileKeyValueStore> {
        Arc::new(FileKeyValueStore::new(self.connection.clone()))
    }
}

/// Fresh in-memory store, shared so tests can inspect it after handing it to a service
pub fn memory_store() -> Arc<InMemoryKeyValueStore> {
    Arc::new(InMemoryKeyValueStore::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::KeyValueStorage;

    #[test]
    fn test_environment_cleanup() {
        let base_path = {
            let env = TestEnvironment::new().unwrap();
            let store = env.file_store();
            store.put_value("probe", b"1").unwrap();
            assert!(env.base_path.exists());
            env.base_path.clone()
        };

        assert!(!base_path.exists(), "Temp directory should be removed on drop");
    }
}
