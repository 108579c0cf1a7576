//! # Storage Traits
//!
//! This module defines the storage abstraction used by the domain layer.
//! The item store only ever needs a flat key-value space, so any backend
//! that can read and overwrite an opaque blob under a key will do
//! (files on disk, platform preferences, an in-memory map in tests).

use anyhow::Result;

/// Trait defining the interface for key-value storage operations
///
/// Values are opaque bytes. Writing a key always replaces its previous value.
pub trait KeyValueStorage: Send + Sync {
    /// Retrieve the value stored under `key`, if any
    fn get_value(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store a value, overwriting any existing value for the same key
    fn put_value(&self, key: &str, value: &[u8]) -> Result<()>;
}
