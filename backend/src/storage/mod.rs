//! # Storage Module
//!
//! Key-value persistence for the item store.
//!
//! - [`FileKeyValueStore`]: one file per key in the data directory, atomic writes
//! - [`InMemoryKeyValueStore`]: map-backed fake with failure switches
//!
//! Both implement [`KeyValueStorage`], which is all the domain layer sees.

pub mod connection;
pub mod file_store;
pub mod memory_store;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use connection::FileConnection;
pub use file_store::{validate_key, FileKeyValueStore};
pub use memory_store::InMemoryKeyValueStore;
pub use traits::KeyValueStorage;
