//! In-memory key-value store, used in tests and as a scratch backend.

use anyhow::Result;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use super::traits::KeyValueStorage;

/// Map-backed store with switches to simulate a failing backend
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    values: Mutex<BTreeMap<String, Vec<u8>>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    write_count: AtomicUsize,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `get_value` return an error
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `put_value` return an error
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful `put_value` calls so far
    pub fn write_count(&self) -> usize {
        self.write_count.load(Ordering::SeqCst)
    }

    fn values(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Vec<u8>>>> {
        self.values
            .lock()
            .map_err(|_| anyhow::anyhow!("In-memory store lock poisoned"))
    }
}

impl KeyValueStorage for InMemoryKeyValueStore {
    fn get_value(&self, key: &str) -> Result<Option<Vec<u8>>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("Simulated read failure for key '{}'", key));
        }
        Ok(self.values()?.get(key).cloned())
    }

    fn put_value(&self, key: &str, value: &[u8]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("Simulated write failure for key '{}'", key));
        }
        self.values()?.insert(key.to_string(), value.to_vec());
        self.write_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
