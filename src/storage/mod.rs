//! Key-value backends for the report store: encrypted SQLite for real use, memory for tests.

mod encrypted;
mod memory;

pub use encrypted::SecureStore;
pub use memory::MemoryStore;

use crate::error::{Error, Result};

/// String key-value storage in the shape of the browser's local storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

fn check_quota(quota: Option<usize>, needed: usize) -> Result<()> {
    match quota {
        Some(quota) if needed > quota => Err(Error::QuotaExceeded { needed, quota }),
        _ => Ok(()),
    }
}
