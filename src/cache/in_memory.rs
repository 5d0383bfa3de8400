use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::{CacheError, PersistentCache};

/// In-memory cache backed by `Arc<RwLock<HashMap>>`.
///
/// Clone-friendly (cloning shares the same underlying storage), so a test can
/// keep a handle and inspect what the store persisted.
#[derive(Clone, Default)]
pub struct InMemoryCache {
    storage: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key, as if an earlier session had written it.
    pub fn with_entry(self, key: impl Into<String>, blob: impl Into<Vec<u8>>) -> Self {
        if let Ok(mut storage) = self.storage.write() {
            storage.insert(key.into(), blob.into());
        }
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.storage
            .read()
            .map(|storage| storage.contains_key(key))
            .unwrap_or(false)
    }
}

#[async_trait]
impl PersistentCache for InMemoryCache {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| CacheError::read(key, "lock poisoned"))?;
        Ok(storage.get(key).cloned())
    }

    async fn write(&self, key: &str, blob: Vec<u8>) -> Result<(), CacheError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| CacheError::write(key, "lock poisoned"))?;
        storage.insert(key.to_string(), blob);
        Ok(())
    }
}
