//! Persistent cache - durable key-value storage for serialized blobs.
//!
//! The feed keeps its last known collection under a single key. The store
//! treats every failure here as recoverable: a failed read means "nothing
//! cached", a failed write is logged and retried implicitly by the next persist.
//!
//! ## Example
//!
//! ```ignore
//! use feed_sync::{InMemoryCache, PersistentCache};
//!
//! let cache = InMemoryCache::new();
//! cache.write("feed_posts_v1", b"[]".to_vec()).await?;
//! assert_eq!(cache.read("feed_posts_v1").await?, Some(b"[]".to_vec()));
//! ```

mod file;
mod in_memory;

pub use file::FileCache;
pub use in_memory::InMemoryCache;

use async_trait::async_trait;

/// Error type for cache operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    #[error("cache read failed for {key}: {message}")]
    Read { key: String, message: String },
    #[error("cache write failed for {key}: {message}")]
    Write { key: String, message: String },
}

impl CacheError {
    pub fn read(key: &str, message: impl Into<String>) -> Self {
        CacheError::Read {
            key: key.to_string(),
            message: message.into(),
        }
    }

    pub fn write(key: &str, message: impl Into<String>) -> Self {
        CacheError::Write {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

/// Durable key-value store for serialized blobs.
#[async_trait]
pub trait PersistentCache: Send + Sync {
    /// Load the blob stored under `key`. `Ok(None)` when nothing was ever written.
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store (or overwrite) the blob under `key`.
    async fn write(&self, key: &str, blob: Vec<u8>) -> Result<(), CacheError>;
}

#[async_trait]
impl<C: PersistentCache + ?Sized> PersistentCache for std::sync::Arc<C> {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        (**self).read(key).await
    }

    async fn write(&self, key: &str, blob: Vec<u8>) -> Result<(), CacheError> {
        (**self).write(key, blob).await
    }
}
