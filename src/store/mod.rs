//! Feed store - the canonical in-memory post collection.
//!
//! Mutations apply immediately (optimistically) and are then persisted to a
//! [`PersistentCache`](crate::PersistentCache). Persistence stays suppressed until
//! the one-time hydration has merged the cached collection over the seed, so
//! defaults never overwrite a cache that has not been read yet.
//!
//! ## Example
//!
//! ```ignore
//! use feed_sync::{FeedStore, InMemoryCache, Post};
//!
//! let store = FeedStore::new(InMemoryCache::new(), vec![Post::new(1, "Alice", "hi")]);
//! store.hydrate().await?;
//!
//! store.toggle_like(1).await?;
//! store.add_comment(1, "welcome!").await?;
//! let post = store.create_post("Bob", "first!", None).await?;
//!
//! assert_eq!(store.snapshot()?[0].id, post.id);
//! ```

mod event;
mod feed_store;
mod id;
mod merge;

pub use event::{FeedEvent, FEED_EVENT};
pub use feed_store::FeedStore;
pub use id::IdGenerator;
pub use merge::merge_hydrated;
