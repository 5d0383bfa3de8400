use std::future::Future;
use std::sync::RwLock;

#[cfg(feature = "emitter")]
use std::sync::Mutex;

#[cfg(feature = "emitter")]
use event_emitter_rs::EventEmitter;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::cache::PersistentCache;
use crate::codec;
use crate::config::FeedConfig;
use crate::error::FeedError;
use crate::post::{Media, Post, PostId};

use super::event::FeedEvent;
#[cfg(feature = "emitter")]
use super::event::FEED_EVENT;
use super::id::IdGenerator;
use super::merge::merge_hydrated;

/// What hydration found in the cache.
enum Cached {
    Posts(Vec<Post>),
    /// Nothing stored, or a blob that no longer decodes.
    Empty,
    /// The read itself failed; the stored blob may still be good.
    Unreadable,
}

/// In-memory authoritative post collection backed by a persistent cache.
///
/// Shared across tasks via `Arc`. The collection lock is never held across an
/// await point; the only suspension points are the cache read in [`hydrate`]
/// and the cache write in [`persist`].
///
/// [`hydrate`]: FeedStore::hydrate
/// [`persist`]: FeedStore::persist
pub struct FeedStore<C> {
    posts: RwLock<Vec<Post>>,
    cache: C,
    config: FeedConfig,
    ids: IdGenerator,
    hydration: OnceCell<()>,
    persist_gate: tokio::sync::Mutex<()>,
    #[cfg(feature = "emitter")]
    emitter: Mutex<EventEmitter>,
}

impl<C: PersistentCache> FeedStore<C> {
    /// Start from `seed`, not yet hydrated.
    pub fn new(cache: C, seed: Vec<Post>) -> Self {
        Self {
            posts: RwLock::new(seed),
            cache,
            config: FeedConfig::default(),
            ids: IdGenerator::new(),
            hydration: OnceCell::new(),
            persist_gate: tokio::sync::Mutex::new(()),
            #[cfg(feature = "emitter")]
            emitter: Mutex::new(EventEmitter::new()),
        }
    }

    pub fn with_config(mut self, config: FeedConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_id_generator(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydration.initialized()
    }

    /// Load the cached collection and merge it over the seed.
    ///
    /// Runs at most once per store; concurrent callers wait on the same
    /// transition and later calls return `Ok(false)`. An undecodable blob counts
    /// as "nothing cached" and is replaced by the merged collection. A failed
    /// read also leaves the seed in place, but nothing is written back until
    /// the next mutation, so a stored feed survives a transient read error.
    pub async fn hydrate(&self) -> Result<bool, FeedError> {
        self.hydrate_from(|| self.load_cached()).await
    }

    /// Hydrate from a collection the caller already read.
    pub async fn hydrate_with(&self, cached: Option<Vec<Post>>) -> Result<bool, FeedError> {
        self.hydrate_from(|| async move {
            match cached {
                Some(posts) => Cached::Posts(posts),
                None => Cached::Empty,
            }
        })
        .await
    }

    async fn hydrate_from<F, Fut>(&self, load: F) -> Result<bool, FeedError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Cached>,
    {
        let mut outcome = None;
        self.hydration
            .get_or_try_init(|| async {
                let cached = load().await;
                let mut posts = self
                    .posts
                    .write()
                    .map_err(|_| FeedError::LockPoisoned("hydrate"))?;
                let seed = std::mem::take(&mut *posts);
                let unreadable = matches!(cached, Cached::Unreadable);
                *posts = match cached {
                    Cached::Posts(cached) => merge_hydrated(cached, seed),
                    Cached::Empty | Cached::Unreadable => seed,
                };
                outcome = Some((posts.len(), unreadable));
                Ok::<(), FeedError>(())
            })
            .await?;

        let Some((count, unreadable)) = outcome else {
            debug!("feed already hydrated, skipping");
            return Ok(false);
        };

        info!(count, "feed hydrated");
        self.notify(FeedEvent::Hydrated { count });
        if unreadable {
            warn!("cache unreadable during hydration, leaving stored feed untouched");
        } else {
            self.persist().await;
        }
        Ok(true)
    }

    async fn load_cached(&self) -> Cached {
        let key = self.config.storage_key.as_str();
        match self.cache.read(key).await {
            Ok(Some(bytes)) => match codec::decode(&bytes) {
                Ok(posts) => Cached::Posts(posts),
                Err(e) => {
                    warn!(key, error = %e, "discarding undecodable cached feed");
                    Cached::Empty
                }
            },
            Ok(None) => {
                debug!(key, "no cached feed");
                Cached::Empty
            }
            Err(e) => {
                warn!(key, error = %e, "feed cache read failed, continuing in memory");
                Cached::Unreadable
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn poison(&self) {
        std::thread::scope(|scope| {
            let _ = scope
                .spawn(|| {
                    let _guard = self.posts.write();
                    panic!("poisoning feed lock");
                })
                .join();
        });
    }

    /// Write the current collection to the cache.
    ///
    /// Suppressed (returns false) before hydration. Write failures are logged
    /// and the in-memory state stays authoritative until a later write lands.
    /// Writes are serialized and each one snapshots the collection only after
    /// acquiring its turn, so the last write carries the newest state.
    pub async fn persist(&self) -> bool {
        if !self.is_hydrated() {
            debug!("persist suppressed until hydration completes");
            return false;
        }

        let _turn = self.persist_gate.lock().await;
        let key = self.config.storage_key.as_str();

        let posts = match self.snapshot() {
            Ok(posts) => posts,
            Err(e) => {
                warn!(key, error = %e, "cannot snapshot feed for persistence");
                return false;
            }
        };
        let blob = match codec::encode(&posts) {
            Ok(blob) => blob,
            Err(e) => {
                warn!(key, error = %e, "cannot encode feed for persistence");
                return false;
            }
        };

        match self.cache.write(key, blob).await {
            Ok(()) => {
                debug!(key, count = posts.len(), "feed persisted");
                true
            }
            Err(e) => {
                warn!(key, error = %e, "feed cache write failed, keeping in-memory state");
                false
            }
        }
    }

    /// Flip `liked` on a post and move its like count with it.
    ///
    /// Returns `Ok(false)` for an unknown id.
    pub async fn toggle_like(&self, post_id: PostId) -> Result<bool, FeedError> {
        let toggled = {
            let mut posts = self
                .posts
                .write()
                .map_err(|_| FeedError::LockPoisoned("toggle_like"))?;
            posts.iter_mut().find(|p| p.id == post_id).map(|post| {
                post.toggle_like();
                (post.liked, post.like_count)
            })
        };

        let Some((liked, like_count)) = toggled else {
            debug!(post_id, "toggle_like on unknown post ignored");
            return Ok(false);
        };

        self.notify(FeedEvent::LikeToggled {
            post_id,
            liked,
            like_count,
        });
        self.persist().await;
        Ok(true)
    }

    /// Append a comment verbatim. Blank text or an unknown id is a no-op.
    pub async fn add_comment(
        &self,
        post_id: PostId,
        text: impl Into<String>,
    ) -> Result<bool, FeedError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Ok(false);
        }

        let appended = {
            let mut posts = self
                .posts
                .write()
                .map_err(|_| FeedError::LockPoisoned("add_comment"))?;
            match posts.iter_mut().find(|p| p.id == post_id) {
                Some(post) => {
                    post.comments.push(text.clone());
                    true
                }
                None => false,
            }
        };

        if !appended {
            debug!(post_id, "add_comment on unknown post ignored");
            return Ok(false);
        }

        self.notify(FeedEvent::CommentAdded {
            post_id,
            comment: text,
        });
        self.persist().await;
        Ok(true)
    }

    /// Create a post with a fresh id and put it at the front of the feed.
    pub async fn create_post(
        &self,
        author: impl Into<String>,
        body: impl Into<String>,
        media: Option<Media>,
    ) -> Result<Post, FeedError> {
        let post = {
            let mut posts = self
                .posts
                .write()
                .map_err(|_| FeedError::LockPoisoned("create_post"))?;
            let id = self.ids.next_id(|id| posts.iter().any(|p| p.id == id));
            let mut post = Post::new(id, author, body);
            post.media = media;
            posts.insert(0, post.clone());
            post
        };

        info!(post_id = post.id, author = %post.author, "post created");
        self.notify(FeedEvent::PostCreated { post_id: post.id });
        self.persist().await;
        Ok(post)
    }

    /// The current ordered collection.
    pub fn snapshot(&self) -> Result<Vec<Post>, FeedError> {
        let posts = self
            .posts
            .read()
            .map_err(|_| FeedError::LockPoisoned("snapshot"))?;
        Ok(posts.clone())
    }

    pub fn get(&self, post_id: PostId) -> Result<Option<Post>, FeedError> {
        let posts = self
            .posts
            .read()
            .map_err(|_| FeedError::LockPoisoned("get"))?;
        Ok(posts.iter().find(|p| p.id == post_id).cloned())
    }

    pub fn len(&self) -> Result<usize, FeedError> {
        let posts = self
            .posts
            .read()
            .map_err(|_| FeedError::LockPoisoned("len"))?;
        Ok(posts.len())
    }

    pub fn is_empty(&self) -> Result<bool, FeedError> {
        Ok(self.len()? == 0)
    }
}

#[cfg(feature = "emitter")]
impl<C> FeedStore<C> {
    /// Register a listener for every applied change. Returns the listener id.
    ///
    /// Listeners run on emitter threads, so delivery order across events is not
    /// guaranteed; re-read [`snapshot`](FeedStore::snapshot) rather than folding events.
    pub fn subscribe<F>(&self, listener: F) -> Result<String, FeedError>
    where
        F: Fn(FeedEvent) + Send + Sync + 'static,
    {
        let mut emitter = self
            .emitter
            .lock()
            .map_err(|_| FeedError::LockPoisoned("subscribe"))?;
        Ok(emitter.on(FEED_EVENT, listener))
    }

    /// Remove a listener. Returns false if the id was unknown.
    pub fn unsubscribe(&self, listener_id: &str) -> Result<bool, FeedError> {
        let mut emitter = self
            .emitter
            .lock()
            .map_err(|_| FeedError::LockPoisoned("unsubscribe"))?;
        Ok(emitter.remove_listener(listener_id).is_some())
    }

    fn notify(&self, event: FeedEvent) {
        match self.emitter.lock() {
            Ok(mut emitter) => {
                emitter.emit(FEED_EVENT, event);
            }
            Err(_) => warn!(?event, "feed emitter lock poisoned, dropping notification"),
        }
    }
}

#[cfg(not(feature = "emitter"))]
impl<C> FeedStore<C> {
    fn notify(&self, _event: FeedEvent) {}
}
