//! Feed controller - the boundary the UI layer calls into.
//!
//! Wraps a shared [`FeedStore`], the avatar directory, and the receiving end of
//! the composition channel. Composers created with [`FeedController::composer`]
//! send finished compositions here; [`FeedController::next_post`] turns them
//! into posts.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::avatar::AvatarDirectory;
use crate::cache::PersistentCache;
use crate::compose::{Composition, PostComposer};
use crate::error::FeedError;
use crate::post::{Media, Post, PostId};
use crate::store::FeedStore;
#[cfg(feature = "emitter")]
use crate::store::FeedEvent;
use crate::upload::AttachmentUploader;

pub struct FeedController<C> {
    store: Arc<FeedStore<C>>,
    avatars: AvatarDirectory,
    outbox: mpsc::UnboundedSender<Composition>,
    inbox: mpsc::UnboundedReceiver<Composition>,
}

impl<C: PersistentCache> FeedController<C> {
    pub fn new(store: Arc<FeedStore<C>>, avatars: AvatarDirectory) -> Self {
        let (outbox, inbox) = mpsc::unbounded_channel();
        Self {
            store,
            avatars,
            outbox,
            inbox,
        }
    }

    pub fn store(&self) -> &Arc<FeedStore<C>> {
        &self.store
    }

    /// Hydrate the store from its cache. Safe to call more than once.
    pub async fn start(&self) -> Result<bool, FeedError> {
        self.store.hydrate().await
    }

    pub async fn toggle_like(&self, post_id: PostId) -> Result<bool, FeedError> {
        self.store.toggle_like(post_id).await
    }

    pub async fn add_comment(
        &self,
        post_id: PostId,
        text: impl Into<String>,
    ) -> Result<bool, FeedError> {
        self.store.add_comment(post_id, text).await
    }

    pub async fn create_post(
        &self,
        author: impl Into<String>,
        body: impl Into<String>,
        media: Option<Media>,
    ) -> Result<Post, FeedError> {
        self.store.create_post(author, body, media).await
    }

    pub fn snapshot(&self) -> Result<Vec<Post>, FeedError> {
        self.store.snapshot()
    }

    #[cfg(feature = "emitter")]
    pub fn subscribe<F>(&self, listener: F) -> Result<String, FeedError>
    where
        F: Fn(FeedEvent) + Send + Sync + 'static,
    {
        self.store.subscribe(listener)
    }

    pub fn avatar_for(&self, author: &str) -> &str {
        self.avatars.resolve(author)
    }

    /// A composer whose finished drafts arrive at this controller.
    pub fn composer<U: AttachmentUploader>(&self, uploader: U) -> PostComposer<U> {
        PostComposer::new(uploader, self.outbox.clone())
    }

    /// Wait for the next composition and publish it to the feed.
    ///
    /// The controller keeps a sender of its own, so this waits indefinitely
    /// when no composer submits.
    pub async fn next_post(&mut self) -> Option<Result<Post, FeedError>> {
        let composition = self.inbox.recv().await?;
        Some(self.publish(composition).await)
    }

    /// Publish every composition already waiting, in arrival order.
    ///
    /// The queue is always drained; each composition gets its own result.
    pub async fn publish_pending(&mut self) -> Vec<Result<Post, FeedError>> {
        let mut results = Vec::new();
        while let Ok(composition) = self.inbox.try_recv() {
            results.push(self.publish(composition).await);
        }
        results
    }

    async fn publish(&self, composition: Composition) -> Result<Post, FeedError> {
        debug!(
            author = %composition.author,
            fallback = composition.fallback.is_some(),
            "publishing composition"
        );
        self.store
            .create_post(composition.author, composition.body, composition.media)
            .await
    }
}
