//! Posts - the feed's unit of content.
//!
//! A [`Post`] is mutated in place by identity of its `id`. It serializes to the
//! cache record format through [`PostRecord`], which keeps the field names the
//! persisted collection has always used (`user`, `content`, `likes`, `imageUrl`, ...).
//!
//! ## Example
//!
//! ```
//! use feed_sync::{Media, Post};
//!
//! let post = Post::new(7, "Alice", "Hello tide")
//!     .with_media(Media::image("file:///tmp/cat.png"));
//!
//! assert!(!post.liked);
//! assert_eq!(post.like_count, 0);
//! assert_eq!(post.media.as_ref().map(|m| m.url()), Some("file:///tmp/cat.png"));
//! ```

mod media;
mod record;

pub use media::{Media, MediaKind};
pub use record::PostRecord;

use serde::{Deserialize, Serialize};

/// Identifier of a post. Unique within a collection.
pub type PostId = i64;

/// Maximum body length accepted by the composition flow, in characters.
pub const MAX_BODY_CHARS: usize = 280;

/// A social feed entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PostRecord", into = "PostRecord")]
pub struct Post {
    pub id: PostId,
    /// Display name; also the key into the avatar directory.
    pub author: String,
    pub body: String,
    pub like_count: u32,
    /// Whether the current viewer has liked this post.
    pub liked: bool,
    /// Oldest first.
    pub comments: Vec<String>,
    pub media: Option<Media>,
}

impl Post {
    /// A freshly created post: not liked, no likes, no comments, no media.
    pub fn new(id: PostId, author: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            author: author.into(),
            body: body.into(),
            like_count: 0,
            liked: false,
            comments: Vec::new(),
            media: None,
        }
    }

    pub fn with_media(mut self, media: Media) -> Self {
        self.media = Some(media);
        self
    }

    pub fn with_likes(mut self, like_count: u32) -> Self {
        self.like_count = like_count;
        self
    }

    pub fn with_comments<I, S>(mut self, comments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.comments = comments.into_iter().map(Into::into).collect();
        self
    }

    /// Flip `liked`, moving `like_count` by one in the matching direction.
    ///
    /// Unliking a post whose count is already zero leaves the count at zero.
    pub fn toggle_like(&mut self) {
        if self.liked {
            self.like_count = self.like_count.saturating_sub(1);
        } else {
            self.like_count = self.like_count.saturating_add(1);
        }
        self.liked = !self.liked;
    }
}
