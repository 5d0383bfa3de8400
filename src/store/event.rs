use serde::{Deserialize, Serialize};

use crate::post::PostId;

/// Event name listeners are registered under.
pub const FEED_EVENT: &str = "feed";

/// Change notification delivered to subscribers after a mutation is applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedEvent {
    Hydrated { count: usize },
    LikeToggled {
        post_id: PostId,
        liked: bool,
        like_count: u32,
    },
    CommentAdded { post_id: PostId, comment: String },
    PostCreated { post_id: PostId },
}

impl FeedEvent {
    /// The post this event concerns, if any.
    pub fn post_id(&self) -> Option<PostId> {
        match self {
            FeedEvent::Hydrated { .. } => None,
            FeedEvent::LikeToggled { post_id, .. }
            | FeedEvent::CommentAdded { post_id, .. }
            | FeedEvent::PostCreated { post_id } => Some(*post_id),
        }
    }
}
