use serde::{Deserialize, Serialize};

use super::{Media, Post, PostId};

/// Persisted shape of a [`Post`].
///
/// At most one of the `*_url` fields is populated. A record carrying more than one
/// resolves to the first of image, video, document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub id: PostId,
    pub user: String,
    pub content: String,
    pub likes: u32,
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(default)]
    pub liked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_name: Option<String>,
}

impl From<PostRecord> for Post {
    fn from(record: PostRecord) -> Self {
        let media = match (record.image_url, record.video_url, record.document_url) {
            (Some(url), _, _) => Some(Media::Image { url }),
            (None, Some(url), _) => Some(Media::Video { url }),
            (None, None, Some(url)) => Some(Media::Document {
                url,
                name: record.document_name,
            }),
            (None, None, None) => None,
        };

        Post {
            id: record.id,
            author: record.user,
            body: record.content,
            like_count: record.likes,
            liked: record.liked,
            comments: record.comments,
            media,
        }
    }
}

impl From<Post> for PostRecord {
    fn from(post: Post) -> Self {
        let mut record = PostRecord {
            id: post.id,
            user: post.author,
            content: post.body,
            likes: post.like_count,
            comments: post.comments,
            liked: post.liked,
            image_url: None,
            video_url: None,
            document_url: None,
            document_name: None,
        };

        match post.media {
            Some(Media::Image { url }) => record.image_url = Some(url),
            Some(Media::Video { url }) => record.video_url = Some(url),
            Some(Media::Document { url, name }) => {
                record.document_url = Some(url);
                record.document_name = name;
            }
            None => {}
        }

        record
    }
}
