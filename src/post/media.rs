use serde::{Deserialize, Serialize};

/// Broad category of an attachment, derived from its MIME type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Document,
}

impl MediaKind {
    /// Classify a MIME type by prefix. Anything that is not `image/*` or
    /// `video/*` (including an empty string) is a document.
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            MediaKind::Image
        } else if mime.starts_with("video/") {
            MediaKind::Video
        } else {
            MediaKind::Document
        }
    }
}

/// The single attachment a post may carry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Media {
    Image { url: String },
    Video { url: String },
    Document { url: String, name: Option<String> },
}

impl Media {
    pub fn image(url: impl Into<String>) -> Self {
        Media::Image { url: url.into() }
    }

    pub fn video(url: impl Into<String>) -> Self {
        Media::Video { url: url.into() }
    }

    pub fn document(url: impl Into<String>, name: Option<String>) -> Self {
        Media::Document {
            url: url.into(),
            name,
        }
    }

    /// Build the variant matching `kind`. `name` is kept for documents only.
    pub fn from_kind(kind: MediaKind, url: impl Into<String>, name: Option<String>) -> Self {
        match kind {
            MediaKind::Image => Media::image(url),
            MediaKind::Video => Media::video(url),
            MediaKind::Document => Media::document(url, name),
        }
    }

    pub fn kind(&self) -> MediaKind {
        match self {
            Media::Image { .. } => MediaKind::Image,
            Media::Video { .. } => MediaKind::Video,
            Media::Document { .. } => MediaKind::Document,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Media::Image { url } | Media::Video { url } | Media::Document { url, .. } => url,
        }
    }

    pub fn display_name(&self) -> Option<&str> {
        match self {
            Media::Document { name, .. } => name.as_deref(),
            _ => None,
        }
    }
}
