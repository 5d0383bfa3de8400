//! Post composition - validate a draft, upload its attachment, hand the result
//! to the feed over a channel.
//!
//! Upload failure never fails the composition: the attachment degrades to its
//! local URI and the failure rides along in [`ComposeReceipt::fallback`] so the
//! shell can tell the user.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::post::{Media, MAX_BODY_CHARS};
use crate::upload::{upload_reporting, AttachmentUploader, MediaHandle, ProgressReporter, UploadError};

/// What the user typed and picked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub author: String,
    pub body: String,
    pub attachment: Option<MediaHandle>,
}

impl Draft {
    pub fn new(author: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            body: body.into(),
            attachment: None,
        }
    }

    pub fn with_attachment(mut self, handle: MediaHandle) -> Self {
        self.attachment = Some(handle);
        self
    }

    pub fn validate(&self) -> Result<(), ComposeError> {
        if self.body.trim().is_empty() && self.attachment.is_none() {
            return Err(ComposeError::Empty);
        }
        let chars = self.body.chars().count();
        if chars > MAX_BODY_CHARS {
            return Err(ComposeError::BodyTooLong {
                chars,
                max: MAX_BODY_CHARS,
            });
        }
        Ok(())
    }
}

/// A finished composition travelling to the feed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Composition {
    pub author: String,
    pub body: String,
    pub media: Option<Media>,
    pub fallback: Option<UploadError>,
}

/// Returned to the composing screen once the composition is handed off.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposeReceipt {
    pub media: Option<Media>,
    /// Set when the upload failed and the local URI was used instead.
    pub fallback: Option<UploadError>,
}

impl ComposeReceipt {
    pub fn used_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComposeError {
    #[error("nothing to post: no text and no attachment")]
    Empty,
    #[error("post body is {chars} characters, limit is {max}")]
    BodyTooLong { chars: usize, max: usize },
    #[error("feed is no longer receiving posts")]
    FeedClosed,
}

/// The post-composition flow.
pub struct PostComposer<U> {
    uploader: U,
    outbox: mpsc::UnboundedSender<Composition>,
}

impl<U: AttachmentUploader> PostComposer<U> {
    pub fn new(uploader: U, outbox: mpsc::UnboundedSender<Composition>) -> Self {
        Self { uploader, outbox }
    }

    pub fn uploader(&self) -> &U {
        &self.uploader
    }

    /// Validate, upload (with local fallback), and send the composition to the feed.
    pub async fn submit(
        &self,
        draft: Draft,
        progress: Option<ProgressReporter>,
    ) -> Result<ComposeReceipt, ComposeError> {
        draft.validate()?;
        if self.outbox.is_closed() {
            return Err(ComposeError::FeedClosed);
        }

        let (media, fallback) = match &draft.attachment {
            None => (None, None),
            Some(handle) => match upload_reporting(&self.uploader, handle, progress).await {
                Ok(reference) => (Some(reference.into_media()), None),
                Err(e) => {
                    warn!(uri = %handle.uri, error = %e, "attachment upload failed, using local file");
                    (Some(handle.fallback_reference().into_media()), Some(e))
                }
            },
        };

        let receipt = ComposeReceipt {
            media: media.clone(),
            fallback: fallback.clone(),
        };
        self.outbox
            .send(Composition {
                author: draft.author,
                body: draft.body,
                media,
                fallback,
            })
            .map_err(|_| ComposeError::FeedClosed)?;
        debug!(fallback = receipt.used_fallback(), "composition handed to feed");

        Ok(receipt)
    }
}
