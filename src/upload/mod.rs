//! Attachment uploads - turn a local media handle into a durable remote reference.
//!
//! An [`AttachmentUploader`] only signals failure; degrading to the local URI is
//! the composition flow's decision (see [`MediaHandle::fallback_reference`]).
//!
//! ```text
//!   MediaHandle ──► AttachmentUploader::upload ──► RemoteReference
//!                          │                            ▲
//!                          │ ProgressReporter           │ fallback_reference()
//!                          ▼                            │ on UploadError
//!                   ProgressReceiver              PostComposer
//!          Progress(0..=100)* then Completed | Failed
//! ```

#[cfg(feature = "http")]
mod http;
mod progress;
mod simulated;
mod timeout;

#[cfg(feature = "http")]
pub use http::HttpUploader;
pub use progress::{progress_channel, ProgressReceiver, ProgressReporter, UploadProgress};
pub use simulated::{SimulatedOutcome, SimulatedUploader};
pub use timeout::{with_timeout, Timed};

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::post::{Media, MediaKind};

/// A local media source as handed over by a platform picker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaHandle {
    pub uri: String,
    pub mime: String,
    pub name: Option<String>,
}

impl MediaHandle {
    pub fn new(uri: impl Into<String>, mime: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            mime: mime.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn kind(&self) -> MediaKind {
        MediaKind::from_mime(&self.mime)
    }

    /// Display name, or the last path segment of the URI.
    pub fn file_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self
                .uri
                .rsplit('/')
                .find(|segment| !segment.is_empty())
                .unwrap_or("upload")
                .to_string(),
        }
    }

    /// The reference used when an upload fails: the local URI itself.
    pub fn fallback_reference(&self) -> RemoteReference {
        RemoteReference {
            url: self.uri.clone(),
            kind: self.kind(),
            display_name: self.name.clone(),
        }
    }
}

/// Where an attachment ended up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteReference {
    pub url: String,
    pub kind: MediaKind,
    pub display_name: Option<String>,
}

impl RemoteReference {
    pub fn into_media(self) -> Media {
        Media::from_kind(self.kind, self.url, self.display_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("upload timed out after {0:?}")]
    Timeout(Duration),
    #[error("upload network failure: {0}")]
    Network(String),
    #[error("upload rejected with status {status}")]
    Rejected { status: u16 },
    #[error("upload response carried no link")]
    MissingLink,
    #[error("cannot read attachment {uri}: {message}")]
    Io { uri: String, message: String },
}

/// Uploads a local attachment.
#[async_trait]
pub trait AttachmentUploader: Send + Sync {
    /// Upload `handle`, optionally reporting percentages in `[0, 100]`.
    ///
    /// Implementations emit progress only; the terminal `Completed`/`Failed`
    /// event is sent by [`upload_reporting`].
    async fn upload(
        &self,
        handle: &MediaHandle,
        progress: Option<&ProgressReporter>,
    ) -> Result<RemoteReference, UploadError>;
}

#[async_trait]
impl<U: AttachmentUploader + ?Sized> AttachmentUploader for std::sync::Arc<U> {
    async fn upload(
        &self,
        handle: &MediaHandle,
        progress: Option<&ProgressReporter>,
    ) -> Result<RemoteReference, UploadError> {
        (**self).upload(handle, progress).await
    }
}

/// Run an upload and close the progress stream with its outcome.
pub async fn upload_reporting<U: AttachmentUploader + ?Sized>(
    uploader: &U,
    handle: &MediaHandle,
    progress: Option<ProgressReporter>,
) -> Result<RemoteReference, UploadError> {
    let result = uploader.upload(handle, progress.as_ref()).await;
    if let Some(progress) = progress {
        match &result {
            Ok(reference) => progress.complete(reference),
            Err(e) => progress.fail(e),
        }
    }
    result
}
