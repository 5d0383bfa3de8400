use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use super::{AttachmentUploader, MediaHandle, ProgressReporter, RemoteReference, UploadError};

/// Race `upload` against `limit`. On expiry the upload future is dropped, so a
/// response that lands later is discarded.
pub async fn with_timeout<F>(limit: Duration, upload: F) -> Result<RemoteReference, UploadError>
where
    F: Future<Output = Result<RemoteReference, UploadError>>,
{
    match tokio::time::timeout(limit, upload).await {
        Ok(result) => result,
        Err(_) => {
            warn!(?limit, "upload timed out");
            Err(UploadError::Timeout(limit))
        }
    }
}

/// Bounds any uploader with a fixed timeout.
#[derive(Clone, Debug)]
pub struct Timed<U> {
    inner: U,
    limit: Duration,
}

impl<U> Timed<U> {
    pub fn new(inner: U, limit: Duration) -> Self {
        Self { inner, limit }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    pub fn into_inner(self) -> U {
        self.inner
    }
}

#[async_trait]
impl<U: AttachmentUploader> AttachmentUploader for Timed<U> {
    async fn upload(
        &self,
        handle: &MediaHandle,
        progress: Option<&ProgressReporter>,
    ) -> Result<RemoteReference, UploadError> {
        with_timeout(self.limit, self.inner.upload(handle, progress)).await
    }
}
