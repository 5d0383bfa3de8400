use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::UploaderConfig;

use super::timeout::with_timeout;
use super::{AttachmentUploader, MediaHandle, ProgressReporter, RemoteReference, UploadError};

const DEFAULT_MIME: &str = "application/octet-stream";

/// Success body of the upload endpoint. Some hosts nest the link under `data`.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    link: Option<String>,
    data: Option<UploadResponseData>,
}

#[derive(Debug, Deserialize)]
struct UploadResponseData {
    link: Option<String>,
}

impl UploadResponse {
    fn into_link(self) -> Option<String> {
        self.link
            .or_else(|| self.data.and_then(|data| data.link))
            .filter(|link| !link.trim().is_empty())
    }
}

/// `multipart/form-data` POST of the attachment to a configured endpoint,
/// bounded by the configured timeout.
#[derive(Clone, Debug)]
pub struct HttpUploader {
    client: reqwest::Client,
    config: UploaderConfig,
}

impl HttpUploader {
    pub fn new(config: UploaderConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: UploaderConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &UploaderConfig {
        &self.config
    }

    async fn send(
        &self,
        handle: &MediaHandle,
        progress: Option<&ProgressReporter>,
    ) -> Result<RemoteReference, UploadError> {
        let bytes = read_local(&handle.uri).await?;
        if let Some(progress) = progress {
            progress.report(0);
        }

        let mime = if handle.mime.trim().is_empty() {
            DEFAULT_MIME
        } else {
            handle.mime.as_str()
        };
        let part = Part::bytes(bytes)
            .file_name(handle.file_name())
            .mime_str(mime)
            .map_err(|e| UploadError::Network(e.to_string()))?;
        let form = Form::new().part(self.config.field_name.clone(), part);

        let response = self
            .client
            .post(&self.config.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), endpoint = %self.config.endpoint, "upload rejected");
            return Err(UploadError::Rejected {
                status: status.as_u16(),
            });
        }

        let body: UploadResponse = response.json().await.map_err(|e| {
            debug!(error = %e, "upload response is not the expected JSON");
            UploadError::MissingLink
        })?;
        let link = body.into_link().ok_or(UploadError::MissingLink)?;

        if let Some(progress) = progress {
            progress.report(100);
        }
        debug!(uri = %handle.uri, %link, "upload finished");

        Ok(RemoteReference {
            url: link,
            kind: handle.kind(),
            display_name: handle.name.clone(),
        })
    }
}

#[async_trait]
impl AttachmentUploader for HttpUploader {
    async fn upload(
        &self,
        handle: &MediaHandle,
        progress: Option<&ProgressReporter>,
    ) -> Result<RemoteReference, UploadError> {
        with_timeout(self.config.timeout(), self.send(handle, progress)).await
    }
}

async fn read_local(uri: &str) -> Result<Vec<u8>, UploadError> {
    let path = uri.strip_prefix("file://").unwrap_or(uri);
    tokio::fs::read(path).await.map_err(|e| UploadError::Io {
        uri: uri.to_string(),
        message: e.to_string(),
    })
}
