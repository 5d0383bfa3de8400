use async_trait::async_trait;
use tracing::debug;

use crate::config::SimulatedUploaderConfig;

use super::{AttachmentUploader, MediaHandle, ProgressReporter, RemoteReference, UploadError};

/// What a [`SimulatedUploader`] does once its progress steps run out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimulatedOutcome {
    /// Succeed with the handle's own URI (the local dummy uploader).
    Echo,
    /// Succeed with `{base_url}/{file_name}`.
    Succeed { base_url: String },
    /// Fail with the given error after reaching `at_percent`.
    Fail { error: UploadError, at_percent: u8 },
    /// Report 0% and never finish.
    Hang,
}

/// Uploader that walks through a deterministic progress sequence on the tokio
/// clock. Pair with `tokio::time::pause` for instant, reproducible runs.
#[derive(Clone, Debug)]
pub struct SimulatedUploader {
    config: SimulatedUploaderConfig,
    outcome: SimulatedOutcome,
}

impl SimulatedUploader {
    pub fn new(outcome: SimulatedOutcome) -> Self {
        Self {
            config: SimulatedUploaderConfig::default(),
            outcome,
        }
    }

    pub fn echo() -> Self {
        Self::new(SimulatedOutcome::Echo)
    }

    pub fn hanging() -> Self {
        Self::new(SimulatedOutcome::Hang)
    }

    pub fn failing(error: UploadError) -> Self {
        Self::new(SimulatedOutcome::Fail {
            error,
            at_percent: 0,
        })
    }

    pub fn with_config(mut self, config: SimulatedUploaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Percentages this uploader reports on a full run: 0, step, 2*step, ..., 100.
    pub fn steps(&self) -> Vec<u8> {
        let step = self.config.step.clamp(1, 100);
        let mut steps: Vec<u8> = (0..100u8).step_by(step as usize).collect();
        steps.push(100);
        steps
    }

    async fn walk(&self, stop_at: u8, progress: Option<&ProgressReporter>) {
        for percent in self.steps() {
            if percent > stop_at {
                break;
            }
            if percent > 0 {
                tokio::time::sleep(self.config.step_delay()).await;
            }
            if let Some(progress) = progress {
                progress.report(percent);
            }
        }
    }
}

#[async_trait]
impl AttachmentUploader for SimulatedUploader {
    async fn upload(
        &self,
        handle: &MediaHandle,
        progress: Option<&ProgressReporter>,
    ) -> Result<RemoteReference, UploadError> {
        debug!(uri = %handle.uri, outcome = ?self.outcome, "simulated upload started");
        match &self.outcome {
            SimulatedOutcome::Echo => {
                self.walk(100, progress).await;
                Ok(handle.fallback_reference())
            }
            SimulatedOutcome::Succeed { base_url } => {
                self.walk(100, progress).await;
                Ok(RemoteReference {
                    url: format!("{}/{}", base_url.trim_end_matches('/'), handle.file_name()),
                    kind: handle.kind(),
                    display_name: handle.name.clone(),
                })
            }
            SimulatedOutcome::Fail { error, at_percent } => {
                self.walk(*at_percent, progress).await;
                Err(error.clone())
            }
            SimulatedOutcome::Hang => {
                self.walk(0, progress).await;
                std::future::pending().await
            }
        }
    }
}
