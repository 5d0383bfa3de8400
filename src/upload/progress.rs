use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use super::{RemoteReference, UploadError};

/// One event on an upload's progress stream.
///
/// A well-formed stream is zero or more `Progress` values followed by exactly
/// one `Completed` or `Failed`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadProgress {
    Progress(u8),
    Completed(RemoteReference),
    Failed(UploadError),
}

impl UploadProgress {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, UploadProgress::Progress(_))
    }
}

/// Create a connected reporter/receiver pair.
pub fn progress_channel() -> (ProgressReporter, ProgressReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ProgressReporter { tx }, ProgressReceiver { rx })
}

/// Sending half. Events sent after the receiver is gone are dropped.
#[derive(Clone, Debug)]
pub struct ProgressReporter {
    tx: mpsc::UnboundedSender<UploadProgress>,
}

impl ProgressReporter {
    /// Report a percentage, clamped to 100.
    pub fn report(&self, percent: u8) {
        let _ = self.tx.send(UploadProgress::Progress(percent.min(100)));
    }

    pub fn complete(&self, reference: &RemoteReference) {
        let _ = self.tx.send(UploadProgress::Completed(reference.clone()));
    }

    pub fn fail(&self, error: &UploadError) {
        let _ = self.tx.send(UploadProgress::Failed(error.clone()));
    }
}

/// Receiving half.
#[derive(Debug)]
pub struct ProgressReceiver {
    rx: mpsc::UnboundedReceiver<UploadProgress>,
}

impl ProgressReceiver {
    pub async fn recv(&mut self) -> Option<UploadProgress> {
        self.rx.recv().await
    }

    /// Collect events up to and including the terminal one.
    pub async fn until_terminal(mut self) -> Vec<UploadProgress> {
        let mut events = Vec::new();
        while let Some(event) = self.rx.recv().await {
            let done = event.is_terminal();
            events.push(event);
            if done {
                break;
            }
        }
        events
    }

    pub fn into_stream(self) -> UnboundedReceiverStream<UploadProgress> {
        UnboundedReceiverStream::new(self.rx)
    }
}
