//! Configuration handed in by the application shell.
//!
//! Every struct derives `Deserialize` with `#[serde(default)]`, so a partial
//! document only overrides the fields it names.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Cache key the feed collection has always been persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "feed_posts_v1";

/// Upload timeout used by the network uploader.
pub const DEFAULT_UPLOAD_TIMEOUT_MS: u64 = 12_000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub storage_key: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

/// Settings for the multipart network uploader.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploaderConfig {
    pub endpoint: String,
    pub timeout_ms: u64,
    /// Form field carrying the file.
    pub field_name: String,
}

impl UploaderConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            timeout_ms: DEFAULT_UPLOAD_TIMEOUT_MS,
            field_name: "file".to_string(),
        }
    }
}

/// Settings for the local simulated uploader.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatedUploaderConfig {
    /// Delay between progress events.
    pub step_delay_ms: u64,
    /// Percentage added per step.
    pub step: u8,
}

impl SimulatedUploaderConfig {
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}

impl Default for SimulatedUploaderConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: 100,
            step: 10,
        }
    }
}
