mod avatar;
mod cache;
mod codec;
mod compose;
mod config;
mod controller;
mod error;
mod post;
mod seed;
mod store;
mod upload;

pub use avatar::AvatarDirectory;
pub use cache::{CacheError, FileCache, InMemoryCache, PersistentCache};
pub use codec::{decode, encode, CodecError};
pub use compose::{ComposeError, ComposeReceipt, Composition, Draft, PostComposer};
pub use config::{
    FeedConfig, SimulatedUploaderConfig, UploaderConfig, DEFAULT_STORAGE_KEY,
    DEFAULT_UPLOAD_TIMEOUT_MS,
};
pub use controller::FeedController;
pub use error::FeedError;
pub use post::{Media, MediaKind, Post, PostId, PostRecord, MAX_BODY_CHARS};
pub use seed::default_posts;
pub use store::{merge_hydrated, FeedEvent, FeedStore, IdGenerator, FEED_EVENT};
#[cfg(feature = "http")]
pub use upload::HttpUploader;
pub use upload::{
    progress_channel, upload_reporting, with_timeout, AttachmentUploader, MediaHandle,
    ProgressReceiver, ProgressReporter, RemoteReference, SimulatedOutcome, SimulatedUploader,
    Timed, UploadError, UploadProgress,
};

