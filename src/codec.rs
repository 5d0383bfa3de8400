//! JSON encoding of a post collection, as stored under the feed's cache key.

use crate::post::Post;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("failed to encode post collection: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode post collection: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Encode an ordered collection as a JSON array of post records.
pub fn encode(posts: &[Post]) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(posts).map_err(CodecError::Encode)
}

/// Decode a JSON array of post records, preserving order.
pub fn decode(bytes: &[u8]) -> Result<Vec<Post>, CodecError> {
    serde_json::from_slice(bytes).map_err(CodecError::Decode)
}
