/// Errors surfaced by [`FeedStore`](crate::FeedStore).
///
/// Cache and codec failures never reach callers; they are logged and the store
/// keeps operating in memory. What remains is lock poisoning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedError {
    #[error("feed lock poisoned during {0}")]
    LockPoisoned(&'static str),
}
