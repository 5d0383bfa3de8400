use std::collections::HashSet;
use std::sync::Arc;

use feed_sync::{
    default_posts, encode, FeedStore, FileCache, InMemoryCache, Media, Post, DEFAULT_STORAGE_KEY,
};

use crate::support::{init_tracing, persisted, seed, FlakyCache};

#[tokio::test]
async fn cached_values_win_and_seed_fills_the_gaps() {
    init_tracing();
    let mut cached_bob = Post::new(2, "Bob", "edited while offline").with_likes(40);
    cached_bob.liked = true;
    let cached = vec![
        Post::new(10, "Zoe", "only in cache").with_media(Media::video("file:///z.mp4")),
        cached_bob.clone(),
    ];
    let cache = InMemoryCache::new().with_entry(DEFAULT_STORAGE_KEY, encode(&cached).unwrap());

    let store = FeedStore::new(cache.clone(), seed());
    assert!(store.hydrate().await.unwrap());

    let posts = store.snapshot().unwrap();
    let ids: Vec<_> = posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![10, 2, 1, 3]);
    assert_eq!(posts[1], cached_bob);
    assert_eq!(posts[2], seed()[0]);
    assert_eq!(posts[3], seed()[2]);

    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());

    assert_eq!(persisted(&cache).await.unwrap(), posts);
}

#[tokio::test]
async fn undecodable_cache_is_treated_as_absent() {
    init_tracing();
    let cache = InMemoryCache::new().with_entry(DEFAULT_STORAGE_KEY, b"{definitely not a feed".to_vec());
    let store = FeedStore::new(cache.clone(), seed());

    assert!(store.hydrate().await.unwrap());
    assert!(store.is_hydrated());
    assert_eq!(store.snapshot().unwrap(), seed());
    assert_eq!(persisted(&cache).await.unwrap(), seed());
}

#[tokio::test]
async fn failed_read_leaves_the_stored_feed_intact() {
    init_tracing();
    let stored = vec![Post::new(500, "Alice", "my real post").with_likes(3)];
    let cache = FlakyCache::new(
        InMemoryCache::new().with_entry(DEFAULT_STORAGE_KEY, encode(&stored).unwrap()),
    );
    cache.fail_reads(true);
    let store = FeedStore::new(cache.clone(), seed());

    assert!(store.hydrate().await.unwrap());
    assert!(store.is_hydrated());
    assert_eq!(store.snapshot().unwrap(), seed());
    assert_eq!(cache.writes(), 0);
    assert_eq!(persisted(&cache.inner).await.unwrap(), stored);

    cache.fail_reads(false);
    let second = FeedStore::new(cache.clone(), seed());
    second.hydrate().await.unwrap();
    assert_eq!(second.get(500).unwrap().unwrap(), stored[0]);
}

#[tokio::test]
async fn store_stays_usable_after_a_failed_read() {
    let cache = FlakyCache::default();
    cache.fail_reads(true);
    let store = FeedStore::new(cache.clone(), seed());
    store.hydrate().await.unwrap();

    assert!(store.toggle_like(1).await.unwrap());
    assert!(store.get(1).unwrap().unwrap().liked);
    assert_eq!(cache.writes(), 1);
    assert_eq!(
        persisted(&cache.inner).await.unwrap(),
        store.snapshot().unwrap()
    );
}

#[tokio::test]
async fn concurrent_hydration_runs_once() {
    let cached = vec![Post::new(99, "Kate", "cached")];
    let cache = FlakyCache::new(
        InMemoryCache::new().with_entry(DEFAULT_STORAGE_KEY, encode(&cached).unwrap()),
    );
    let store = Arc::new(FeedStore::new(cache.clone(), seed()));

    let (a, b, c) = tokio::join!(store.hydrate(), store.hydrate(), store.hydrate());
    let performed = [a.unwrap(), b.unwrap(), c.unwrap()];
    assert_eq!(performed.iter().filter(|ran| **ran).count(), 1);

    assert_eq!(store.len().unwrap(), 4);
    assert_eq!(cache.writes(), 1);
}

#[tokio::test]
async fn a_new_session_sees_the_previous_sessions_changes() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();

    let first = FeedStore::new(FileCache::new(dir.path()), default_posts());
    first.hydrate().await.unwrap();
    first.toggle_like(7).await.unwrap();
    first.add_comment(7, "from session one").await.unwrap();
    let created = first.create_post("Ivy", "hello again", None).await.unwrap();

    let second = FeedStore::new(FileCache::new(dir.path()), default_posts());
    second.hydrate().await.unwrap();

    let posts = second.snapshot().unwrap();
    assert_eq!(posts.len(), default_posts().len() + 1);
    assert_eq!(posts[0], created);

    let grace = second.get(7).unwrap().unwrap();
    assert!(grace.liked);
    assert_eq!(grace.like_count, 8);
    assert_eq!(grace.comments.last().map(String::as_str), Some("from session one"));
}
