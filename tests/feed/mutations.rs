use std::collections::HashSet;

use feed_sync::{FeedStore, IdGenerator, InMemoryCache, Media};

use crate::support::{init_tracing, persisted, seed, FlakyCache};

#[tokio::test]
async fn rapid_creation_in_one_clock_tick_yields_distinct_ids() {
    init_tracing();
    let store = FeedStore::new(InMemoryCache::new(), seed())
        .with_id_generator(IdGenerator::with_clock(|| 1_700_000_000_000));
    store.hydrate().await.unwrap();

    let mut created = Vec::new();
    for n in 0..5 {
        let post = store
            .create_post("Jack", format!("post {}", n), None)
            .await
            .unwrap();
        created.push(post.id);
    }

    let ids: HashSet<_> = created.iter().collect();
    assert_eq!(ids.len(), 5);

    let snapshot = store.snapshot().unwrap();
    let mut expected: Vec<_> = created.iter().rev().copied().collect();
    expected.extend(seed().iter().map(|p| p.id));
    assert_eq!(snapshot.iter().map(|p| p.id).collect::<Vec<_>>(), expected);
    assert_eq!(snapshot[0].body, "post 4");
}

#[tokio::test]
async fn write_failure_keeps_memory_and_later_write_reconciles() {
    init_tracing();
    let cache = FlakyCache::default();
    let store = FeedStore::new(cache.clone(), seed());
    store.hydrate().await.unwrap();
    assert_eq!(cache.writes(), 1);

    cache.fail_writes(true);
    assert!(store.toggle_like(2).await.unwrap());
    assert!(store.add_comment(2, "lost write?").await.unwrap());
    assert_eq!(cache.writes(), 1);

    let bob = store.get(2).unwrap().unwrap();
    assert!(bob.liked);
    assert_eq!(bob.comments, vec!["lost write?"]);
    assert_eq!(persisted(&cache.inner).await.unwrap(), seed());

    cache.fail_writes(false);
    assert!(store.persist().await);
    assert_eq!(
        persisted(&cache.inner).await.unwrap(),
        store.snapshot().unwrap()
    );
}

#[tokio::test]
async fn unknown_targets_do_not_touch_the_cache() {
    let cache = FlakyCache::default();
    let store = FeedStore::new(cache.clone(), seed());
    store.hydrate().await.unwrap();
    let before = store.snapshot().unwrap();
    let writes = cache.writes();

    assert!(!store.toggle_like(9_999_999).await.unwrap());
    assert!(!store.add_comment(9_999_999, "x").await.unwrap());
    assert!(!store.add_comment(1, "  ").await.unwrap());

    assert_eq!(store.snapshot().unwrap(), before);
    assert_eq!(cache.writes(), writes);
}

#[tokio::test]
async fn every_applied_mutation_is_persisted() {
    let cache = InMemoryCache::new();
    let store = FeedStore::new(cache.clone(), seed());
    store.hydrate().await.unwrap();

    store.toggle_like(3).await.unwrap();
    assert_eq!(persisted(&cache).await.unwrap(), store.snapshot().unwrap());

    store.add_comment(3, "and another").await.unwrap();
    assert_eq!(persisted(&cache).await.unwrap(), store.snapshot().unwrap());

    store
        .create_post(
            "Henry",
            "with a doc",
            Some(Media::document("file:///book.pdf", Some("Book".into()))),
        )
        .await
        .unwrap();
    assert_eq!(persisted(&cache).await.unwrap(), store.snapshot().unwrap());
}

#[tokio::test]
async fn unhydrated_store_mutates_in_memory_only() {
    let cache = InMemoryCache::new();
    let store = FeedStore::new(cache.clone(), seed());

    store.create_post("Eve", "early", None).await.unwrap();
    assert_eq!(store.len().unwrap(), seed().len() + 1);
    assert!(persisted(&cache).await.is_none());
}

#[cfg(feature = "emitter")]
#[tokio::test]
async fn subscribers_are_told_about_creation() {
    use feed_sync::FeedEvent;
    use std::sync::{mpsc, Mutex};
    use std::time::Duration;

    let store = FeedStore::new(InMemoryCache::new(), seed());
    store.hydrate().await.unwrap();

    let (tx, rx) = mpsc::channel();
    let tx = Mutex::new(tx);
    store
        .subscribe(move |event: FeedEvent| {
            let _ = tx.lock().unwrap().send(event);
        })
        .unwrap();

    let post = store.create_post("Kate", "news", None).await.unwrap();
    let event = rx.recv_timeout(Duration::from_secs(2)).unwrap();
    assert_eq!(event, FeedEvent::PostCreated { post_id: post.id });
    assert_eq!(event.post_id(), Some(post.id));
}
