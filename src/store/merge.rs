use std::collections::HashMap;

use crate::post::{Post, PostId};

/// Merge a cached collection over the in-memory seed.
///
/// Cached posts come first, in cache order, and win on id collision. Seed posts
/// whose id the cache never saw follow, in seed order. A cache that repeats an
/// id keeps the first position and the last value.
pub fn merge_hydrated(cached: Vec<Post>, seed: Vec<Post>) -> Vec<Post> {
    let mut merged: Vec<Post> = Vec::with_capacity(cached.len() + seed.len());
    let mut index: HashMap<PostId, usize> = HashMap::with_capacity(merged.capacity());

    for post in cached {
        match index.get(&post.id) {
            Some(&slot) => merged[slot] = post,
            None => {
                index.insert(post.id, merged.len());
                merged.push(post);
            }
        }
    }

    for post in seed {
        if !index.contains_key(&post.id) {
            index.insert(post.id, merged.len());
            merged.push(post);
        }
    }

    merged
}
