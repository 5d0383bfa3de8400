//! Feed integration tests.
//!
//! - Hydration: cache/seed merge, degraded cache reads, single-flight hydration
//! - Mutations: likes, comments, post creation, persistence under write failure
//! - Composition: drafts flowing through upload, fallback, and the controller

mod hydrate;
mod mutations;
