use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::post::PostId;

type Clock = Box<dyn Fn() -> i64 + Send + Sync>;

/// Allocates post ids from the wall clock (milliseconds since the epoch).
///
/// Ids are strictly increasing per generator: a call landing in the same tick
/// as the previous one gets `previous + 1`, and any id the caller reports as
/// taken is skipped.
pub struct IdGenerator {
    clock: Clock,
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::with_clock(|| chrono::Utc::now().timestamp_millis())
    }

    /// Use a custom tick source.
    pub fn with_clock<F>(clock: F) -> Self
    where
        F: Fn() -> i64 + Send + Sync + 'static,
    {
        Self {
            clock: Box::new(clock),
            last: AtomicI64::new(i64::MIN),
        }
    }

    /// Next id that is greater than every id this generator has issued and
    /// for which `is_taken` returns false.
    pub fn next_id(&self, is_taken: impl Fn(PostId) -> bool) -> PostId {
        let now = (self.clock)();
        let mut last = self.last.load(Ordering::Acquire);
        loop {
            let mut candidate = if last == i64::MIN { now } else { now.max(last + 1) };
            while is_taken(candidate) {
                candidate += 1;
            }
            match self
                .last
                .compare_exchange_weak(last, candidate, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return candidate,
                Err(actual) => last = actual,
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdGenerator")
            .field("last", &self.last.load(Ordering::Relaxed))
            .finish()
    }
}
