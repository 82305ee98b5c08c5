use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

pub type EntryId = i64;

/// Clock-derived identifiers that never repeat: a new id is the current
/// time in milliseconds, bumped past the last id handed out when two
/// creations land on the same millisecond.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new(seed: EntryId) -> Self {
        IdGenerator { last: AtomicI64::new(seed) }
    }

    /// Makes sure future ids are greater than `id`.
    pub fn observe(&self, id: EntryId) {
        self.last.fetch_max(id, Ordering::SeqCst);
    }

    pub fn next_id(&self, now: DateTime<Utc>) -> EntryId {
        let candidate = now.timestamp_millis();
        let mut last = self.last.load(Ordering::SeqCst);
        loop {
            let next = candidate.max(last.saturating_add(1));
            match self.last.compare_exchange(last, next, Ordering::SeqCst, Ordering::SeqCst) {
                Ok(_) => return next,
                Err(actual) => last = actual,
            }
        }
    }
}
