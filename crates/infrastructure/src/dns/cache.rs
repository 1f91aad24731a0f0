use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::debug;

use synth_dns_application::AnswerCachePort;
use synth_dns_domain::Answer;

struct CacheEntry {
    answers: Vec<Answer>,
    expiry: Instant,
}

/// In-memory answer cache keyed by query name, with whole-cache eviction.
///
/// One map behind one mutex: the flush-then-insert in `put_at` and the
/// expiry-check-then-remove in `get_at` each hold the lock for their whole
/// pass, so they are atomic relative to concurrent listener tasks. Entries
/// leave the map on expiry at the next read, or when an insert finds the
/// map at capacity and clears it outright. No partial eviction.
pub struct AnswerCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    max_entries: usize,
}

impl AnswerCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            max_entries,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Lookup at an explicit instant. Expired entries are removed and
    /// reported as misses; live answers come back with their ttl rewritten
    /// to the seconds remaining, rounded to nearest.
    pub fn get_at(&self, name: &str, now: Instant) -> Option<Vec<Answer>> {
        let mut entries = self.lock();

        let entry = entries.get(name)?;
        if entry.expiry <= now {
            entries.remove(name);
            return None;
        }

        let remaining = entry.expiry.duration_since(now);
        let ttl = ((remaining.as_millis() + 500) / 1000) as u32;

        let mut answers = entry.answers.clone();
        for answer in &mut answers {
            answer.ttl = ttl;
        }
        Some(answers)
    }

    /// Insert at an explicit instant. A full map is flushed before the
    /// insert, so the cache never holds more than `max_entries` entries.
    pub fn put_at(&self, name: &str, answers: &[Answer], ttl_secs: u32, now: Instant) {
        let mut entries = self.lock();

        if entries.len() >= self.max_entries {
            debug!(entries = entries.len(), "Answer cache full, flushing");
            entries.clear();
        }

        entries.insert(
            name.to_string(),
            CacheEntry {
                answers: answers.to_vec(),
                expiry: now + Duration::from_secs(u64::from(ttl_secs)),
            },
        );
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AnswerCachePort for AnswerCache {
    fn get(&self, name: &str) -> Option<Vec<Answer>> {
        self.get_at(name, Instant::now())
    }

    fn put(&self, name: &str, answers: &[Answer], ttl_secs: u32) {
        self.put_at(name, answers, ttl_secs, Instant::now())
    }
}
