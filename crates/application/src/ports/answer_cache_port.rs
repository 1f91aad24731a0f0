use synth_dns_domain::Answer;

/// Port for the synthesized-answer cache.
///
/// Entries are keyed by query name alone and hold a whole answer set.
/// Implementations must make each call atomic relative to concurrent
/// callers, including any eviction done inside `put`.
pub trait AnswerCachePort: Send + Sync {
    /// Answers stored under `name`, with each ttl recomputed to the
    /// seconds remaining. `None` on a miss or when the entry expired.
    fn get(&self, name: &str) -> Option<Vec<Answer>>;

    /// Store `answers` under `name` for `ttl_secs` seconds.
    fn put(&self, name: &str, answers: &[Answer], ttl_secs: u32);
}
