mod answer_cache_port;

pub use answer_cache_port::AnswerCachePort;
