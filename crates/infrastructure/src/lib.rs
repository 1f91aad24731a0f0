//! synth-dns Infrastructure Layer
//!
//! Adapters behind the application ports: the in-memory answer cache, the
//! DNS wire codec built on hickory-proto, and the per-message query server.

pub mod dns;

pub use dns::cache::AnswerCache;
pub use dns::server::QueryServer;
