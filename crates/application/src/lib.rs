//! synth-dns Application Layer
//!
//! Use cases and the ports they depend on. This crate orchestrates the
//! domain logic per query; adapters live in the infrastructure crate.

pub mod ports;
pub mod server_identity;
pub mod use_cases;

pub use ports::AnswerCachePort;
pub use server_identity::ServerIdentity;
pub use use_cases::AnswerQueryUseCase;
