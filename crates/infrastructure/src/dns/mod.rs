pub mod cache;
pub mod server;
pub mod wire;

pub use cache::AnswerCache;
pub use server::QueryServer;
