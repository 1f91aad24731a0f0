pub mod dns;

pub use dns::start_listeners;
