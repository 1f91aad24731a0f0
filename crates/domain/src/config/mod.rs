mod dns;
mod errors;
mod logging;
mod prefixes;
mod root;
mod server;

pub use dns::DnsConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use prefixes::{PrefixConfig, StaticRecordConfig};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
