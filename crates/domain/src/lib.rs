//! synth-dns Domain Layer
pub mod answer;
pub mod codec;
pub mod config;
pub mod errors;
pub mod ipv6_text;
pub mod prefix;
pub mod query;

pub use answer::{Answer, QueryResponse, Rcode, RecordData};
pub use codec::RecordCodec;
pub use config::{CliOverrides, Config, DnsConfig};
pub use errors::DomainError;
pub use prefix::{LabelTemplate, Prefix, PrefixTable, StaticRecord};
pub use query::{DnsQuestion, QueryClass, RecordType};
