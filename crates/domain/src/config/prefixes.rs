use serde::{Deserialize, Serialize};

/// One delegated subnet as written in the config file. Parsed into a
/// `prefix::Prefix` at startup; kept stringly here so the file layer stays
/// a plain serde mirror of the TOML.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PrefixConfig {
    pub cidr: String,

    /// Hostname pattern with exactly one `{addr}` placeholder.
    pub label_template: String,

    #[serde(default)]
    pub static_records: Vec<StaticRecordConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StaticRecordConfig {
    pub address: String,
    pub record: String,
}
