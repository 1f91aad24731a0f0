use serde::{Deserialize, Serialize};

use super::prefixes::PrefixConfig;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// TTL stamped on synthesized answers and used for cache expiry.
    #[serde(default = "default_ttl")]
    pub default_ttl: u32,

    /// Entry count at which the whole answer cache is flushed.
    #[serde(default = "default_max_cache_entries")]
    pub max_cache_entries: usize,

    /// Targets answered for delegation queries at a zone apex.
    #[serde(default)]
    pub ns_records: Vec<String>,

    /// Ordered: the first prefix containing an address (or matching a
    /// name) wins, so narrower subnets belong before wider ones.
    #[serde(default)]
    pub prefixes: Vec<PrefixConfig>,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            default_ttl: default_ttl(),
            max_cache_entries: default_max_cache_entries(),
            ns_records: vec![],
            prefixes: vec![],
        }
    }
}

fn default_ttl() -> u32 {
    3600
}

fn default_max_cache_entries() -> usize {
    10_000
}
