//! Dependency wiring: configuration in, a ready query server out.

use std::sync::Arc;

use synth_dns_application::{AnswerCachePort, AnswerQueryUseCase, ServerIdentity};
use synth_dns_domain::{Config, PrefixTable, RecordCodec};
use synth_dns_infrastructure::{AnswerCache, QueryServer};
use tracing::{info, warn};

pub struct Services {
    pub server: QueryServer,
}

impl Services {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let table = Arc::new(PrefixTable::from_config(&config.dns)?);
        if table.is_empty() {
            warn!("No prefixes configured, every AAAA and PTR query will be refused");
        }
        info!(
            prefixes = table.len(),
            ns_records = config.dns.ns_records.len(),
            "Loaded zone configuration"
        );

        let cache: Arc<dyn AnswerCachePort> =
            Arc::new(AnswerCache::new(config.dns.max_cache_entries));

        let host = hostname::get()
            .map(|h| h.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "unknown".to_string());
        let identity = ServerIdentity::new(
            config.server.version.clone(),
            host,
            config.server.id.clone(),
        );

        let use_case = Arc::new(AnswerQueryUseCase::new(
            RecordCodec::new(table),
            cache,
            identity,
            config.dns.ns_records.clone(),
            config.dns.default_ttl,
        ));

        Ok(Self {
            server: QueryServer::new(use_case),
        })
    }
}
