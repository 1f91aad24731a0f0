use std::sync::Arc;

use tracing::{debug, warn};

use synth_dns_domain::{
    Answer, DnsQuestion, DomainError, QueryClass, QueryResponse, Rcode, RecordCodec, RecordType,
};

use crate::ports::AnswerCachePort;
use crate::server_identity::ServerIdentity;

/// Resolves one question into a response code and answer set.
///
/// Classification order: CHAOS introspection, unsupported types, then the
/// cache, then per-type synthesis. Only non-empty successful answer sets
/// are cached. One instance is shared by every listener task.
pub struct AnswerQueryUseCase {
    codec: RecordCodec,
    cache: Arc<dyn AnswerCachePort>,
    identity: ServerIdentity,
    ns_records: Vec<String>,
    default_ttl: u32,
}

impl AnswerQueryUseCase {
    pub fn new(
        codec: RecordCodec,
        cache: Arc<dyn AnswerCachePort>,
        identity: ServerIdentity,
        ns_records: Vec<String>,
        default_ttl: u32,
    ) -> Self {
        Self {
            codec,
            cache,
            identity,
            ns_records,
            default_ttl,
        }
    }

    pub fn execute(&self, question: &DnsQuestion) -> QueryResponse {
        if question.record_type == RecordType::TXT && question.class == QueryClass::Ch {
            return self.resolve_chaos(&question.name);
        }

        if !question.record_type.is_supported() {
            debug!(
                name = %question.name,
                record_type = %question.record_type,
                "Unsupported record type"
            );
            return QueryResponse::error(Rcode::NotImp);
        }

        if let Some(answers) = self.cache.get(&question.name) {
            debug!(name = %question.name, "Answering from cache");
            return QueryResponse::success(answers);
        }

        let response = match question.record_type {
            RecordType::NS => self.resolve_ns(&question.name),
            RecordType::PTR => self.resolve_ptr(&question.name),
            RecordType::AAAA => self.resolve_aaaa(&question.name),
            RecordType::A => self.resolve_a(&question.name),
            _ => QueryResponse::error(Rcode::NotImp),
        };

        if response.is_success() && !response.answers.is_empty() {
            self.cache
                .put(&question.name, &response.answers, self.default_ttl);
        }

        response
    }

    fn resolve_chaos(&self, name: &str) -> QueryResponse {
        match self.identity.lookup(name) {
            Some(value) => QueryResponse::success(vec![Answer::chaos_txt(name, value)]),
            None => {
                debug!(name = %name, "Unknown identity name");
                QueryResponse::chaos_refused()
            }
        }
    }

    fn resolve_ns(&self, name: &str) -> QueryResponse {
        let table = self.codec.table();
        let delegated =
            table.find_reverse_apex(name).is_some() || table.find_forward_zone(name).is_some();

        if !delegated {
            debug!(name = %name, "NS query for an undelegated zone");
            return QueryResponse::error(Rcode::NxDomain);
        }

        let answers = self
            .ns_records
            .iter()
            .map(|target| Answer::ns(name, self.default_ttl, target))
            .collect();

        QueryResponse::success(answers)
    }

    fn resolve_ptr(&self, name: &str) -> QueryResponse {
        if !name.ends_with("ip6.arpa") {
            debug!(name = %name, "PTR query outside ip6.arpa");
            return QueryResponse::error(Rcode::Refused);
        }

        let labels = name.strip_suffix(".ip6.arpa").unwrap_or("");

        // A reverse name that does not spell out a full address is not an
        // error: the name exists under a delegated tree, it just has no
        // record behind it. Same for addresses outside every prefix.
        let Some(candidate) = RecordCodec::reverse_candidate(labels) else {
            debug!(name = %name, "Reverse name does not form an address");
            return QueryResponse::empty_success();
        };

        match self.codec.encode(&candidate) {
            Some(record) => {
                QueryResponse::success(vec![Answer::ptr(name, self.default_ttl, record)])
            }
            None => {
                debug!(name = %name, address = %candidate, "Address outside configured prefixes");
                QueryResponse::empty_success()
            }
        }
    }

    fn resolve_aaaa(&self, name: &str) -> QueryResponse {
        match self.codec.decode(name) {
            Ok(address) => {
                QueryResponse::success(vec![Answer::aaaa(name, self.default_ttl, address)])
            }
            Err(DomainError::RecordNotOwned(_)) => {
                debug!(name = %name, "Name outside configured templates");
                QueryResponse::error(Rcode::Refused)
            }
            Err(e) => {
                warn!(name = %name, error = %e, "Failed to reconstruct address");
                QueryResponse::error(Rcode::ServFail)
            }
        }
    }

    fn resolve_a(&self, name: &str) -> QueryResponse {
        // Existence check only: a name under a configured template exists
        // but never carries IPv4 data.
        if self.codec.table().owns_name(name) {
            QueryResponse::empty_success()
        } else {
            debug!(name = %name, "Name outside configured templates");
            QueryResponse::error(Rcode::Refused)
        }
    }
}
