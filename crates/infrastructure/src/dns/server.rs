//! Protocol-independent query handling.
//!
//! The listeners in the binary crate own the sockets; this adapter takes
//! raw request bytes and returns raw response bytes, so UDP and TCP share
//! one code path apart from the stream length prefix.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{debug, info};

use synth_dns_application::AnswerQueryUseCase;

use super::wire;

pub struct QueryServer {
    use_case: Arc<AnswerQueryUseCase>,
}

impl QueryServer {
    pub fn new(use_case: Arc<AnswerQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// Answer one UDP datagram. `None` means nothing can be sent back,
    /// not even the fallback SERVFAIL.
    pub fn handle_datagram(&self, bytes: &[u8], peer: SocketAddr) -> Option<Vec<u8>> {
        self.respond(bytes, "udp", peer)
    }

    /// Answer one length-prefixed TCP message. The reply carries its own
    /// length prefix, ready to write back on the stream.
    pub fn handle_stream(&self, bytes: &[u8], peer: SocketAddr) -> Option<Vec<u8>> {
        let payload = match wire::stream_decode(bytes) {
            Some(payload) => payload,
            None => {
                debug!(%peer, "Dropping truncated TCP message");
                return None;
            }
        };
        let response = self.respond(payload, "tcp", peer)?;
        Some(wire::stream_encode(&response))
    }

    fn respond(&self, bytes: &[u8], protocol: &'static str, peer: SocketAddr) -> Option<Vec<u8>> {
        let Some(query) = wire::decode_query(bytes) else {
            debug!(%peer, protocol, "No well-formed question in query");
            return wire::servfail_fallback(bytes);
        };

        let response = self.use_case.execute(&query.question);

        info!(
            protocol,
            name = %query.question.name,
            record_type = %query.question.record_type,
            rcode = %response.rcode,
            answers = response.answers.len(),
            %peer,
            "Answered query"
        );

        wire::encode_response(&query, &response)
    }
}
