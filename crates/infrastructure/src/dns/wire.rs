//! DNS wire codec built on hickory-proto.
//!
//! Parses one question out of a request and serializes the dispatcher's
//! result back into a response message. Stream variants carry the 2-byte
//! big-endian length prefix used by DNS over TCP.

use std::str::FromStr;

use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::{AAAA, NS, PTR, TXT};
use hickory_proto::rr::{DNSClass, Name, RData, Record};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use tracing::{debug, warn};

use synth_dns_domain::{
    Answer, DnsQuestion, DomainError, QueryClass, QueryResponse, Rcode, RecordData, RecordType,
};

const HEADER_SIZE: usize = 12;
const FLAG_QR: u16 = 0x8000;

/// One parsed request: the header id, the question in matching form, and
/// the original question section for echoing into the reply.
pub struct WireQuery {
    pub id: u16,
    pub question: DnsQuestion,
    query: Query,
}

/// Extract the first question from a request message. `None` when the
/// bytes do not parse or carry no question section.
pub fn decode_query(bytes: &[u8]) -> Option<WireQuery> {
    let message = match Message::from_vec(bytes) {
        Ok(message) => message,
        Err(e) => {
            debug!(error = %e, "Failed to parse query message");
            return None;
        }
    };

    let query = message.queries().first()?.clone();
    let question = DnsQuestion::new(
        query.name().to_utf8(),
        RecordType::from_u16(u16::from(query.query_type())),
        QueryClass::from_u16(u16::from(query.query_class())),
    );

    Some(WireQuery {
        id: message.id(),
        question,
        query,
    })
}

/// Serialize a response. Success packs RD and AA next to RCODE 0; errors
/// carry the bare RCODE. A failed serialization is retried once with the
/// question section cleared, then given up on.
pub fn encode_response(query: &WireQuery, response: &QueryResponse) -> Option<Vec<u8>> {
    match serialize(&build_message(query, response, true)) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            warn!(id = query.id, error = %e, "Failed to encode response, retrying without question");
            match serialize(&build_message(query, response, false)) {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    warn!(id = query.id, error = %e, "Failed to encode response, dropping it");
                    None
                }
            }
        }
    }
}

/// Minimal SERVFAIL built straight from the raw request bytes, for
/// requests whose question could not be extracted. Needs only the two id
/// bytes; anything shorter is dropped.
pub fn servfail_fallback(query: &[u8]) -> Option<Vec<u8>> {
    if query.len() < 2 {
        return None;
    }

    let mut response = vec![0u8; HEADER_SIZE];
    response[0] = query[0];
    response[1] = query[1];
    let flags = FLAG_QR | Rcode::ServFail.to_u16();
    response[2..4].copy_from_slice(&flags.to_be_bytes());
    Some(response)
}

/// Add the TCP length prefix.
pub fn stream_encode(bytes: &[u8]) -> Vec<u8> {
    let mut framed = Vec::with_capacity(bytes.len() + 2);
    framed.extend_from_slice(&(bytes.len() as u16).to_be_bytes());
    framed.extend_from_slice(bytes);
    framed
}

/// Strip the TCP length prefix. `None` when the frame is shorter than its
/// declared length.
pub fn stream_decode(bytes: &[u8]) -> Option<&[u8]> {
    if bytes.len() < 2 {
        return None;
    }
    let len = u16::from_be_bytes([bytes[0], bytes[1]]) as usize;
    bytes.get(2..2 + len)
}

fn build_message(query: &WireQuery, response: &QueryResponse, with_question: bool) -> Message {
    let mut message = Message::new(query.id, MessageType::Response, OpCode::Query);

    if response.authoritative {
        message.set_authoritative(true);
        message.set_recursion_desired(true);
    }
    message.set_response_code(to_response_code(response.rcode));

    if with_question {
        message.add_query(query.query.clone());
    }

    for answer in &response.answers {
        match to_record(answer) {
            Some(record) => {
                message.add_answer(record);
            }
            None => warn!(name = %answer.name, "Skipping answer with unencodable name"),
        }
    }

    message
}

fn serialize(message: &Message) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);
    message
        .emit(&mut encoder)
        .map_err(|e| DomainError::MessageEncoding(e.to_string()))?;
    Ok(buf)
}

fn to_record(answer: &Answer) -> Option<Record> {
    let name = fqdn(&answer.name)?;

    let rdata = match &answer.data {
        RecordData::Aaaa(address) => RData::AAAA(AAAA(*address)),
        RecordData::Ptr(target) => RData::PTR(PTR(fqdn(target)?)),
        RecordData::Ns(target) => RData::NS(NS(fqdn(target)?)),
        RecordData::Txt(text) => RData::TXT(TXT::new(vec![text.clone()])),
    };

    let mut record = Record::from_rdata(name, answer.ttl, rdata);
    if answer.class == QueryClass::Ch {
        record.set_dns_class(DNSClass::CH);
    }
    Some(record)
}

fn fqdn(name: &str) -> Option<Name> {
    if name.ends_with('.') {
        Name::from_str(name).ok()
    } else {
        Name::from_str(&format!("{}.", name)).ok()
    }
}

fn to_response_code(rcode: Rcode) -> ResponseCode {
    match rcode {
        Rcode::NoError => ResponseCode::NoError,
        Rcode::ServFail => ResponseCode::ServFail,
        Rcode::NxDomain => ResponseCode::NXDomain,
        Rcode::NotImp => ResponseCode::NotImp,
        Rcode::Refused => ResponseCode::Refused,
    }
}
