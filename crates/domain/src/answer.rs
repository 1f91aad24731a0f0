use std::fmt;
use std::net::Ipv6Addr;

use super::query::{QueryClass, RecordType};

/// Typed answer payload. The wire adapter turns these into rdata; keeping
/// the address as an `Ipv6Addr` here means the canonical abbreviated text
/// form is always just its `Display` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    Aaaa(Ipv6Addr),
    Ptr(String),
    Ns(String),
    Txt(String),
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::Aaaa(addr) => write!(f, "{}", addr),
            RecordData::Ptr(target) => write!(f, "{}", target),
            RecordData::Ns(target) => write!(f, "{}", target),
            RecordData::Txt(text) => write!(f, "{}", text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub record_type: RecordType,
    pub class: QueryClass,
    pub name: String,
    pub ttl: u32,
    pub data: RecordData,
}

impl Answer {
    pub fn aaaa(name: impl Into<String>, ttl: u32, address: Ipv6Addr) -> Self {
        Self {
            record_type: RecordType::AAAA,
            class: QueryClass::In,
            name: name.into(),
            ttl,
            data: RecordData::Aaaa(address),
        }
    }

    pub fn ptr(name: impl Into<String>, ttl: u32, target: impl Into<String>) -> Self {
        Self {
            record_type: RecordType::PTR,
            class: QueryClass::In,
            name: name.into(),
            ttl,
            data: RecordData::Ptr(target.into()),
        }
    }

    pub fn ns(name: impl Into<String>, ttl: u32, target: impl Into<String>) -> Self {
        Self {
            record_type: RecordType::NS,
            class: QueryClass::In,
            name: name.into(),
            ttl,
            data: RecordData::Ns(target.into()),
        }
    }

    /// CHAOS introspection answers are uncacheable by definition, ttl 0.
    pub fn chaos_txt(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            record_type: RecordType::TXT,
            class: QueryClass::Ch,
            name: name.into(),
            ttl: 0,
            data: RecordData::Txt(text.into()),
        }
    }
}

/// Response codes this server emits, by their wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rcode {
    NoError,
    ServFail,
    NxDomain,
    NotImp,
    Refused,
}

impl Rcode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rcode::NoError => "NOERROR",
            Rcode::ServFail => "SERVFAIL",
            Rcode::NxDomain => "NXDOMAIN",
            Rcode::NotImp => "NOTIMP",
            Rcode::Refused => "REFUSED",
        }
    }

    pub fn to_u16(&self) -> u16 {
        match self {
            Rcode::NoError => 0,
            Rcode::ServFail => 2,
            Rcode::NxDomain => 3,
            Rcode::NotImp => 4,
            Rcode::Refused => 5,
        }
    }
}

impl fmt::Display for Rcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a resolution pass produced, before wire encoding. `authoritative`
/// selects the flag packing: when set, the header carries RD+AA alongside
/// the rcode; when clear, the flags word is the bare rcode. Successes and
/// the CHAOS REFUSED quirk keep the flags, every other error drops them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResponse {
    pub rcode: Rcode,
    pub authoritative: bool,
    pub answers: Vec<Answer>,
}

impl QueryResponse {
    pub fn success(answers: Vec<Answer>) -> Self {
        Self {
            rcode: Rcode::NoError,
            authoritative: true,
            answers,
        }
    }

    pub fn empty_success() -> Self {
        Self::success(Vec::new())
    }

    pub fn error(rcode: Rcode) -> Self {
        Self {
            rcode,
            authoritative: false,
            answers: Vec::new(),
        }
    }

    /// CHAOS-class rejections OR the rcode into already-set RD/AA bits
    /// instead of replacing the flags word. Kept bit-for-bit compatible
    /// with the original wire behavior.
    pub fn chaos_refused() -> Self {
        Self {
            rcode: Rcode::Refused,
            authoritative: true,
            answers: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.rcode == Rcode::NoError
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rcode_wire_values() {
        assert_eq!(Rcode::NoError.to_u16(), 0);
        assert_eq!(Rcode::ServFail.to_u16(), 2);
        assert_eq!(Rcode::NxDomain.to_u16(), 3);
        assert_eq!(Rcode::NotImp.to_u16(), 4);
        assert_eq!(Rcode::Refused.to_u16(), 5);
    }

    #[test]
    fn test_error_response_drops_flags() {
        let resp = QueryResponse::error(Rcode::Refused);
        assert!(!resp.authoritative);
        assert!(resp.answers.is_empty());
    }

    #[test]
    fn test_chaos_refused_keeps_flags() {
        let resp = QueryResponse::chaos_refused();
        assert_eq!(resp.rcode, Rcode::Refused);
        assert!(resp.authoritative);
    }
}
