use std::fmt;
use std::str::FromStr;

/// Record types this responder knows how to answer. Anything else is
/// carried as `Other` so it can be reported and rejected with NOTIMP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    AAAA,
    PTR,
    NS,
    TXT,
    Other(u16),
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::PTR => "PTR",
            RecordType::NS => "NS",
            RecordType::TXT => "TXT",
            RecordType::Other(_) => "OTHER",
        }
    }

    pub fn to_u16(&self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::NS => 2,
            RecordType::PTR => 12,
            RecordType::TXT => 16,
            RecordType::AAAA => 28,
            RecordType::Other(code) => *code,
        }
    }

    pub fn from_u16(code: u16) -> Self {
        match code {
            1 => RecordType::A,
            2 => RecordType::NS,
            12 => RecordType::PTR,
            16 => RecordType::TXT,
            28 => RecordType::AAAA,
            other => RecordType::Other(other),
        }
    }

    /// Types the dispatcher resolves; everything else earns NOTIMP.
    pub fn is_supported(&self) -> bool {
        matches!(
            self,
            RecordType::A | RecordType::AAAA | RecordType::PTR | RecordType::NS
        )
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordType::Other(code) => write!(f, "TYPE{}", code),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(RecordType::A),
            "AAAA" => Ok(RecordType::AAAA),
            "PTR" => Ok(RecordType::PTR),
            "NS" => Ok(RecordType::NS),
            "TXT" => Ok(RecordType::TXT),
            _ => Err(format!("Unknown record type: {}", s)),
        }
    }
}

/// DNS query classes. IN for ordinary resolution, CH for the
/// version.bind/hostname.bind introspection names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryClass {
    In,
    Ch,
    Other(u16),
}

impl QueryClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryClass::In => "IN",
            QueryClass::Ch => "CH",
            QueryClass::Other(_) => "OTHER",
        }
    }

    pub fn to_u16(&self) -> u16 {
        match self {
            QueryClass::In => 1,
            QueryClass::Ch => 3,
            QueryClass::Other(code) => *code,
        }
    }

    pub fn from_u16(code: u16) -> Self {
        match code {
            1 => QueryClass::In,
            3 => QueryClass::Ch,
            other => QueryClass::Other(other),
        }
    }
}

impl fmt::Display for QueryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryClass::Other(code) => write!(f, "CLASS{}", code),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

/// One question extracted from a query message. The name is held in
/// matching form: lowercase, no trailing dot (RFC 4343 case folding
/// happens once, here, so templates and cache keys compare bytewise).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuestion {
    pub name: String,
    pub record_type: RecordType,
    pub class: QueryClass,
}

impl DnsQuestion {
    pub fn new(name: impl AsRef<str>, record_type: RecordType, class: QueryClass) -> Self {
        Self {
            name: name.as_ref().trim_end_matches('.').to_lowercase(),
            record_type,
            class,
        }
    }
}
