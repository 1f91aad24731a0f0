//! Prefix table: the ordered set of delegated IPv6 subnets, each carrying
//! the hostname template its synthesized labels are substituted into and
//! any static address/record pairs that bypass the arithmetic codec.

use std::net::Ipv6Addr;

use ipnetwork::Ipv6Network;

use super::config::{DnsConfig, PrefixConfig};
use super::errors::DomainError;
use super::ipv6_text;

/// A literal address/record pair. Checked before the arithmetic codec in
/// both directions, so operators can pin well-known hosts to real names.
#[derive(Debug, Clone)]
pub struct StaticRecord {
    pub address: Ipv6Addr,
    pub record: String,
}

/// A hostname template with exactly one `{addr}` placeholder, split once
/// at load time into its literal halves. Matching is an anchored
/// prefix/suffix comparison with a `[0-9a-f-]+` span in between; no
/// regular expressions are built at query time.
#[derive(Debug, Clone)]
pub struct LabelTemplate {
    raw: String,
    head: String,
    tail: String,
}

impl LabelTemplate {
    pub const PLACEHOLDER: &'static str = "{addr}";

    pub fn parse(template: &str) -> Result<Self, DomainError> {
        let parts: Vec<&str> = template.splitn(3, Self::PLACEHOLDER).collect();
        match parts.as_slice() {
            [head, tail] => Ok(Self {
                raw: template.to_string(),
                head: head.to_string(),
                tail: tail.to_string(),
            }),
            [_] => Err(DomainError::InvalidTemplate(format!(
                "missing {} placeholder: {}",
                Self::PLACEHOLDER,
                template
            ))),
            _ => Err(DomainError::InvalidTemplate(format!(
                "more than one {} placeholder: {}",
                Self::PLACEHOLDER,
                template
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Substitute an encoded value into the placeholder.
    pub fn render(&self, value: &str) -> String {
        format!("{}{}{}", self.head, value, self.tail)
    }

    /// Full-string match of `name` against the template; returns the
    /// placeholder span when it is non-empty and drawn from `[0-9a-f-]`.
    pub fn capture<'a>(&self, name: &'a str) -> Option<&'a str> {
        let rest = name.strip_prefix(self.head.as_str())?;
        let value = rest.strip_suffix(self.tail.as_str())?;
        if value.is_empty() {
            return None;
        }
        if !value
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f' | b'-'))
        {
            return None;
        }
        Some(value)
    }

    /// The zone under which this template's names live: the tail past its
    /// first dot. `{addr}.v6.example.com` delegates `v6.example.com`.
    pub fn parent_zone(&self) -> Option<&str> {
        let (_, parent) = self.tail.split_once('.')?;
        if parent.is_empty() {
            None
        } else {
            Some(parent)
        }
    }
}

/// One configured subnet with its template, static records, and the
/// pieces precomputed from the network/last-address text boundary.
#[derive(Debug, Clone)]
pub struct Prefix {
    network: Ipv6Network,
    template: LabelTemplate,
    static_records: Vec<StaticRecord>,
    boundary: usize,
    unchangeable: String,
    reverse_apex: String,
}

impl Prefix {
    pub fn new(
        network: Ipv6Network,
        template: LabelTemplate,
        static_records: Vec<StaticRecord>,
    ) -> Self {
        let boundary = ipv6_text::boundary(&network);
        let full = ipv6_text::expand(&network.network());
        let unchangeable: String = full[..boundary].chars().filter(|c| *c != ':').collect();
        let mut labels: Vec<String> = unchangeable
            .chars()
            .rev()
            .map(|c| c.to_string())
            .collect();
        labels.push("ip6.arpa".to_string());
        let reverse_apex = labels.join(".");
        Self {
            network,
            template,
            static_records,
            boundary,
            unchangeable,
            reverse_apex,
        }
    }

    pub fn network(&self) -> &Ipv6Network {
        &self.network
    }

    pub fn template(&self) -> &LabelTemplate {
        &self.template
    }

    pub fn static_records(&self) -> &[StaticRecord] {
        &self.static_records
    }

    /// Char offset into the expanded address text where host bits start.
    pub fn boundary(&self) -> usize {
        self.boundary
    }

    /// The fixed nibbles of the network address, no separators.
    pub fn unchangeable_part(&self) -> &str {
        &self.unchangeable
    }

    /// `ip6.arpa` name for the root of this prefix's reverse tree.
    pub fn reverse_apex(&self) -> &str {
        &self.reverse_apex
    }

    pub fn contains(&self, address: &Ipv6Addr) -> bool {
        self.network.contains(*address)
    }

    /// Whether a queried name addresses this prefix's reverse apex. A
    /// prefix length off the 4-bit grid fixes only part of its last
    /// nibble, so the on-the-wire zone sits one label deeper; those match
    /// by borrowing exactly one leading single-nibble label.
    pub fn matches_reverse_apex(&self, name: &str) -> bool {
        if self.network.prefix() % 4 == 0 {
            name == self.reverse_apex
        } else {
            match name.split_once('.') {
                Some((first, rest)) => {
                    rest == self.reverse_apex
                        && first.len() == 1
                        && first.bytes().all(|b| b.is_ascii_hexdigit())
                }
                None => false,
            }
        }
    }
}

/// Ordered, immutable lookup table over all configured prefixes.
/// First configured match wins everywhere; overlap between prefixes is
/// the operator's responsibility.
#[derive(Debug, Clone, Default)]
pub struct PrefixTable {
    prefixes: Vec<Prefix>,
}

impl PrefixTable {
    pub fn new(prefixes: Vec<Prefix>) -> Self {
        Self { prefixes }
    }

    pub fn from_config(config: &DnsConfig) -> Result<Self, DomainError> {
        let mut prefixes = Vec::with_capacity(config.prefixes.len());
        for entry in &config.prefixes {
            prefixes.push(Self::prefix_from_config(entry)?);
        }
        Ok(Self::new(prefixes))
    }

    fn prefix_from_config(entry: &PrefixConfig) -> Result<Prefix, DomainError> {
        let network: Ipv6Network = entry
            .cidr
            .parse()
            .map_err(|_| DomainError::InvalidCidr(entry.cidr.clone()))?;
        let template = LabelTemplate::parse(&entry.label_template.to_lowercase())?;
        let mut static_records = Vec::with_capacity(entry.static_records.len());
        for record in &entry.static_records {
            let address: Ipv6Addr = record
                .address
                .parse()
                .map_err(|_| DomainError::InvalidIpAddress(record.address.clone()))?;
            static_records.push(StaticRecord {
                address,
                record: record.record.trim_end_matches('.').to_lowercase(),
            });
        }
        Ok(Prefix::new(network, template, static_records))
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Prefix> {
        self.prefixes.iter()
    }

    /// First prefix whose subnet contains the address.
    pub fn find_by_address(&self, address: &Ipv6Addr) -> Option<&Prefix> {
        self.prefixes.iter().find(|p| p.contains(address))
    }

    /// First prefix whose template matches the name, with the captured
    /// placeholder span.
    pub fn find_by_record<'a>(&self, name: &'a str) -> Option<(&Prefix, &'a str)> {
        self.prefixes
            .iter()
            .find_map(|p| p.template.capture(name).map(|value| (p, value)))
    }

    /// Static record matching the address, scanning prefixes in order.
    pub fn find_static_by_address(&self, address: &Ipv6Addr) -> Option<&StaticRecord> {
        self.prefixes
            .iter()
            .flat_map(|p| p.static_records.iter())
            .find(|r| r.address == *address)
    }

    /// Static record whose configured name equals `record`.
    pub fn find_static_by_record(&self, record: &str) -> Option<&StaticRecord> {
        self.prefixes
            .iter()
            .flat_map(|p| p.static_records.iter())
            .find(|r| r.record == record)
    }

    /// Existence check used by the A path: pattern or override match,
    /// with no demand that the captured value actually decodes.
    pub fn owns_name(&self, name: &str) -> bool {
        self.find_static_by_record(name).is_some() || self.find_by_record(name).is_some()
    }

    /// Prefix whose reverse apex the queried name addresses, if any.
    pub fn find_reverse_apex(&self, name: &str) -> Option<&Prefix> {
        self.prefixes.iter().find(|p| p.matches_reverse_apex(name))
    }

    /// Prefix whose forward parent zone equals the queried name, if any.
    pub fn find_forward_zone(&self, name: &str) -> Option<&Prefix> {
        self.prefixes
            .iter()
            .find(|p| p.template.parent_zone() == Some(name))
    }
}
