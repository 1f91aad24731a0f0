//! Textual IPv6 helpers for the label codec.
//!
//! The codec works on the fully expanded form of an address: eight groups
//! of four lowercase hex nibbles, colon-separated, 39 characters total.
//! Abbreviation back to the canonical short form is `Ipv6Addr`'s `Display`
//! (RFC 5952), so nothing here ever re-implements `::` folding for output.

use std::net::Ipv6Addr;

use ipnetwork::Ipv6Network;

/// Fully expanded textual form: `2001:db8::1` → `2001:0db8:0000:...:0001`.
pub fn expand(addr: &Ipv6Addr) -> String {
    let segments = addr.segments();
    let mut out = String::with_capacity(39);
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            out.push(':');
        }
        out.push_str(&format!("{:04x}", segment));
    }
    out
}

/// Highest address inside the network (all host bits set).
pub fn last_address(network: &Ipv6Network) -> Ipv6Addr {
    let host_mask = if network.prefix() == 0 {
        u128::MAX
    } else {
        (1u128 << (128 - network.prefix())) - 1
    };
    Ipv6Addr::from(u128::from(network.network()) | host_mask)
}

/// Character position where the expanded texts of the network's first and
/// last addresses diverge. Everything left of it is fixed by the prefix.
/// A /128 never diverges, so the boundary is the full text length.
pub fn boundary(network: &Ipv6Network) -> usize {
    let first = expand(&network.network());
    let last = expand(&last_address(network));
    first
        .bytes()
        .zip(last.bytes())
        .position(|(a, b)| a != b)
        .unwrap_or(first.len())
}

/// Regroup a bare nibble string into colon-separated 4-nibble groups.
/// `"20010db8..."` → `"2001:0db8:..."`. No validation; a string that is
/// not 32 hex nibbles simply fails to parse as an address afterwards.
pub fn group_nibbles(nibbles: &str) -> String {
    nibbles
        .as_bytes()
        .chunks(4)
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(":")
}
