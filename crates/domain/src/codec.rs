//! Address ↔ record label codec.
//!
//! Forward direction: the host-bit nibbles of an address, taken from the
//! owning prefix's boundary, become one hostname label. The longest run of
//! zero nibbles starting on a group boundary may be folded into a `--`
//! marker, the hostname-legal stand-in for `::`. Reverse direction expands
//! the marker back out using the expected 32-nibble total, so the pair is
//! exactly invertible for every address inside a configured prefix.

use std::net::Ipv6Addr;
use std::sync::Arc;

use super::errors::DomainError;
use super::ipv6_text;
use super::prefix::PrefixTable;

/// Marker substituted for a compressed zero run. Two chars, like the `::`
/// it replaces, which keeps the expansion arithmetic length-neutral.
const RUN_MARKER: &str = "--";

/// Total hex nibbles in a 128-bit address.
const TOTAL_NIBBLES: usize = 32;

#[derive(Debug, Clone)]
pub struct RecordCodec {
    table: Arc<PrefixTable>,
}

impl RecordCodec {
    pub fn new(table: Arc<PrefixTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PrefixTable {
        &self.table
    }

    /// Build the hostname for an address, or `None` when no static record
    /// and no configured prefix covers it.
    pub fn encode(&self, address: &Ipv6Addr) -> Option<String> {
        if let Some(record) = self.table.find_static_by_address(address) {
            return Some(record.record.clone());
        }
        let prefix = self.table.find_by_address(address)?;
        let full = ipv6_text::expand(address);
        let changeable = &full[prefix.boundary()..];
        let value = compress_changeable(changeable, address);
        Some(prefix.template().render(&value))
    }

    /// Recover the address a hostname encodes. `RecordNotOwned` when no
    /// template matches at all; `InvalidEncodedAddress` when a template
    /// matched but the captured value does not expand to 32 nibbles.
    pub fn decode(&self, name: &str) -> Result<Ipv6Addr, DomainError> {
        if let Some(record) = self.table.find_static_by_record(name) {
            return Ok(record.address);
        }
        let (prefix, value) = self
            .table
            .find_by_record(name)
            .ok_or_else(|| DomainError::RecordNotOwned(name.to_string()))?;
        let unchangeable = prefix.unchangeable_part();
        let expanded = expand_marker(value, unchangeable.len())
            .ok_or_else(|| DomainError::InvalidEncodedAddress(name.to_string()))?;
        let nibbles = format!("{}{}", unchangeable, expanded);
        if nibbles.len() != TOTAL_NIBBLES || !nibbles.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DomainError::InvalidEncodedAddress(name.to_string()));
        }
        ipv6_text::group_nibbles(&nibbles)
            .parse()
            .map_err(|_| DomainError::InvalidEncodedAddress(name.to_string()))
    }

    /// Turn the nibble labels of a reverse query (already stripped of the
    /// `ip6.arpa` suffix) back into a candidate address: reverse, regroup
    /// by four, parse. Anything that is not exactly 32 single-nibble
    /// labels fails the parse and yields `None`.
    pub fn reverse_candidate(labels: &str) -> Option<Ipv6Addr> {
        let nibbles: String = labels.chars().filter(|c| *c != '.').rev().collect();
        ipv6_text::group_nibbles(&nibbles).parse().ok()
    }
}

/// Host-bit text → label value: optionally fold the longest zero run,
/// switch `::` to the marker, drop the remaining colons.
fn compress_changeable(changeable: &str, address: &Ipv6Addr) -> String {
    // Folding is only attempted when the address itself has an all-zero
    // group; a run confined to partial groups stays literal, exactly like
    // an address text that never contained `::`.
    let has_zero_group = address.segments().iter().any(|s| *s == 0);
    let run = if has_zero_group {
        longest_zero_run(changeable)
    } else {
        None
    };
    let spliced = match run {
        Some(run) => {
            let folded = splice_run(changeable, &run, false);
            if folded.ends_with("::") {
                // A label cannot end in the marker. Leave one literal
                // zero after it when the run affords one, otherwise the
                // run is too short to fold at all.
                if run.nibbles >= 3 {
                    splice_run(changeable, &run, true)
                } else {
                    changeable.to_string()
                }
            } else {
                folded
            }
        }
        None => changeable.to_string(),
    };
    spliced.replace("::", RUN_MARKER).replace(':', "")
}

/// A maximal run of zero nibbles starting at a group boundary. `start` and
/// `end` are char offsets into the changeable text (end exclusive, on the
/// last zero nibble); `nibbles` counts zeros only, colons skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ZeroRun {
    start: usize,
    end: usize,
    nibbles: usize,
}

fn longest_zero_run(text: &str) -> Option<ZeroRun> {
    let bytes = text.as_bytes();
    let mut best: Option<ZeroRun> = None;
    let mut i = 0;
    while i < bytes.len() {
        let at_group_start = i == 0 || bytes[i - 1] == b':';
        if at_group_start && bytes[i] == b'0' {
            let mut j = i;
            let mut end = i;
            let mut nibbles = 0;
            while j < bytes.len() {
                match bytes[j] {
                    b'0' => {
                        j += 1;
                        end = j;
                        nibbles += 1;
                    }
                    b':' => j += 1,
                    _ => break,
                }
            }
            if nibbles >= 2 && best.map_or(true, |b| nibbles > b.nibbles) {
                best = Some(ZeroRun {
                    start: i,
                    end,
                    nibbles,
                });
            }
            i = j.max(i + 1);
        } else {
            i += 1;
        }
    }
    best
}

/// Remove the run and join the halves with `::`; optionally keep one
/// literal `0` so the value never ends on the marker.
fn splice_run(text: &str, run: &ZeroRun, keep_trailing_zero: bool) -> String {
    let head = text[..run.start].trim_end_matches(':');
    let tail = text[run.end..].trim_start_matches(':');
    let mut out = String::with_capacity(text.len());
    out.push_str(head);
    out.push_str("::");
    if keep_trailing_zero {
        out.push('0');
    }
    out.push_str(tail);
    out
}

/// Replace at most one marker with the zeros it stands for. `None` for a
/// second marker or an expansion that would be negative.
fn expand_marker(value: &str, unchangeable_len: usize) -> Option<String> {
    let Some(pos) = value.find(RUN_MARKER) else {
        return Some(value.to_string());
    };
    if value[pos + RUN_MARKER.len()..].contains(RUN_MARKER) {
        return None;
    }
    let occupied = unchangeable_len + value.len() - RUN_MARKER.len();
    let zeros = TOTAL_NIBBLES.checked_sub(occupied)?;
    Some(format!(
        "{}{}{}",
        &value[..pos],
        "0".repeat(zeros),
        &value[pos + RUN_MARKER.len()..]
    ))
}
