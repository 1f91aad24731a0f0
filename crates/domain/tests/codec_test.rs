use std::net::Ipv6Addr;

use synth_dns_domain::{DomainError, RecordCodec};

mod helpers;
use helpers::PrefixTableBuilder;

fn addr(s: &str) -> Ipv6Addr {
    s.parse().unwrap()
}

/// The documentation prefix with the plainest possible template.
fn doc_codec() -> RecordCodec {
    RecordCodec::new(
        PrefixTableBuilder::new()
            .prefix("2001:db8::/32", "{addr}.v6.example.com")
            .build(),
    )
}

#[test]
fn test_round_trip_plain() {
    let codec = doc_codec();
    let address = addr("2001:db8:1234:5678:9abc:def0:1122:3344");

    let record = codec.encode(&address).unwrap();
    assert_eq!(record, "123456789abcdef011223344.v6.example.com");
    assert_eq!(codec.decode(&record).unwrap(), address);
}

#[test]
fn test_round_trip_zero_compressed() {
    let codec = doc_codec();
    let address = addr("2001:db8::abcd");

    let record = codec.encode(&address).unwrap();
    assert_eq!(record, "--abcd.v6.example.com");
    assert_eq!(codec.decode(&record).unwrap(), address);
}

#[test]
fn test_round_trip_network_address() {
    // every host nibble zero: the run would leave the label ending in the
    // marker, so one literal zero stays behind it
    let codec = doc_codec();
    let address = addr("2001:db8::");

    let record = codec.encode(&address).unwrap();
    assert_eq!(record, "--0.v6.example.com");
    assert_eq!(codec.decode(&record).unwrap(), address);
}

#[test]
fn test_round_trip_trailing_zero_group() {
    let codec = doc_codec();
    let address = addr("2001:db8:1111:2222:3333:4444:5555:0");

    let record = codec.encode(&address).unwrap();
    assert_eq!(record, "11112222333344445555--0.v6.example.com");
    assert_eq!(codec.decode(&record).unwrap(), address);
}

#[test]
fn test_two_nibble_run_at_end_stays_literal() {
    // /120 leaves two changeable nibbles; a two-zero run cannot spare a
    // trailing literal, so it is not compressed at all
    let codec = RecordCodec::new(
        PrefixTableBuilder::new()
            .prefix("2001:db8::ff00/120", "{addr}.v6.example.com")
            .build(),
    );
    let address = addr("2001:db8::ff00");

    let record = codec.encode(&address).unwrap();
    assert_eq!(record, "00.v6.example.com");
    assert_eq!(codec.decode(&record).unwrap(), address);
}

#[test]
fn test_round_trip_interior_zero_run() {
    let codec = doc_codec();
    let address = addr("2001:db8:1:0:0:0:0:5");

    let record = codec.encode(&address).unwrap();
    assert_eq!(record, "0001--5.v6.example.com");
    assert_eq!(codec.decode(&record).unwrap(), address);
}

#[test]
fn test_round_trip_unaligned_prefix() {
    let codec = RecordCodec::new(
        PrefixTableBuilder::new()
            .prefix("2001:db8:a000::/36", "{addr}.v6.example.com")
            .build(),
    );
    let address = addr("2001:db8:a000::1");

    let record = codec.encode(&address).unwrap();
    assert_eq!(record, "--1.v6.example.com");
    assert_eq!(codec.decode(&record).unwrap(), address);
}

#[test]
fn test_no_compression_without_zero_group() {
    // 2001:db8:0123:... has zero nibbles but never a whole zero group
    let codec = doc_codec();
    let address = addr("2001:db8:123:4567:89ab:cdef:123:4567");

    let record = codec.encode(&address).unwrap();
    assert_eq!(record, "0123456789abcdef01234567.v6.example.com");
    assert_eq!(codec.decode(&record).unwrap(), address);
}

#[test]
fn test_static_override_precedence() {
    let codec = RecordCodec::new(
        PrefixTableBuilder::new()
            .prefix_with_static(
                "2001:db8::/32",
                "{addr}.v6.example.com",
                &[("2001:db8:0000::0001", "gateway.v6.example.com")],
            )
            .build(),
    );

    // the override wins over the arithmetic form in both directions,
    // compared by parsed address rather than spelling
    let address = addr("2001:db8::1");
    assert_eq!(
        codec.encode(&address).unwrap(),
        "gateway.v6.example.com"
    );
    assert_eq!(
        codec.decode("gateway.v6.example.com").unwrap(),
        address
    );
}

#[test]
fn test_encode_outside_all_prefixes() {
    let codec = doc_codec();
    assert_eq!(codec.encode(&addr("fd00::1")), None);
}

#[test]
fn test_decode_unowned_name() {
    let codec = doc_codec();
    match codec.decode("host.elsewhere.example.org") {
        Err(DomainError::RecordNotOwned(_)) => {}
        other => panic!("expected RecordNotOwned, got {:?}", other),
    }
}

#[test]
fn test_decode_malformed_labels() {
    let codec = doc_codec();
    for name in [
        // stray single dash
        "a-b.v6.example.com",
        // two markers
        "--ab--cd.v6.example.com",
        // under-length without a marker
        "abc.v6.example.com",
        // over-length: marker cannot absorb negative zeros
        "--0123456789abcdef0123456789abcdef.v6.example.com",
    ] {
        match codec.decode(name) {
            Err(DomainError::InvalidEncodedAddress(_)) => {}
            other => panic!("expected InvalidEncodedAddress for {}, got {:?}", name, other),
        }
    }
}

#[test]
fn test_first_matching_prefix_wins() {
    let codec = RecordCodec::new(
        PrefixTableBuilder::new()
            .prefix("2001:db8:1234::/48", "{addr}.lab.example.com")
            .prefix("2001:db8::/32", "{addr}.v6.example.com")
            .build(),
    );

    // inside the /48: its template is used, with the longer fixed part
    let inside = addr("2001:db8:1234::7");
    assert_eq!(codec.encode(&inside).unwrap(), "--7.lab.example.com");

    // only inside the /32
    let outside = addr("2001:db8:ffff::7");
    assert_eq!(codec.encode(&outside).unwrap(), "ffff--7.v6.example.com");
}

#[test]
fn test_reverse_candidate() {
    let labels = "1.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.8.b.d.0.1.0.0.2";
    assert_eq!(
        RecordCodec::reverse_candidate(labels),
        Some(addr("2001:db8::1"))
    );

    // too few nibble labels for a full address
    assert_eq!(RecordCodec::reverse_candidate("8.b.d.0.1.0.0.2"), None);
    // non-hex labels
    assert_eq!(RecordCodec::reverse_candidate("x.y.z"), None);
    assert_eq!(RecordCodec::reverse_candidate(""), None);
}
