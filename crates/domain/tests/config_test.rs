use synth_dns_domain::config::{CliOverrides, Config, DnsConfig, ServerConfig};

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.server.port, 53);
    assert_eq!(config.server.bind_v4, "0.0.0.0");
    assert_eq!(config.server.bind_v6, "::");
    assert!(config.server.version.starts_with("synth-dns "));
    assert!(config.server.id.is_none());

    assert_eq!(config.dns.default_ttl, 3600);
    assert_eq!(config.dns.max_cache_entries, 10_000);
    assert!(config.dns.ns_records.is_empty());
    assert!(config.dns.prefixes.is_empty());

    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_config_deserialization_with_all_fields() {
    let toml_str = r#"
        [server]
        port = 5353
        bind_v4 = "127.0.0.1"
        bind_v6 = "::1"
        version = "synth-dns test"
        id = "dns1.pop3"

        [dns]
        default_ttl = 300
        max_cache_entries = 64
        ns_records = ["ns1.example.com", "ns2.example.com"]

        [[dns.prefixes]]
        cidr = "2001:db8::/32"
        label_template = "{addr}.v6.example.com"

        [[dns.prefixes.static_records]]
        address = "2001:db8::1"
        record = "gateway.v6.example.com"

        [[dns.prefixes]]
        cidr = "2001:db8:1234::/48"
        label_template = "{addr}.lab.example.com"

        [logging]
        level = "debug"
    "#;

    let config: Config = toml::from_str(toml_str).unwrap();

    assert_eq!(config.server.port, 5353);
    assert_eq!(config.server.bind_v4, "127.0.0.1");
    assert_eq!(config.server.bind_v6, "::1");
    assert_eq!(config.server.version, "synth-dns test");
    assert_eq!(config.server.id, Some("dns1.pop3".to_string()));

    assert_eq!(config.dns.default_ttl, 300);
    assert_eq!(config.dns.max_cache_entries, 64);
    assert_eq!(
        config.dns.ns_records,
        vec!["ns1.example.com", "ns2.example.com"]
    );
    assert_eq!(config.dns.prefixes.len(), 2);
    assert_eq!(config.dns.prefixes[0].cidr, "2001:db8::/32");
    assert_eq!(config.dns.prefixes[0].static_records.len(), 1);
    assert_eq!(config.dns.prefixes[0].static_records[0].address, "2001:db8::1");
    assert_eq!(
        config.dns.prefixes[0].static_records[0].record,
        "gateway.v6.example.com"
    );
    assert_eq!(config.dns.prefixes[1].cidr, "2001:db8:1234::/48");
    assert!(config.dns.prefixes[1].static_records.is_empty());

    assert_eq!(config.logging.level, "debug");

    assert!(config.validate().is_ok());
}

#[test]
fn test_config_missing_sections_use_defaults() {
    let toml_str = r#"
        [server]
        port = 1053
    "#;

    let config: Config = toml::from_str(toml_str).unwrap();

    assert_eq!(config.server.port, 1053);
    assert_eq!(config.dns.default_ttl, 3600);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_config_deserialization_ignores_unknown_fields() {
    let toml_str = r#"
        [server]
        port = 53
        workers = 8

        [dns]
        debug = true
    "#;

    let config: Result<Config, _> = toml::from_str(toml_str);
    assert!(
        config.is_ok(),
        "Old config with removed fields should still deserialize: {:?}",
        config.err()
    );
}

#[test]
fn test_cli_overrides_applied() {
    let overrides = CliOverrides {
        port: Some(10053),
        log_level: Some("trace".to_string()),
    };

    let config = Config::load(None, overrides).unwrap();
    assert_eq!(config.server.port, 10053);
    assert_eq!(config.logging.level, "trace");
}

#[test]
fn test_load_missing_explicit_file_fails() {
    let result = Config::load(
        Some("/nonexistent/synth-dns.toml"),
        CliOverrides::default(),
    );
    assert!(result.is_err());
}

#[test]
fn test_validate_rejects_port_zero() {
    let mut config = Config::default();
    config.server.port = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_empty_cache_bound() {
    let mut config = Config::default();
    config.dns.max_cache_entries = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_broken_zone_entries() {
    for (cidr, template, address) in [
        // bad CIDR
        ("10.0.0.0/8", "{addr}.v6.example.com", "2001:db8::1"),
        ("not-a-network", "{addr}.v6.example.com", "2001:db8::1"),
        // bad template
        ("2001:db8::/32", "static.example.com", "2001:db8::1"),
        ("2001:db8::/32", "{addr}.a.{addr}.b", "2001:db8::1"),
        // bad override address
        ("2001:db8::/32", "{addr}.v6.example.com", "192.0.2.1"),
    ] {
        let toml_str = format!(
            r#"
                [[dns.prefixes]]
                cidr = "{cidr}"
                label_template = "{template}"

                [[dns.prefixes.static_records]]
                address = "{address}"
                record = "gateway.v6.example.com"
            "#
        );

        let config: Config = toml::from_str(&toml_str).unwrap();
        assert!(
            config.validate().is_err(),
            "expected validation failure for cidr={cidr} template={template} address={address}"
        );
    }
}

#[test]
fn test_server_default_version_carries_package_version() {
    let server = ServerConfig::default();
    assert_eq!(
        server.version,
        format!("synth-dns {}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn test_dns_defaults_standalone() {
    let dns = DnsConfig::default();
    assert_eq!(dns.default_ttl, 3600);
    assert_eq!(dns.max_cache_entries, 10_000);
}
