#![allow(dead_code)]
use std::net::Ipv6Addr;
use std::sync::Arc;

use synth_dns_domain::{LabelTemplate, Prefix, PrefixTable, StaticRecord};

/// Builds prefix tables for tests without going through config files.
pub struct PrefixTableBuilder {
    prefixes: Vec<Prefix>,
}

impl PrefixTableBuilder {
    pub fn new() -> Self {
        Self { prefixes: Vec::new() }
    }

    pub fn prefix(self, cidr: &str, template: &str) -> Self {
        self.prefix_with_static(cidr, template, &[])
    }

    pub fn prefix_with_static(
        mut self,
        cidr: &str,
        template: &str,
        static_records: &[(&str, &str)],
    ) -> Self {
        let records = static_records
            .iter()
            .map(|(address, record)| StaticRecord {
                address: address.parse::<Ipv6Addr>().unwrap(),
                record: record.to_string(),
            })
            .collect();
        self.prefixes.push(Prefix::new(
            cidr.parse().unwrap(),
            LabelTemplate::parse(template).unwrap(),
            records,
        ));
        self
    }

    pub fn build(self) -> Arc<PrefixTable> {
        Arc::new(PrefixTable::new(self.prefixes))
    }
}
