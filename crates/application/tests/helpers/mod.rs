#![allow(dead_code)]

use std::collections::HashMap;
use std::net::Ipv6Addr;
use std::sync::{Arc, Mutex};

use synth_dns_application::AnswerCachePort;
use synth_dns_domain::{Answer, LabelTemplate, Prefix, PrefixTable, StaticRecord};

/// Call-recording cache stub. Preloaded entries never expire, and every
/// `put` is kept with its arguments in call order.
pub struct MockAnswerCache {
    entries: Mutex<HashMap<String, Vec<Answer>>>,
    puts: Mutex<Vec<(String, Vec<Answer>, u32)>>,
}

impl MockAnswerCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            puts: Mutex::new(Vec::new()),
        }
    }

    pub fn preload(&self, name: &str, answers: Vec<Answer>) {
        self.entries
            .lock()
            .unwrap()
            .insert(name.to_string(), answers);
    }

    pub fn recorded_puts(&self) -> Vec<(String, Vec<Answer>, u32)> {
        self.puts.lock().unwrap().clone()
    }
}

impl Default for MockAnswerCache {
    fn default() -> Self {
        Self::new()
    }
}

impl AnswerCachePort for MockAnswerCache {
    fn get(&self, name: &str) -> Option<Vec<Answer>> {
        self.entries.lock().unwrap().get(name).cloned()
    }

    fn put(&self, name: &str, answers: &[Answer], ttl_secs: u32) {
        self.puts
            .lock()
            .unwrap()
            .push((name.to_string(), answers.to_vec(), ttl_secs));
        self.entries
            .lock()
            .unwrap()
            .insert(name.to_string(), answers.to_vec());
    }
}

pub fn make_prefix(cidr: &str, template: &str, static_records: &[(&str, &str)]) -> Prefix {
    let records = static_records
        .iter()
        .map(|(address, record)| StaticRecord {
            address: address.parse::<Ipv6Addr>().unwrap(),
            record: record.to_string(),
        })
        .collect();

    Prefix::new(
        cidr.parse().unwrap(),
        LabelTemplate::parse(template).unwrap(),
        records,
    )
}

pub fn make_table(prefixes: Vec<Prefix>) -> Arc<PrefixTable> {
    Arc::new(PrefixTable::new(prefixes))
}
