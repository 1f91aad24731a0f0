/// Identity strings served from the CHAOS TXT table.
///
/// `version` and `id` come from configuration; `hostname` is discovered
/// once at startup. All three are fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct ServerIdentity {
    version: String,
    hostname: String,
    id: Option<String>,
}

impl ServerIdentity {
    pub fn new(
        version: impl Into<String>,
        hostname: impl Into<String>,
        id: Option<String>,
    ) -> Self {
        Self {
            version: version.into(),
            hostname: hostname.into(),
            id,
        }
    }

    /// TXT payload for one of the well-known introspection names.
    /// `id.server` only resolves when an id was configured.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        match name {
            "version.bind" => Some(&self.version),
            "hostname.bind" => Some(&self.hostname),
            "id.server" => self.id.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_names() {
        let identity = ServerIdentity::new("synth-dns 0.3.2", "ns1", Some("pop3".to_string()));

        assert_eq!(identity.lookup("version.bind"), Some("synth-dns 0.3.2"));
        assert_eq!(identity.lookup("hostname.bind"), Some("ns1"));
        assert_eq!(identity.lookup("id.server"), Some("pop3"));
        assert_eq!(identity.lookup("nonsense.bind"), None);
    }

    #[test]
    fn test_unconfigured_id_is_unknown() {
        let identity = ServerIdentity::new("synth-dns 0.3.2", "ns1", None);
        assert_eq!(identity.lookup("id.server"), None);
    }
}
