use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Listen port shared by UDP and TCP on both address families.
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_bind_v4")]
    pub bind_v4: String,

    #[serde(default = "default_bind_v6")]
    pub bind_v6: String,

    /// Payload for CHAOS `version.bind`.
    #[serde(default = "default_version")]
    pub version: String,

    /// Payload for CHAOS `id.server`; the name is refused when unset.
    #[serde(default)]
    pub id: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_v4: default_bind_v4(),
            bind_v6: default_bind_v6(),
            version: default_version(),
            id: None,
        }
    }
}

fn default_port() -> u16 {
    53
}

fn default_bind_v4() -> String {
    "0.0.0.0".to_string()
}

fn default_bind_v6() -> String {
    "::".to_string()
}

fn default_version() -> String {
    format!("synth-dns {}", env!("CARGO_PKG_VERSION"))
}
