//! Configuration management for TableStack services.
//!
//! All configuration is driven by environment variables.

/// Default bind address for the server.
const DEFAULT_GATEWAY_LISTEN: &str = "0.0.0.0:8480";

/// Global configuration for TableStack.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableStackConfig {
    /// Bind address for the gateway.
    pub gateway_listen: String,
    /// Log level.
    pub log_level: String,
}

impl Default for TableStackConfig {
    fn default() -> Self {
        Self {
            gateway_listen: DEFAULT_GATEWAY_LISTEN.to_owned(),
            log_level: "info".to_owned(),
        }
    }
}

impl TableStackConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("GATEWAY_LISTEN") {
            config.gateway_listen = v;
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }
}
