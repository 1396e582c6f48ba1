//! DescribeTable service configuration.

use std::env;
use std::path::PathBuf;

use tablestack_core::{TableStackError, TableStackResult};

/// DescribeTable service configuration.
#[derive(Debug, Clone)]
pub struct DescribeTableConfig {
    /// JSON document used to seed the in-memory schema catalog.
    pub schema_file: Option<PathBuf>,
    /// Scheme of the canonical URLs placed in `Links` (`http` or `https`).
    pub public_scheme: String,
    /// Host of the canonical URLs; the request `Host` header is used when unset.
    pub public_host: Option<String>,
}

impl DescribeTableConfig {
    /// Create configuration from environment variables.
    ///
    /// # Errors
    /// Returns [`TableStackError::Config`] if the public scheme is neither
    /// `http` nor `https`.
    pub fn from_env() -> TableStackResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> TableStackResult<Self> {
        let public_scheme = lookup("TABLESTACK_PUBLIC_SCHEME")
            .map_or_else(|| "http".to_owned(), |s| s.to_ascii_lowercase());
        if !matches!(public_scheme.as_str(), "http" | "https") {
            return Err(TableStackError::Config(format!(
                "TABLESTACK_PUBLIC_SCHEME must be http or https, got {public_scheme}"
            )));
        }

        Ok(Self {
            schema_file: lookup("TABLESTACK_SCHEMA_FILE")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            public_scheme,
            public_host: lookup("TABLESTACK_PUBLIC_HOST").filter(|v| !v.is_empty()),
        })
    }
}

impl Default for DescribeTableConfig {
    fn default() -> Self {
        Self {
            schema_file: None,
            public_scheme: "http".to_owned(),
            public_host: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &HashMap<&str, &str>) -> impl Fn(&str) -> Option<String> {
        move |k| vars.get(k).map(|v| (*v).to_owned())
    }

    #[test]
    fn test_should_default_to_http_without_seed() {
        let config = DescribeTableConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.public_scheme, "http");
        assert!(config.schema_file.is_none());
        assert!(config.public_host.is_none());
    }

    #[test]
    fn test_should_read_all_variables() {
        let vars = HashMap::from([
            ("TABLESTACK_SCHEMA_FILE", "/etc/tablestack/schemas.json"),
            ("TABLESTACK_PUBLIC_SCHEME", "HTTPS"),
            ("TABLESTACK_PUBLIC_HOST", "api.example.com"),
        ]);
        let config = DescribeTableConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(
            config.schema_file,
            Some(PathBuf::from("/etc/tablestack/schemas.json"))
        );
        assert_eq!(config.public_scheme, "https");
        assert_eq!(config.public_host.as_deref(), Some("api.example.com"));
    }

    #[test]
    fn test_should_reject_unknown_scheme() {
        let vars = HashMap::from([("TABLESTACK_PUBLIC_SCHEME", "ftp")]);
        let err = DescribeTableConfig::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, TableStackError::Config(_)));
    }
}
