//! Registry configuration.

use serde::{Deserialize, Serialize};

/// Scheme prefix for plain HTTP callbacks.
pub const HTTP_PREFIX: &str = "http://";

/// Scheme prefix for TLS callbacks.
pub const HTTPS_PREFIX: &str = "https://";

/// Malformed TLS prefix accepted by older federation hosts.
pub const LEGACY_HTTPS_PREFIX: &str = "https//";

/// Query parameter carrying the token on broadcast URLs.
pub const DEFAULT_TOKEN_PARAM: &str = "sso_token";

/// Configuration for an [`AppRegistry`](crate::AppRegistry).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Prefixes a callback URL must start with to be accepted.
    #[serde(default = "default_accepted_schemes")]
    pub accepted_schemes: Vec<String>,

    /// Name of the query parameter appended to broadcast URLs.
    #[serde(default = "default_token_param")]
    pub token_param: String,
}

fn default_accepted_schemes() -> Vec<String> {
    vec![HTTP_PREFIX.to_string(), HTTPS_PREFIX.to_string()]
}

fn default_token_param() -> String {
    DEFAULT_TOKEN_PARAM.to_string()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            accepted_schemes: default_accepted_schemes(),
            token_param: default_token_param(),
        }
    }
}

impl RegistryConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefixes accepted by older hosts: `http://` and the colon-less `https//`.
    ///
    /// Note that `https://` URLs are rejected under this configuration.
    pub fn legacy() -> Self {
        Self {
            accepted_schemes: vec![HTTP_PREFIX.to_string(), LEGACY_HTTPS_PREFIX.to_string()],
            token_param: default_token_param(),
        }
    }

    /// Replace the accepted scheme prefixes.
    pub fn with_accepted_schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepted_schemes = schemes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the token query parameter name.
    pub fn with_token_param(mut self, param: impl Into<String>) -> Self {
        self.token_param = param.into();
        self
    }

    /// Whether `api_url` is non-empty and starts with an accepted prefix.
    pub fn accepts_url(&self, api_url: &str) -> bool {
        !api_url.is_empty()
            && self
                .accepted_schemes
                .iter()
                .any(|prefix| api_url.starts_with(prefix.as_str()))
    }

    /// Parse a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_accepts_http_and_https() {
        let config = RegistryConfig::default();
        assert!(config.accepts_url("http://shop.example.com"));
        assert!(config.accepts_url("https://shop.example.com"));
        assert!(!config.accepts_url("https//shop.example.com"));
        assert!(!config.accepts_url("ftp://shop.example.com"));
        assert!(!config.accepts_url(""));
    }

    #[test]
    fn test_legacy_keeps_colonless_prefix() {
        let config = RegistryConfig::legacy();
        assert!(config.accepts_url("http://shop.example.com"));
        assert!(config.accepts_url("https//shop.example.com"));
        assert!(!config.accepts_url("https://shop.example.com"));
    }

    #[test]
    fn test_empty_prefix_list_rejects_everything() {
        let config = RegistryConfig::new().with_accepted_schemes(Vec::<String>::new());
        assert!(!config.accepts_url("http://shop.example.com"));
    }

    #[test]
    fn test_from_json_defaults() {
        let config = RegistryConfig::from_json("{}").unwrap();
        assert_eq!(config, RegistryConfig::default());

        let config = RegistryConfig::from_json(r#"{"token_param": "ticket"}"#).unwrap();
        assert_eq!(config.token_param, "ticket");
        assert_eq!(config.accepted_schemes, default_accepted_schemes());
    }
}
