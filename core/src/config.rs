//! Client configuration.
//!
//! Values come from code, from any serde source (`ClientConfig` derives
//! `Deserialize` with defaults for every field), or from `ESIGN_*`
//! environment variables via [`ClientConfig::from_env`].

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.na1.adobesign.com/api/rest/v6";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("esign-core/", env!("CARGO_PKG_VERSION"));

pub const ENV_BASE_URL: &str = "ESIGN_BASE_URL";
pub const ENV_ACCESS_TOKEN: &str = "ESIGN_ACCESS_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "ESIGN_TIMEOUT_SECS";
pub const ENV_USER_AGENT: &str = "ESIGN_USER_AGENT";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ClientConfig {
    /// API root, e.g. `https://api.na1.adobesign.com/api/rest/v6`.
    pub base_url: String,
    /// Bearer token sent as `Authorization: Bearer <token>`.
    pub access_token: Option<String>,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Defaults overridden by whichever `ESIGN_*` variables are set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(token) = lookup(ENV_ACCESS_TOKEN).filter(|t| !t.trim().is_empty()) {
            config.access_token = Some(token);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = raw
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("{ENV_TIMEOUT_SECS} is not a number: {raw}")))?;
        }
        if let Some(user_agent) = lookup(ENV_USER_AGENT) {
            config.user_agent = user_agent;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("invalid base_url {:?}: {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "base_url must use http or https, got {}",
                url.scheme()
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.access_token.is_none());
    }

    #[test]
    fn debug_output_hides_the_token() {
        let config = ClientConfig::new("https://api.example.com").with_access_token("s3cr3t-token");
        let shown = format!("{config:?}");
        assert!(!shown.contains("s3cr3t-token"), "{shown}");
        assert!(shown.contains(r#"access_token: Some("***")"#), "{shown}");
        assert!(shown.contains("https://api.example.com"));

        let anonymous = format!("{:?}", ClientConfig::default());
        assert!(anonymous.contains("access_token: None"));
    }

    #[test]
    fn env_overrides_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "http://localhost:8080/api/rest/v6"),
            (ENV_ACCESS_TOKEN, "token-1"),
            (ENV_TIMEOUT_SECS, "5"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/api/rest/v6");
        assert_eq!(config.access_token.as_deref(), Some("token-1"));
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn blank_token_is_ignored() {
        let config = ClientConfig::from_lookup(lookup(&[(ENV_ACCESS_TOKEN, "  ")])).unwrap();
        assert!(config.access_token.is_none());
    }

    #[test]
    fn non_numeric_timeout_is_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let err = ClientConfig::new("ftp://example.com").validate().unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("ftp")));
    }

    #[test]
    fn deserializes_partial_document_with_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"base_url":"https://secure.example.com/api/rest/v6"}"#).unwrap();
        assert_eq!(config.base_url, "https://secure.example.com/api/rest/v6");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
