//! Client configuration resolved from code or the process environment.

use std::time::Duration;

use crate::error::FlickrError;
use crate::transport::{TransportConfig, DEFAULT_HOST, DEFAULT_TIMEOUT};

pub const ENV_API_KEY: &str = "FLICKR_API_KEY";
pub const ENV_SHARED_SECRET: &str = "FLICKR_SHARED_SECRET";
pub const ENV_HOST: &str = "FLICKR_HOST";
pub const ENV_BASE_URL: &str = "FLICKR_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "FLICKR_TIMEOUT_SECS";
pub const ENV_DEBUG_REQUEST: &str = "FLICKR_DEBUG_REQUEST";
pub const ENV_DEBUG_STREAM: &str = "FLICKR_DEBUG_STREAM";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_key: String,
    pub shared_secret: Option<String>,
    pub host: String,
    /// Scheme and authority. Overrides `host` when set.
    pub base_url: Option<String>,
    pub timeout: Duration,
    pub debug_request: bool,
    pub debug_stream: bool,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            shared_secret: None,
            host: DEFAULT_HOST.to_string(),
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            debug_request: false,
            debug_stream: false,
        }
    }

    pub fn with_shared_secret(mut self, secret: impl Into<String>) -> Self {
        self.shared_secret = Some(secret.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Read the `FLICKR_*` environment variables.
    pub fn from_env() -> Result<Self, FlickrError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, FlickrError> {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = get(ENV_API_KEY).ok_or_else(|| FlickrError::Config(format!("{ENV_API_KEY} is not set")))?;
        let mut config = Self::new(api_key);
        config.shared_secret = get(ENV_SHARED_SECRET);
        if let Some(host) = get(ENV_HOST) {
            config.host = host;
        }
        config.base_url = get(ENV_BASE_URL);
        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs
                .parse()
                .map_err(|_| FlickrError::Config(format!("{ENV_TIMEOUT_SECS} is not a number: {secs}")))?;
            config.timeout = Duration::from_secs(secs);
        }
        config.debug_request = get(ENV_DEBUG_REQUEST).is_some_and(|v| parse_flag(&v));
        config.debug_stream = get(ENV_DEBUG_STREAM).is_some_and(|v| parse_flag(&v));
        Ok(config)
    }

    pub fn transport_config(&self) -> TransportConfig {
        let mut transport = match &self.base_url {
            Some(url) => TransportConfig::with_base_url(url),
            None => TransportConfig::new(&self.host),
        };
        transport.timeout = self.timeout;
        transport.debug_request = self.debug_request;
        transport.debug_stream = self.debug_stream;
        transport
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn api_key_is_required() {
        let err = ClientConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, FlickrError::Config(msg) if msg.contains(ENV_API_KEY)));
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = ClientConfig::from_lookup(lookup(&[(ENV_API_KEY, "k")])).unwrap();
        assert_eq!(config, ClientConfig::new("k"));
        assert_eq!(
            config.transport_config().url("/services/rest/"),
            "https://www.flickr.com/services/rest/"
        );
    }

    #[test]
    fn reads_every_variable() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_KEY, "k"),
            (ENV_SHARED_SECRET, "s"),
            (ENV_HOST, "api.example.com"),
            (ENV_TIMEOUT_SECS, "5"),
            (ENV_DEBUG_REQUEST, "true"),
            (ENV_DEBUG_STREAM, "0"),
        ]))
        .unwrap();
        assert_eq!(config.shared_secret.as_deref(), Some("s"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.debug_request);
        assert!(!config.debug_stream);

        let transport = config.transport_config();
        assert_eq!(transport.base_url, "https://api.example.com");
        assert_eq!(transport.timeout, Duration::from_secs(5));
    }

    #[test]
    fn base_url_overrides_host() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_KEY, "k"),
            (ENV_HOST, "ignored.example.com"),
            (ENV_BASE_URL, "http://127.0.0.1:3000/"),
        ]))
        .unwrap();
        assert_eq!(config.transport_config().base_url, "http://127.0.0.1:3000");
    }

    #[test]
    fn bad_timeout_is_a_config_error() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_API_KEY, "k"), (ENV_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(matches!(err, FlickrError::Config(_)));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = ClientConfig::from_lookup(lookup(&[(ENV_API_KEY, "k"), (ENV_SHARED_SECRET, "  ")])).unwrap();
        assert_eq!(config.shared_secret, None);
    }
}
