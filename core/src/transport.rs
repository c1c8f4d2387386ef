//! Transport: one HTTP round trip per call, turned into an [`Envelope`].
//!
//! # Design
//! `Transport::execute` is the only required method and the only code that
//! performs I/O. The provided `get`/`post` methods encode the frozen
//! parameter list, emit the optional debug events, call `execute` exactly
//! once, and parse the body. Alternative transports (canned responses in
//! tests, a different HTTP stack) implement `execute` alone.

use std::fmt;
use std::time::Duration;

use crate::envelope::Envelope;
use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::params::RestRequest;

/// Default service host.
pub const DEFAULT_HOST: &str = "www.flickr.com";

/// Path of the RPC-style REST endpoint.
pub const REST_PATH: &str = "/services/rest/";

/// Path of the browser authorization page.
pub const AUTH_PATH: &str = "/services/auth/";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const USER_AGENT: &str = concat!("flickr-core/", env!("CARGO_PKG_VERSION"));

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Where requests go and what gets logged along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Scheme and authority, without a trailing slash.
    pub base_url: String,
    pub timeout: Duration,
    /// Log every outgoing request (URL and form body) before it is sent.
    pub debug_request: bool,
    /// Log every raw response body before it is parsed.
    pub debug_stream: bool,
}

impl TransportConfig {
    /// HTTPS to `host`.
    pub fn new(host: &str) -> Self {
        Self::with_base_url(&format!("https://{host}"))
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            debug_request: false,
            debug_stream: false,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST)
    }
}

/// Build the HTTP exchange for a frozen request.
pub fn build_http_request(
    config: &TransportConfig,
    method: HttpMethod,
    path: &str,
    request: &RestRequest,
) -> HttpRequest {
    let url = config.url(path);
    let encoded = request.encode();
    let mut headers = vec![("user-agent".to_string(), USER_AGENT.to_string())];
    match method {
        HttpMethod::Get => HttpRequest {
            method,
            url: format!("{url}?{encoded}"),
            headers,
            body: None,
        },
        HttpMethod::Post => {
            headers.push(("content-type".to_string(), FORM_CONTENT_TYPE.to_string()));
            HttpRequest {
                method,
                url,
                headers,
                body: Some(encoded),
            }
        }
    }
}

/// Sends REST requests and returns parsed envelopes.
pub trait Transport: Send + Sync + fmt::Debug {
    fn config(&self) -> &TransportConfig;

    /// Perform one HTTP round trip. Non-2xx statuses are returned as data.
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;

    fn send(&self, method: HttpMethod, path: &str, request: &RestRequest) -> Result<Envelope, TransportError> {
        let config = self.config();
        let http = build_http_request(config, method, path, request);

        if config.debug_request {
            tracing::info!(
                target: "flickr_core::request",
                method = ?http.method,
                url = %http.url,
                body = http.body.as_deref().unwrap_or(""),
                "outgoing request"
            );
        }

        let response = self.execute(http)?;

        if config.debug_stream {
            tracing::info!(
                target: "flickr_core::response",
                status = response.status,
                body = %response.body,
                "incoming response"
            );
        }

        if !response.is_success() {
            return Err(TransportError::HttpStatus {
                status: response.status,
                body: response.body,
            });
        }
        Envelope::parse(&response.body)
    }

    fn get(&self, path: &str, request: &RestRequest) -> Result<Envelope, TransportError> {
        self.send(HttpMethod::Get, path, request)
    }

    fn post(&self, path: &str, request: &RestRequest) -> Result<Envelope, TransportError> {
        self.send(HttpMethod::Post, path, request)
    }
}

/// Blocking HTTP transport backed by a `ureq` agent.
pub struct RestTransport {
    config: TransportConfig,
    agent: ureq::Agent,
}

impl RestTransport {
    pub fn new(config: TransportConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(config.timeout))
            .build()
            .new_agent();
        Self { config, agent }
    }
}

impl fmt::Debug for RestTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestTransport").field("config", &self.config).finish()
    }
}

impl Transport for RestTransport {
    fn config(&self) -> &TransportConfig {
        &self.config
    }

    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let result = match (request.method, request.body) {
            (HttpMethod::Get, _) => {
                let mut builder = self.agent.get(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            (HttpMethod::Post, body) => {
                let mut builder = self.agent.post(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.send(body.unwrap_or_default().as_bytes())
            }
        };
        let mut response = result.map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(HttpResponse { status, headers, body })
    }
}
