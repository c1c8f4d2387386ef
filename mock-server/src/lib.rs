//! In-memory stand-in for the Flickr REST service.
//!
//! Speaks the same wire contract as the real service: form-encoded
//! parameters on `/services/rest/` (GET query or POST body) answered with
//! `rsp` envelopes, plus a `/services/auth/` page that approves frobs
//! without a browser. API key, signature and token checks use the real
//! error codes (100, 96, 97, 98, 99).

mod handlers;
pub mod store;
mod xml;

use std::io;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Form, Router,
};
use md5::{Digest, Md5};
use serde::Deserialize;
use tokio::{net::TcpListener, sync::RwLock};

use crate::store::{Perms, Store, Token};

pub const REST_PATH: &str = "/services/rest/";
pub const AUTH_PATH: &str = "/services/auth/";

pub const DEFAULT_API_KEY: &str = "test-key";
pub const DEFAULT_SHARED_SECRET: &str = "test-secret";

#[derive(Clone, Debug)]
pub struct MockConfig {
    pub api_key: String,
    pub shared_secret: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            api_key: DEFAULT_API_KEY.to_string(),
            shared_secret: DEFAULT_SHARED_SECRET.to_string(),
        }
    }
}

impl MockConfig {
    /// `MOCK_API_KEY` and `MOCK_SHARED_SECRET`, falling back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: std::env::var("MOCK_API_KEY").unwrap_or(defaults.api_key),
            shared_secret: std::env::var("MOCK_SHARED_SECRET").unwrap_or(defaults.shared_secret),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    config: Arc<MockConfig>,
    store: Arc<RwLock<Store>>,
}

pub fn app() -> Router {
    app_with(MockConfig::default())
}

pub fn app_with(config: MockConfig) -> Router {
    let state = AppState {
        config: Arc::new(config),
        store: Arc::new(RwLock::new(Store::default())),
    };
    Router::new()
        .route(REST_PATH, get(rest_get).post(rest_post))
        .route(AUTH_PATH, get(authorize))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), io::Error> {
    run_with(listener, MockConfig::default()).await
}

pub async fn run_with(listener: TcpListener, config: MockConfig) -> Result<(), io::Error> {
    axum::serve(listener, app_with(config)).await
}

/// `api_sig` for a parameter list: MD5 hex of the secret followed by every
/// `name + value` sorted by name. An existing `api_sig` is ignored.
pub fn sign(secret: &str, params: &[(String, String)]) -> String {
    let mut sorted: Vec<&(String, String)> = params.iter().filter(|(name, _)| name != "api_sig").collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    let mut hasher = Md5::new();
    hasher.update(secret.as_bytes());
    for (name, value) in sorted {
        hasher.update(name.as_bytes());
        hasher.update(value.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// One incoming REST call.
#[derive(Debug)]
pub struct Call {
    params: Vec<(String, String)>,
}

impl Call {
    pub fn new(params: Vec<(String, String)>) -> Self {
        Self { params }
    }

    pub fn method(&self) -> &str {
        self.get("method").unwrap_or_default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    fn positive(&self, name: &str) -> Option<usize> {
        self.get(name).and_then(|v| v.parse().ok()).filter(|v| *v > 0)
    }
}

/// A service-level failure, rendered as `<err code msg/>`.
#[derive(Debug)]
pub struct Fault {
    pub code: u32,
    pub message: String,
}

impl Fault {
    pub fn new(code: u32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<io::Error> for Fault {
    fn from(err: io::Error) -> Self {
        tracing::error!(error = %err, "failed to write payload");
        Fault::new(105, "Service currently unavailable")
    }
}

async fn rest_get(State(state): State<AppState>, Query(params): Query<Vec<(String, String)>>) -> Response {
    rest(state, Call::new(params)).await
}

async fn rest_post(State(state): State<AppState>, Form(params): Form<Vec<(String, String)>>) -> Response {
    rest(state, Call::new(params)).await
}

async fn rest(state: AppState, call: Call) -> Response {
    let mut store = state.store.write().await;
    let mut payload = xml::writer();

    let outcome = check_credentials(&state.config, &store, &call)
        .and_then(|token| handlers::dispatch(&mut store, &call, token.as_ref(), &mut payload));

    let body = match outcome {
        Ok(()) => {
            tracing::info!(method = call.method(), "ok");
            xml::ok(&payload.into_inner())
        }
        Err(fault) => {
            tracing::info!(method = call.method(), code = fault.code, message = %fault.message, "fail");
            xml::fail(fault.code, &fault.message)
        }
    };
    match body {
        Ok(body) => ([(header::CONTENT_TYPE, "text/xml; charset=utf-8")], body).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to write envelope");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// API key, then signature, then token. Returns the token the call carries.
fn check_credentials(config: &MockConfig, store: &Store, call: &Call) -> Result<Option<Token>, Fault> {
    if call.get("api_key") != Some(config.api_key.as_str()) {
        return Err(Fault::new(100, "Invalid API Key (Key not found)"));
    }

    let signed = match call.get("api_sig") {
        Some(sig) if sig == sign(&config.shared_secret, call.params()) => true,
        Some(_) => return Err(Fault::new(96, "Invalid signature")),
        None => false,
    };
    if !signed && (call.get("auth_token").is_some() || call.method().starts_with("flickr.auth.")) {
        return Err(Fault::new(97, "Missing signature"));
    }

    match call.get("auth_token") {
        Some(token) => store
            .tokens
            .get(token)
            .cloned()
            .map(Some)
            .ok_or_else(|| Fault::new(98, "Invalid auth token")),
        None => Ok(None),
    }
}

#[derive(Deserialize)]
struct AuthorizeQuery {
    api_key: String,
    perms: String,
    frob: String,
    api_sig: String,
}

/// Stands in for the browser page where a user approves a frob.
async fn authorize(State(state): State<AppState>, Query(query): Query<AuthorizeQuery>) -> (StatusCode, &'static str) {
    if query.api_key != state.config.api_key {
        return (StatusCode::FORBIDDEN, "unknown api key");
    }
    let params = vec![
        ("api_key".to_string(), query.api_key.clone()),
        ("perms".to_string(), query.perms.clone()),
        ("frob".to_string(), query.frob.clone()),
    ];
    if sign(&state.config.shared_secret, &params) != query.api_sig {
        return (StatusCode::FORBIDDEN, "invalid signature");
    }
    let Some(perms) = Perms::parse(&query.perms) else {
        return (StatusCode::BAD_REQUEST, "unknown permission");
    };

    let mut store = state.store.write().await;
    match store.frobs.get_mut(&query.frob) {
        Some(grant) => {
            *grant = Some(perms);
            tracing::info!(frob = %query.frob, perms = perms.as_str(), "frob approved");
            (StatusCode::OK, "authorized")
        }
        None => (StatusCode::NOT_FOUND, "unknown frob"),
    }
}
