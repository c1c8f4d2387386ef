//! Request parameters and the ordered request builder.
//!
//! # Design
//! A call's arguments are an ordered list of name/value pairs. The order is
//! fixed by construction: `method`, `api_key`, injected authentication
//! parameters, then the call site's own parameters, then `api_sig` when the
//! request is signed. `RequestBuilder` is consumed by `finish`, so the list
//! cannot change once it is handed to a transport.

use std::borrow::Cow;

use md5::{Digest, Md5};

/// A typed parameter value, serialized to the service's string encoding.
///
/// Booleans have no `From` conversion: call sites either add a parameter
/// conditionally (presence/absence) or pass an explicit [`ParamValue::Flag`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Int(i64),
    /// Encoded as `"1"` or `"0"`.
    Flag(bool),
}

impl ParamValue {
    /// The value as it appears on the wire.
    pub fn as_wire(&self) -> Cow<'_, str> {
        match self {
            ParamValue::Text(s) => Cow::Borrowed(s),
            ParamValue::Int(n) => Cow::Owned(n.to_string()),
            ParamValue::Flag(true) => Cow::Borrowed("1"),
            ParamValue::Flag(false) => Cow::Borrowed("0"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Text(value.clone())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

/// One immutable name/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    name: String,
    value: ParamValue,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &ParamValue {
        &self.value
    }

    pub fn wire_value(&self) -> Cow<'_, str> {
        self.value.as_wire()
    }
}

/// Compute the `api_sig` for a parameter list.
///
/// MD5 over the shared secret followed by every `name + value`, with the
/// parameters sorted by name. Lower-case hex.
pub fn signature(secret: &str, params: &[Parameter]) -> String {
    let mut sorted: Vec<&Parameter> = params.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let mut hasher = Md5::new();
    hasher.update(secret.as_bytes());
    for p in sorted {
        hasher.update(p.name.as_bytes());
        hasher.update(p.wire_value().as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Form-encode parameters (`application/x-www-form-urlencoded`) in list order.
pub fn encode_form(params: &[Parameter]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for p in params {
        serializer.append_pair(&p.name, &p.wire_value());
    }
    serializer.finish()
}

/// Builds the parameter list for one API call.
///
/// Created by the client with `method`, `api_key` and any authentication
/// parameters already in place; the call site appends its own.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: String,
    params: Vec<Parameter>,
    signed: bool,
    secret: Option<String>,
}

impl RequestBuilder {
    /// Start a request for `method` with the `method` and `api_key` parameters.
    pub fn new(method: &str, api_key: &str) -> Self {
        Self {
            method: method.to_string(),
            params: vec![Parameter::new("method", method), Parameter::new("api_key", api_key)],
            signed: false,
            secret: None,
        }
    }

    /// Append injected authentication parameters.
    ///
    /// Must run before any method-specific parameter is added. A non-empty
    /// list makes the request signed.
    pub fn with_auth(mut self, auth: Vec<Parameter>) -> Self {
        debug_assert_eq!(self.params.len(), 2, "auth parameters follow method/api_key");
        if !auth.is_empty() {
            self.signed = true;
        }
        self.params.extend(auth);
        self
    }

    /// Append a parameter, builder style.
    pub fn param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.add(name, value);
        self
    }

    /// Append a parameter only when `value` is present.
    pub fn param_opt<V: Into<ParamValue>>(mut self, name: &str, value: Option<V>) -> Self {
        if let Some(v) = value {
            self.add(name, v);
        }
        self
    }

    /// Append a parameter only when `value` is positive. Paging arguments use
    /// zero to mean "server default".
    pub fn param_positive(mut self, name: &str, value: u32) -> Self {
        if value > 0 {
            self.add(name, value);
        }
        self
    }

    /// Append a parameter.
    pub fn add(&mut self, name: &str, value: impl Into<ParamValue>) {
        self.params.push(Parameter::new(name, value));
    }

    /// The shared secret used by [`finish`](Self::finish) to sign.
    pub fn with_secret(mut self, secret: Option<String>) -> Self {
        self.secret = secret;
        self
    }

    /// Request an `api_sig` even when no auth token is attached.
    pub fn signed(mut self) -> Self {
        self.signed = true;
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// Freeze the list. Appends `api_sig` when the request asked to be signed
    /// and a shared secret is available.
    pub fn finish(mut self) -> RestRequest {
        if let (true, Some(secret)) = (self.signed, self.secret.as_deref()) {
            let sig = signature(secret, &self.params);
            self.params.push(Parameter::new("api_sig", sig));
        }
        RestRequest {
            method: self.method,
            params: self.params.into_boxed_slice(),
        }
    }
}

/// A frozen request: method name plus its ordered parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestRequest {
    method: String,
    params: Box<[Parameter]>,
}

impl RestRequest {
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// Parameter names in wire order.
    pub fn names(&self) -> Vec<&str> {
        self.params.iter().map(Parameter::name).collect()
    }

    pub fn get(&self, name: &str) -> Option<Cow<'_, str>> {
        self.params.iter().find(|p| p.name == name).map(Parameter::wire_value)
    }

    pub fn encode(&self) -> String {
        encode_form(&self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_use_canonical_wire_form() {
        assert_eq!(ParamValue::from(42_u32).as_wire(), "42");
        assert_eq!(ParamValue::from(-7_i64).as_wire(), "-7");
        assert_eq!(ParamValue::Flag(true).as_wire(), "1");
        assert_eq!(ParamValue::Flag(false).as_wire(), "0");
        assert_eq!(ParamValue::from("a b").as_wire(), "a b");
    }

    #[test]
    fn builder_preserves_insertion_order() {
        let req = RequestBuilder::new("flickr.test.echo", "key")
            .with_auth(vec![Parameter::new("auth_token", "tok")])
            .param("zeta", "1")
            .param("alpha", "2")
            .param("mid", 3_u32)
            .finish();
        assert_eq!(req.names(), vec!["method", "api_key", "auth_token", "zeta", "alpha", "mid"]);
    }

    #[test]
    fn optional_and_positive_params_are_skipped() {
        let req = RequestBuilder::new("m", "k")
            .param_opt::<&str>("tags", None)
            .param_opt("text", Some("x"))
            .param_positive("per_page", 0)
            .param_positive("page", 2)
            .finish();
        assert_eq!(req.names(), vec!["method", "api_key", "text", "page"]);
    }

    #[test]
    fn unsigned_request_has_no_signature() {
        let req = RequestBuilder::new("m", "k")
            .with_secret(Some("secret".to_string()))
            .finish();
        assert!(req.get("api_sig").is_none());
    }

    #[test]
    fn signed_request_without_secret_has_no_signature() {
        let req = RequestBuilder::new("m", "k").signed().finish();
        assert!(req.get("api_sig").is_none());
    }

    #[test]
    fn signature_is_appended_last() {
        let req = RequestBuilder::new("flickr.auth.getFrob", "9a0554259914a86fb9e7eb014e4e5d52")
            .with_secret(Some("000005fab4534d05".to_string()))
            .signed()
            .finish();
        assert_eq!(req.names().last(), Some(&"api_sig"));
    }

    #[test]
    fn signature_sorts_by_name() {
        // md5("secret" + "api_keykey" + "methodm")
        let a = vec![Parameter::new("method", "m"), Parameter::new("api_key", "key")];
        let b = vec![Parameter::new("api_key", "key"), Parameter::new("method", "m")];
        assert_eq!(signature("secret", &a), signature("secret", &b));

        let expected = hex::encode(Md5::digest(b"secretapi_keykeymethodm"));
        assert_eq!(signature("secret", &a), expected);
    }

    #[test]
    fn encode_escapes_reserved_characters() {
        let req = RequestBuilder::new("flickr.people.findByEmail", "k")
            .param("find_email", "bob+tag@example.com")
            .finish();
        assert_eq!(
            req.encode(),
            "method=flickr.people.findByEmail&api_key=k&find_email=bob%2Btag%40example.com"
        );
    }

    #[test]
    fn auth_injection_marks_request_signed() {
        let req = RequestBuilder::new("m", "k")
            .with_auth(vec![Parameter::new("auth_token", "t")])
            .with_secret(Some("s".to_string()))
            .finish();
        assert!(req.get("api_sig").is_some());
    }
}
