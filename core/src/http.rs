//! HTTP exchange types at the transport seam.
//!
//! # Design
//! Requests and responses are described as plain data. `Transport::execute`
//! is the only place that touches the network: it receives an `HttpRequest`
//! and hands back an `HttpResponse`. Everything before (parameter encoding,
//! signing) and after (XML parsing, envelope checks) is deterministic and can
//! be exercised with canned responses.

/// HTTP method for a REST call. The service accepts both for every method;
/// write operations go over POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An HTTP request described as plain data.
///
/// For `Get` the form-encoded parameters are already in `url`'s query string
/// and `body` is `None`. For `Post` they are in `body`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// A `200 OK` response carrying `body`.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
