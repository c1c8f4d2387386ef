//! Canned transport for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::client::Flickr;
use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, TransportConfig};

/// Answers each request with the next queued body and records the request.
#[derive(Debug)]
pub(crate) struct Canned {
    config: TransportConfig,
    bodies: Mutex<VecDeque<String>>,
    seen: Mutex<Vec<HttpRequest>>,
}

impl Canned {
    pub(crate) fn new(bodies: &[&str]) -> Self {
        Self {
            config: TransportConfig::with_base_url("http://flickr.test"),
            bodies: Mutex::new(bodies.iter().map(|b| b.to_string()).collect()),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// A client with API key `key` over a fresh canned transport.
    pub(crate) fn client(bodies: &[&str]) -> (Flickr, Arc<Canned>) {
        let canned = Arc::new(Canned::new(bodies));
        let flickr = Flickr::new("key", Arc::clone(&canned) as Arc<dyn Transport>);
        (flickr, canned)
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.seen.lock().unwrap().clone()
    }

    /// Decoded parameters of the most recent request, in wire order.
    pub(crate) fn last_params(&self) -> Vec<(String, String)> {
        let seen = self.seen.lock().unwrap();
        let request = seen.last().expect("no request was sent");
        let encoded = match &request.body {
            Some(body) => body.as_str(),
            None => request.url.split_once('?').map(|(_, q)| q).unwrap_or(""),
        };
        form_urlencoded::parse(encoded.as_bytes()).into_owned().collect()
    }

    pub(crate) fn last_param(&self, name: &str) -> Option<String> {
        self.last_params().into_iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }
}

impl Transport for Canned {
    fn config(&self) -> &TransportConfig {
        &self.config
    }

    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.seen.lock().unwrap().push(request);
        let body = self
            .bodies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| r#"<rsp stat="ok"/>"#.to_string());
        Ok(HttpResponse::ok(body))
    }
}
