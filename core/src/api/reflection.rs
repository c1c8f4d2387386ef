//! `flickr.reflection.*`

use std::sync::Arc;

use crate::client::Core;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::xml::Element;

pub const METHOD_GET_METHODS: &str = "flickr.reflection.getMethods";

#[derive(Debug)]
pub struct ReflectionInterface {
    core: Arc<Core>,
}

impl ReflectionInterface {
    pub(crate) fn new(core: Arc<Core>) -> Self {
        Self { core }
    }

    /// Names of every method the service exposes.
    pub fn get_methods(&self) -> Result<Vec<String>> {
        let request = self.core.request(METHOD_GET_METHODS);
        self.core.call(HttpMethod::Get, request, |methods| {
            methods.descendants("method").into_iter().map(Element::text).collect()
        })
    }
}
