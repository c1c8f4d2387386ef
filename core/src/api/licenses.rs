//! `flickr.photos.licenses.*`

use std::sync::Arc;

use crate::client::Core;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::mapping;
use crate::types::License;

pub const METHOD_GET_INFO: &str = "flickr.photos.licenses.getInfo";

#[derive(Debug)]
pub struct LicensesInterface {
    core: Arc<Core>,
}

impl LicensesInterface {
    pub(crate) fn new(core: Arc<Core>) -> Self {
        Self { core }
    }

    /// Every license a photo can carry.
    pub fn get_info(&self) -> Result<Vec<License>> {
        let request = self.core.request(METHOD_GET_INFO);
        self.core
            .call(HttpMethod::Get, request, |licenses| mapping::list(licenses, "license", mapping::license))
    }
}
