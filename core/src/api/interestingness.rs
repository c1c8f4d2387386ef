//! `flickr.interestingness.*`

use std::sync::Arc;

use super::paged;
use crate::client::Core;
use crate::error::{FlickrError, Result};
use crate::extras::Extra;
use crate::http::HttpMethod;
use crate::mapping;
use crate::types::PhotoList;

pub const METHOD_GET_LIST: &str = "flickr.interestingness.getList";

#[derive(Debug)]
pub struct InterestingnessInterface {
    core: Arc<Core>,
}

impl InterestingnessInterface {
    pub(crate) fn new(core: Arc<Core>) -> Self {
        Self { core }
    }

    /// The most interesting photos of `date` (`YYYY-MM-DD`), or of the most
    /// recent day when `None`.
    pub fn get_list(&self, date: Option<&str>, extras: &[Extra], per_page: u32, page: u32) -> Result<PhotoList> {
        if let Some(date) = date {
            if !is_iso_date(date) {
                return Err(FlickrError::Config(format!("date must be YYYY-MM-DD, got {date:?}")));
            }
        }
        let request = paged(
            self.core.request(METHOD_GET_LIST).param_opt("date", date),
            extras,
            per_page,
            page,
        );
        self.core.call(HttpMethod::Get, request, mapping::photo_list)
    }
}

fn is_iso_date(date: &str) -> bool {
    let bytes = date.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
}
