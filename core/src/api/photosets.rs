//! `flickr.photosets.*`

use std::sync::Arc;

use super::paged;
use crate::client::Core;
use crate::error::Result;
use crate::extras::Extra;
use crate::http::HttpMethod;
use crate::mapping;
use crate::types::{Photoset, PhotosetPhotos};

pub const METHOD_GET_LIST: &str = "flickr.photosets.getList";
pub const METHOD_GET_INFO: &str = "flickr.photosets.getInfo";
pub const METHOD_GET_PHOTOS: &str = "flickr.photosets.getPhotos";

#[derive(Debug)]
pub struct PhotosetsInterface {
    core: Arc<Core>,
}

impl PhotosetsInterface {
    pub(crate) fn new(core: Arc<Core>) -> Self {
        Self { core }
    }

    /// Photosets of `user_id`, or of the calling user when `None`.
    pub fn get_list(&self, user_id: Option<&str>) -> Result<Vec<Photoset>> {
        let request = self.core.request(METHOD_GET_LIST).param_opt("user_id", user_id);
        self.core
            .call(HttpMethod::Get, request, |sets| mapping::list(sets, "photoset", mapping::photoset))
    }

    pub fn get_info(&self, photoset_id: &str) -> Result<Photoset> {
        let request = self.core.request(METHOD_GET_INFO).param("photoset_id", photoset_id);
        self.core.call(HttpMethod::Get, request, mapping::photoset)
    }

    pub fn get_photos(&self, photoset_id: &str, extras: &[Extra], per_page: u32, page: u32) -> Result<PhotosetPhotos> {
        let request = paged(
            self.core.request(METHOD_GET_PHOTOS).param("photoset_id", photoset_id),
            extras,
            per_page,
            page,
        );
        self.core.call(HttpMethod::Get, request, mapping::photoset_photos)
    }
}
