//! `flickr.favorites.*`

use std::sync::Arc;

use super::paged;
use crate::client::Core;
use crate::error::Result;
use crate::extras::Extra;
use crate::http::HttpMethod;
use crate::mapping;
use crate::types::PhotoList;

pub const METHOD_ADD: &str = "flickr.favorites.add";
pub const METHOD_REMOVE: &str = "flickr.favorites.remove";
pub const METHOD_GET_LIST: &str = "flickr.favorites.getList";
pub const METHOD_GET_PUBLIC_LIST: &str = "flickr.favorites.getPublicList";

#[derive(Debug)]
pub struct FavoritesInterface {
    core: Arc<Core>,
}

impl FavoritesInterface {
    pub(crate) fn new(core: Arc<Core>) -> Self {
        Self { core }
    }

    pub fn add(&self, photo_id: &str) -> Result<()> {
        let request = self.core.request(METHOD_ADD).param("photo_id", photo_id);
        self.core.call_unit(HttpMethod::Post, request)
    }

    pub fn remove(&self, photo_id: &str) -> Result<()> {
        let request = self.core.request(METHOD_REMOVE).param("photo_id", photo_id);
        self.core.call_unit(HttpMethod::Post, request)
    }

    /// Favorites of `user_id`, or of the calling user when `None`.
    pub fn get_list(&self, user_id: Option<&str>, extras: &[Extra], per_page: u32, page: u32) -> Result<PhotoList> {
        let request = paged(
            self.core.request(METHOD_GET_LIST).param_opt("user_id", user_id),
            extras,
            per_page,
            page,
        );
        self.core.call(HttpMethod::Get, request, mapping::photo_list)
    }

    pub fn get_public_list(&self, user_id: &str, extras: &[Extra], per_page: u32, page: u32) -> Result<PhotoList> {
        let request = paged(
            self.core.request(METHOD_GET_PUBLIC_LIST).param("user_id", user_id),
            extras,
            per_page,
            page,
        );
        self.core.call(HttpMethod::Get, request, mapping::photo_list)
    }
}
