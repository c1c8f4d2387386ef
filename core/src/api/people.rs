//! `flickr.people.*`

use std::sync::Arc;

use super::paged;
use crate::client::Core;
use crate::error::Result;
use crate::extras::Extra;
use crate::http::HttpMethod;
use crate::mapping;
use crate::types::{PhotoList, User};

pub const METHOD_FIND_BY_EMAIL: &str = "flickr.people.findByEmail";
pub const METHOD_FIND_BY_USERNAME: &str = "flickr.people.findByUsername";
pub const METHOD_GET_INFO: &str = "flickr.people.getInfo";
pub const METHOD_GET_ONLINE_LIST: &str = "flickr.people.getOnlineList";
pub const METHOD_GET_PUBLIC_PHOTOS: &str = "flickr.people.getPublicPhotos";

#[derive(Debug)]
pub struct PeopleInterface {
    core: Arc<Core>,
}

impl PeopleInterface {
    pub(crate) fn new(core: Arc<Core>) -> Self {
        Self { core }
    }

    /// Look up a user by email address. Only `id` and `username` are set.
    pub fn find_by_email(&self, email: &str) -> Result<User> {
        let request = self.core.request(METHOD_FIND_BY_EMAIL).param("find_email", email);
        self.core.call(HttpMethod::Get, request, mapping::user_ref)
    }

    /// Look up a user by username. Only `id` and `username` are set.
    pub fn find_by_username(&self, username: &str) -> Result<User> {
        let request = self.core.request(METHOD_FIND_BY_USERNAME).param("username", username);
        self.core.call(HttpMethod::Get, request, mapping::user_ref)
    }

    pub fn get_info(&self, user_id: &str) -> Result<User> {
        let request = self.core.request(METHOD_GET_INFO).param("user_id", user_id);
        self.core.call(HttpMethod::Get, request, mapping::user_info)
    }

    /// Users currently online, with their presence status.
    pub fn get_online_list(&self) -> Result<Vec<User>> {
        let request = self.core.request(METHOD_GET_ONLINE_LIST);
        self.core
            .call(HttpMethod::Get, request, |online| mapping::list(online, "user", mapping::online_user))
    }

    pub fn get_public_photos(&self, user_id: &str, extras: &[Extra], per_page: u32, page: u32) -> Result<PhotoList> {
        let request = paged(
            self.core.request(METHOD_GET_PUBLIC_PHOTOS).param("user_id", user_id),
            extras,
            per_page,
            page,
        );
        self.core.call(HttpMethod::Get, request, mapping::photo_list)
    }
}
