//! `flickr.contacts.*`

use std::sync::Arc;

use crate::client::Core;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::mapping;
use crate::types::Contact;

pub const METHOD_GET_LIST: &str = "flickr.contacts.getList";
pub const METHOD_GET_PUBLIC_LIST: &str = "flickr.contacts.getPublicList";

#[derive(Debug)]
pub struct ContactsInterface {
    core: Arc<Core>,
}

impl ContactsInterface {
    pub(crate) fn new(core: Arc<Core>) -> Self {
        Self { core }
    }

    /// Contacts of the calling user. Requires authentication.
    pub fn get_list(&self) -> Result<Vec<Contact>> {
        let request = self.core.request(METHOD_GET_LIST);
        self.core
            .call(HttpMethod::Get, request, |contacts| mapping::list(contacts, "contact", mapping::contact))
    }

    pub fn get_public_list(&self, user_id: &str) -> Result<Vec<Contact>> {
        let request = self.core.request(METHOD_GET_PUBLIC_LIST).param("user_id", user_id);
        self.core
            .call(HttpMethod::Get, request, |contacts| mapping::list(contacts, "contact", mapping::contact))
    }
}
