//! `flickr.urls.*`: translating between ids and web URLs.

use std::sync::Arc;

use crate::client::Core;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::mapping;
use crate::types::{Group, User};
use crate::xml::Element;

pub const METHOD_GET_GROUP: &str = "flickr.urls.getGroup";
pub const METHOD_GET_USER_PHOTOS: &str = "flickr.urls.getUserPhotos";
pub const METHOD_GET_USER_PROFILE: &str = "flickr.urls.getUserProfile";
pub const METHOD_LOOKUP_GROUP: &str = "flickr.urls.lookupGroup";
pub const METHOD_LOOKUP_USER: &str = "flickr.urls.lookupUser";

#[derive(Debug)]
pub struct UrlsInterface {
    core: Arc<Core>,
}

impl UrlsInterface {
    pub(crate) fn new(core: Arc<Core>) -> Self {
        Self { core }
    }

    pub fn get_group(&self, group_id: &str) -> Result<String> {
        let request = self.core.request(METHOD_GET_GROUP).param("group_id", group_id);
        self.core.call(HttpMethod::Get, request, url_attr)
    }

    pub fn get_user_photos(&self, user_id: &str) -> Result<String> {
        let request = self.core.request(METHOD_GET_USER_PHOTOS).param("user_id", user_id);
        self.core.call(HttpMethod::Get, request, url_attr)
    }

    pub fn get_user_profile(&self, user_id: &str) -> Result<String> {
        let request = self.core.request(METHOD_GET_USER_PROFILE).param("user_id", user_id);
        self.core.call(HttpMethod::Get, request, url_attr)
    }

    pub fn lookup_group(&self, url: &str) -> Result<Group> {
        let request = self.core.request(METHOD_LOOKUP_GROUP).param("url", url);
        self.core.call(HttpMethod::Get, request, mapping::group_ref)
    }

    pub fn lookup_user(&self, url: &str) -> Result<User> {
        let request = self.core.request(METHOD_LOOKUP_USER).param("url", url);
        self.core.call(HttpMethod::Get, request, mapping::user_ref)
    }
}

fn url_attr(e: &Element) -> String {
    e.attr_or_empty("url")
}

#[cfg(test)]
mod tests {
    use crate::testing::Canned;

    #[test]
    fn get_user_profile_reads_url_attribute() {
        let (flickr, _) = Canned::client(&[
            r#"<rsp stat="ok"><user nsid="12037949754@N01" url="http://www.flickr.com/people/bees/"/></rsp>"#,
        ]);
        assert_eq!(
            flickr.urls().get_user_profile("12037949754@N01").unwrap(),
            "http://www.flickr.com/people/bees/"
        );
    }

    #[test]
    fn lookup_group_reads_id_and_name() {
        let (flickr, canned) = Canned::client(&[
            r#"<rsp stat="ok"><group id="34427469792@N01"><groupname>FlickrCentral</groupname></group></rsp>"#,
        ]);
        let group = flickr
            .urls()
            .lookup_group("http://www.flickr.com/groups/central/")
            .unwrap();
        assert_eq!(group.id, "34427469792@N01");
        assert_eq!(group.name, "FlickrCentral");
        assert_eq!(canned.last_param("url").as_deref(), Some("http://www.flickr.com/groups/central/"));
    }

    #[test]
    fn lookup_user_reads_id_and_username() {
        let (flickr, _) = Canned::client(&[
            r#"<rsp stat="ok"><user id="12037949632@N01"><username>Stewart</username></user></rsp>"#,
        ]);
        let user = flickr.urls().lookup_user("http://www.flickr.com/photos/stewart/").unwrap();
        assert_eq!(user.id, "12037949632@N01");
        assert_eq!(user.username, "Stewart");
    }
}
