//! `flickr.groups.pools.*`

use std::sync::Arc;

use super::paged;
use crate::client::Core;
use crate::error::Result;
use crate::extras::Extra;
use crate::http::HttpMethod;
use crate::mapping;
use crate::types::{Group, PhotoContext, PhotoList};

pub const METHOD_ADD: &str = "flickr.groups.pools.add";
pub const METHOD_REMOVE: &str = "flickr.groups.pools.remove";
pub const METHOD_GET_CONTEXT: &str = "flickr.groups.pools.getContext";
pub const METHOD_GET_GROUPS: &str = "flickr.groups.pools.getGroups";
pub const METHOD_GET_PHOTOS: &str = "flickr.groups.pools.getPhotos";

#[derive(Debug)]
pub struct PoolsInterface {
    core: Arc<Core>,
}

impl PoolsInterface {
    pub(crate) fn new(core: Arc<Core>) -> Self {
        Self { core }
    }

    pub fn add(&self, photo_id: &str, group_id: &str) -> Result<()> {
        let request = self
            .core
            .request(METHOD_ADD)
            .param("photo_id", photo_id)
            .param("group_id", group_id);
        self.core.call_unit(HttpMethod::Post, request)
    }

    pub fn remove(&self, photo_id: &str, group_id: &str) -> Result<()> {
        let request = self
            .core
            .request(METHOD_REMOVE)
            .param("photo_id", photo_id)
            .param("group_id", group_id);
        self.core.call_unit(HttpMethod::Post, request)
    }

    /// The photos before and after `photo_id` in the group pool.
    pub fn get_context(&self, photo_id: &str, group_id: &str) -> Result<PhotoContext> {
        let request = self
            .core
            .request(METHOD_GET_CONTEXT)
            .param("photo_id", photo_id)
            .param("group_id", group_id);
        self.core.call_all(HttpMethod::Get, request, mapping::photo_context)
    }

    /// Groups the calling user may add photos to.
    pub fn get_groups(&self) -> Result<Vec<Group>> {
        let request = self.core.request(METHOD_GET_GROUPS);
        self.core
            .call(HttpMethod::Get, request, |groups| mapping::list(groups, "group", mapping::group))
    }

    pub fn get_photos(
        &self,
        group_id: &str,
        tag: Option<&str>,
        extras: &[Extra],
        per_page: u32,
        page: u32,
    ) -> Result<PhotoList> {
        let request = self
            .core
            .request(METHOD_GET_PHOTOS)
            .param("group_id", group_id)
            .param_opt("tags", tag);
        self.core
            .call(HttpMethod::Get, paged(request, extras, per_page, page), mapping::photo_list)
    }
}

#[cfg(test)]
mod tests {
    use crate::extras::Extra;
    use crate::http::HttpMethod;
    use crate::testing::Canned;

    #[test]
    fn add_posts_photo_and_group() {
        let (flickr, canned) = Canned::client(&[r#"<rsp stat="ok"/>"#]);
        flickr.pools().add("p1", "g1").unwrap();

        assert_eq!(canned.requests()[0].method, HttpMethod::Post);
        let names: Vec<_> = canned.last_params().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["method", "api_key", "photo_id", "group_id"]);
    }

    #[test]
    fn remove_propagates_service_error() {
        let (flickr, _) =
            Canned::client(&[r#"<rsp stat="fail"><err code="2" msg="Group not found"/></rsp>"#]);
        let err = flickr.pools().remove("p1", "missing").unwrap_err();
        assert_eq!(err.code(), Some("2"));
    }

    #[test]
    fn get_context_reads_both_neighbours() {
        let (flickr, _) = Canned::client(&[r#"<rsp stat="ok">
            <prevphoto id="2980" secret="973da1e709" title="boo!" url="/photos/bees/2980/"/>
            <nextphoto id="2985" secret="059b664012" title="Amsterdam Amstel" url="/photos/bees/2985/"/>
        </rsp>"#]);
        let ctx = flickr.pools().get_context("2981", "g1").unwrap();
        assert_eq!(ctx.previous.unwrap().title, "boo!");
        assert_eq!(ctx.next.unwrap().id, "2985");
    }

    #[test]
    fn get_groups_preserves_order() {
        let (flickr, _) = Canned::client(&[r#"<rsp stat="ok"><groups>
            <group id="33853651696@N01" name="Art and Literature Hoedown" admin="0" privacy="3" photos="2"/>
            <group id="34427465446@N01" name="FlickrIdeas" admin="1" privacy="3" photos="0"/>
        </groups></rsp>"#]);
        let groups = flickr.pools().get_groups().unwrap();
        let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Art and Literature Hoedown", "FlickrIdeas"]);
        assert!(groups[1].admin);
    }

    #[test]
    fn get_photos_omits_absent_tag() {
        let (flickr, canned) = Canned::client(&[r#"<rsp stat="ok"><photos page="1" pages="0" perpage="100" total="0"/></rsp>"#]);
        let list = flickr.pools().get_photos("g1", None, &[Extra::Tags], 0, 0).unwrap();
        assert!(list.photos.is_empty());
        let names: Vec<_> = canned.last_params().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["method", "api_key", "group_id", "extras"]);
    }
}
