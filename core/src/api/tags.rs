//! `flickr.tags.*`

use std::sync::Arc;

use crate::client::Core;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::mapping;
use crate::types::Tag;

pub const METHOD_GET_LIST_PHOTO: &str = "flickr.tags.getListPhoto";
pub const METHOD_GET_LIST_USER: &str = "flickr.tags.getListUser";
pub const METHOD_GET_RELATED: &str = "flickr.tags.getRelated";

#[derive(Debug)]
pub struct TagsInterface {
    core: Arc<Core>,
}

impl TagsInterface {
    pub(crate) fn new(core: Arc<Core>) -> Self {
        Self { core }
    }

    pub fn get_list_photo(&self, photo_id: &str) -> Result<Vec<Tag>> {
        let request = self.core.request(METHOD_GET_LIST_PHOTO).param("photo_id", photo_id);
        self.core.call(HttpMethod::Get, request, tags)
    }

    /// Tags used by `user_id`, or by the calling user when `None`.
    pub fn get_list_user(&self, user_id: Option<&str>) -> Result<Vec<Tag>> {
        let request = self.core.request(METHOD_GET_LIST_USER).param_opt("user_id", user_id);
        self.core.call(HttpMethod::Get, request, tags)
    }

    /// Tags that appear together with `tag`.
    pub fn get_related(&self, tag: &str) -> Result<Vec<Tag>> {
        let request = self.core.request(METHOD_GET_RELATED).param("tag", tag);
        self.core.call(HttpMethod::Get, request, tags)
    }
}

/// The payload root differs per method (`photo`, `who`, `tags`) but the
/// `tag` elements look the same.
fn tags(payload: &crate::xml::Element) -> Vec<Tag> {
    mapping::list(payload, "tag", mapping::tag)
}

#[cfg(test)]
mod tests {
    use crate::testing::Canned;

    #[test]
    fn get_list_photo_reads_tag_attributes() {
        let (flickr, _) = Canned::client(&[r#"<rsp stat="ok"><photo id="2619"><tags>
            <tag id="156" author="12037949754@N01" authorname="Bees" raw="tag 1">tag1</tag>
            <tag id="157" author="12037949754@N01" authorname="Bees" raw="tag 2">tag2</tag>
        </tags></photo></rsp>"#]);
        let tags = flickr.tags().get_list_photo("2619").unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].id.as_deref(), Some("156"));
        assert_eq!(tags[1].raw.as_deref(), Some("tag 2"));
        assert_eq!(tags[1].value, "tag2");
    }

    #[test]
    fn get_related_preserves_order() {
        let (flickr, canned) = Canned::client(&[r#"<rsp stat="ok"><tags source="london">
            <tag>england</tag><tag>thames</tag><tag>tube</tag>
        </tags></rsp>"#]);
        let values: Vec<_> = flickr
            .tags()
            .get_related("london")
            .unwrap()
            .into_iter()
            .map(|t| t.value)
            .collect();
        assert_eq!(values, vec!["england", "thames", "tube"]);
        assert_eq!(canned.last_param("tag").as_deref(), Some("london"));
    }

    #[test]
    fn get_list_user_without_user() {
        let (flickr, canned) = Canned::client(&[r#"<rsp stat="ok"><who id="1"><tags><tag>cat</tag></tags></who></rsp>"#]);
        assert_eq!(flickr.tags().get_list_user(None).unwrap()[0].value, "cat");
        assert_eq!(canned.last_param("user_id"), None);
    }
}
