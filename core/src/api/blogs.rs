//! `flickr.blogs.*`

use std::sync::Arc;

use crate::client::Core;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::mapping;
use crate::types::Blog;

pub const METHOD_GET_LIST: &str = "flickr.blogs.getList";
pub const METHOD_POST_PHOTO: &str = "flickr.blogs.postPhoto";

#[derive(Debug)]
pub struct BlogsInterface {
    core: Arc<Core>,
}

impl BlogsInterface {
    pub(crate) fn new(core: Arc<Core>) -> Self {
        Self { core }
    }

    /// Blogs configured for the calling user.
    pub fn get_list(&self) -> Result<Vec<Blog>> {
        let request = self.core.request(METHOD_GET_LIST);
        self.core
            .call(HttpMethod::Get, request, |blogs| mapping::list(blogs, "blog", mapping::blog))
    }

    /// Post a photo to a blog. `password` is needed only for blogs with
    /// [`Blog::needs_password`] set.
    pub fn post_photo(
        &self,
        blog_id: &str,
        photo_id: &str,
        title: &str,
        description: &str,
        password: Option<&str>,
    ) -> Result<()> {
        let request = self
            .core
            .request(METHOD_POST_PHOTO)
            .param("blog_id", blog_id)
            .param("photo_id", photo_id)
            .param("title", title)
            .param("description", description)
            .param_opt("blog_password", password);
        self.core.call_unit(HttpMethod::Post, request)
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::Canned;

    #[test]
    fn get_list_maps_blogs() {
        let (flickr, _) = Canned::client(&[r#"<rsp stat="ok"><blogs>
            <blog id="73" name="Bloxus test" needspassword="0" url="http://remote.bloxus.com/"/>
            <blog id="74" name="Manila Test" needspassword="1" url="http://flickrtest1.userland.com/"/>
        </blogs></rsp>"#]);
        let blogs = flickr.blogs().get_list().unwrap();
        assert_eq!(blogs.len(), 2);
        assert!(!blogs[0].needs_password);
        assert!(blogs[1].needs_password);
    }

    #[test]
    fn post_photo_sends_password_only_when_given() {
        let (flickr, canned) = Canned::client(&[r#"<rsp stat="ok"/>"#, r#"<rsp stat="ok"/>"#]);
        flickr.blogs().post_photo("73", "1", "t", "d", None).unwrap();
        assert_eq!(canned.last_param("blog_password"), None);
        flickr.blogs().post_photo("74", "1", "t", "d", Some("pw")).unwrap();
        assert_eq!(canned.last_param("blog_password").as_deref(), Some("pw"));
    }
}
