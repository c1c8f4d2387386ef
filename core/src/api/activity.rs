//! `flickr.activity.*`: recent comments and favorites on the calling
//! user's photos, and on photos they commented on.

use std::sync::Arc;

use crate::client::Core;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::mapping;
use crate::types::ActivityItem;

pub const METHOD_USER_COMMENTS: &str = "flickr.activity.userComments";
pub const METHOD_USER_PHOTOS: &str = "flickr.activity.userPhotos";

#[derive(Debug)]
pub struct ActivityInterface {
    core: Arc<Core>,
}

impl ActivityInterface {
    pub(crate) fn new(core: Arc<Core>) -> Self {
        Self { core }
    }

    /// Activity on photos the calling user commented on.
    pub fn user_comments(&self, per_page: u32, page: u32) -> Result<Vec<ActivityItem>> {
        let request = self
            .core
            .request(METHOD_USER_COMMENTS)
            .param_positive("per_page", per_page)
            .param_positive("page", page);
        self.core.call(HttpMethod::Get, request, items)
    }

    /// Activity on the calling user's photos. `timeframe` is e.g. `2d` or `6h`.
    pub fn user_photos(&self, per_page: u32, page: u32, timeframe: Option<&str>) -> Result<Vec<ActivityItem>> {
        let request = self
            .core
            .request(METHOD_USER_PHOTOS)
            .param_positive("per_page", per_page)
            .param_positive("page", page)
            .param_opt("timeframe", timeframe);
        self.core.call(HttpMethod::Get, request, items)
    }
}

fn items(payload: &crate::xml::Element) -> Vec<ActivityItem> {
    let items = mapping::list(payload, "item", mapping::activity_item);
    tracing::trace!(count = items.len(), "mapped activity items");
    items
}

#[cfg(test)]
mod tests {
    use crate::testing::Canned;

    const ITEMS: &str = r#"<rsp stat="ok"><items>
        <item type="photo" id="10289" owner="12037949754@N01" secret="34" server="1" commentsold="1" commentsnew="1" views="47">
            <title>A fish</title>
            <activity>
                <event type="comment" user="12037949754@N01" username="Bees" dateadded="1144086424">test</event>
            </activity>
        </item>
    </items></rsp>"#;

    #[test]
    fn user_photos_maps_items_and_events() {
        let (flickr, canned) = Canned::client(&[ITEMS]);
        let items = flickr.activity().user_photos(0, 0, Some("2d")).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "A fish");
        assert_eq!(items[0].views, Some(47));
        assert_eq!(items[0].events[0].username, "Bees");
        assert_eq!(canned.last_param("timeframe").as_deref(), Some("2d"));
    }

    #[test]
    fn user_comments_sends_paging() {
        let (flickr, canned) = Canned::client(&[ITEMS]);
        flickr.activity().user_comments(10, 2).unwrap();
        assert_eq!(canned.last_param("per_page").as_deref(), Some("10"));
        assert_eq!(canned.last_param("page").as_deref(), Some("2"));
    }
}
