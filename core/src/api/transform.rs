//! `flickr.photos.transform.*`

use std::sync::Arc;

use crate::client::Core;
use crate::error::{FlickrError, Result};
use crate::http::HttpMethod;

pub const METHOD_ROTATE: &str = "flickr.photos.transform.rotate";

#[derive(Debug)]
pub struct TransformInterface {
    core: Arc<Core>,
}

impl TransformInterface {
    pub(crate) fn new(core: Arc<Core>) -> Self {
        Self { core }
    }

    /// Rotate clockwise by 90, 180 or 270 degrees.
    pub fn rotate(&self, photo_id: &str, degrees: u32) -> Result<()> {
        if !matches!(degrees, 90 | 180 | 270) {
            return Err(FlickrError::Config(format!("cannot rotate by {degrees} degrees")));
        }
        let request = self
            .core
            .request(METHOD_ROTATE)
            .param("photo_id", photo_id)
            .param("degrees", degrees);
        self.core.call_unit(HttpMethod::Post, request)
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::Canned;

    #[test]
    fn rotate_posts_degrees() {
        let (flickr, canned) = Canned::client(&[r#"<rsp stat="ok"/>"#]);
        flickr.transform().rotate("1", 270).unwrap();
        assert_eq!(canned.last_param("degrees").as_deref(), Some("270"));
    }

    #[test]
    fn rotate_rejects_other_angles() {
        let (flickr, canned) = Canned::client(&[]);
        assert!(flickr.transform().rotate("1", 45).is_err());
        assert!(canned.requests().is_empty());
    }
}
