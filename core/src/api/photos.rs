//! `flickr.photos.*`
//!
//! # Design
//! Searches are described by [`SearchParameters`], which appends only the
//! criteria that are set, in a fixed order, so equal searches produce equal
//! (and equally signed) requests.

use std::sync::Arc;

use super::paged;
use crate::client::Core;
use crate::error::Result;
use crate::extras::{self, Extra};
use crate::http::HttpMethod;
use crate::mapping;
use crate::params::RequestBuilder;
use crate::types::{Photo, PhotoContext, PhotoList, Size};

pub const METHOD_GET_INFO: &str = "flickr.photos.getInfo";
pub const METHOD_GET_RECENT: &str = "flickr.photos.getRecent";
pub const METHOD_SEARCH: &str = "flickr.photos.search";
pub const METHOD_ADD_TAGS: &str = "flickr.photos.addTags";
pub const METHOD_REMOVE_TAG: &str = "flickr.photos.removeTag";
pub const METHOD_SET_META: &str = "flickr.photos.setMeta";
pub const METHOD_DELETE: &str = "flickr.photos.delete";
pub const METHOD_GET_SIZES: &str = "flickr.photos.getSizes";
pub const METHOD_GET_CONTEXT: &str = "flickr.photos.getContext";

/// How multiple search tags combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagMode {
    /// Photos with any of the tags.
    Any,
    /// Photos with all of the tags.
    All,
}

impl TagMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TagMode::Any => "any",
            TagMode::All => "all",
        }
    }
}

/// Criteria for `flickr.photos.search`. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParameters {
    pub user_id: Option<String>,
    pub group_id: Option<String>,
    pub tags: Vec<String>,
    pub tag_mode: Option<TagMode>,
    pub text: Option<String>,
    /// Unix timestamp.
    pub min_upload_date: Option<i64>,
    pub max_upload_date: Option<i64>,
    /// `YYYY-MM-DD HH:MM:SS`.
    pub min_taken_date: Option<String>,
    pub max_taken_date: Option<String>,
    pub license: Option<String>,
    /// e.g. `date-posted-desc`, `interestingness-desc`, `relevance`.
    pub sort: Option<String>,
    pub has_geo: bool,
    pub extras: Vec<Extra>,
}

impl SearchParameters {
    fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        let tags = (!self.tags.is_empty()).then(|| self.tags.join(","));
        builder
            .param_opt("user_id", self.user_id.as_deref())
            .param_opt("group_id", self.group_id.as_deref())
            .param_opt("tags", tags)
            .param_opt("tag_mode", self.tag_mode.map(TagMode::as_str))
            .param_opt("text", self.text.as_deref())
            .param_opt("min_upload_date", self.min_upload_date)
            .param_opt("max_upload_date", self.max_upload_date)
            .param_opt("min_taken_date", self.min_taken_date.as_deref())
            .param_opt("max_taken_date", self.max_taken_date.as_deref())
            .param_opt("license", self.license.as_deref())
            .param_opt("sort", self.sort.as_deref())
            .param_opt("extras", extras::encode(&self.extras))
            .param_opt("has_geo", self.has_geo.then_some("1"))
    }
}

#[derive(Debug)]
pub struct PhotosInterface {
    core: Arc<Core>,
}

impl PhotosInterface {
    pub(crate) fn new(core: Arc<Core>) -> Self {
        Self { core }
    }

    /// Full details of a photo. The secret skips the permission check for
    /// callers that already know it.
    pub fn get_info(&self, photo_id: &str, secret: Option<&str>) -> Result<Photo> {
        let request = self
            .core
            .request(METHOD_GET_INFO)
            .param("photo_id", photo_id)
            .param_opt("secret", secret);
        self.core.call(HttpMethod::Get, request, mapping::photo_info)
    }

    pub fn get_recent(&self, extras: &[Extra], per_page: u32, page: u32) -> Result<PhotoList> {
        let request = paged(self.core.request(METHOD_GET_RECENT), extras, per_page, page);
        self.core.call(HttpMethod::Get, request, mapping::photo_list)
    }

    pub fn search(&self, params: &SearchParameters, per_page: u32, page: u32) -> Result<PhotoList> {
        let request = params
            .apply(self.core.request(METHOD_SEARCH))
            .param_positive("per_page", per_page)
            .param_positive("page", page);
        self.core.call(HttpMethod::Get, request, mapping::photo_list)
    }

    /// Add tags. Tags containing spaces are quoted so they stay one tag.
    pub fn add_tags(&self, photo_id: &str, tags: &[&str]) -> Result<()> {
        let joined = tags
            .iter()
            .map(|t| if t.contains(' ') { format!("\"{t}\"") } else { t.to_string() })
            .collect::<Vec<_>>()
            .join(" ");
        let request = self
            .core
            .request(METHOD_ADD_TAGS)
            .param("photo_id", photo_id)
            .param("tags", joined);
        self.core.call_unit(HttpMethod::Post, request)
    }

    /// Remove a tag by the id from [`Tag::id`](crate::types::Tag::id).
    pub fn remove_tag(&self, tag_id: &str) -> Result<()> {
        let request = self.core.request(METHOD_REMOVE_TAG).param("tag_id", tag_id);
        self.core.call_unit(HttpMethod::Post, request)
    }

    pub fn set_meta(&self, photo_id: &str, title: &str, description: &str) -> Result<()> {
        let request = self
            .core
            .request(METHOD_SET_META)
            .param("photo_id", photo_id)
            .param("title", title)
            .param("description", description);
        self.core.call_unit(HttpMethod::Post, request)
    }

    pub fn delete(&self, photo_id: &str) -> Result<()> {
        let request = self.core.request(METHOD_DELETE).param("photo_id", photo_id);
        self.core.call_unit(HttpMethod::Post, request)
    }

    pub fn get_sizes(&self, photo_id: &str) -> Result<Vec<Size>> {
        let request = self.core.request(METHOD_GET_SIZES).param("photo_id", photo_id);
        self.core
            .call(HttpMethod::Get, request, |sizes| mapping::list(sizes, "size", mapping::size))
    }

    /// The photos either side of `photo_id` in the owner's photostream.
    pub fn get_context(&self, photo_id: &str) -> Result<PhotoContext> {
        let request = self.core.request(METHOD_GET_CONTEXT).param("photo_id", photo_id);
        self.core.call_all(HttpMethod::Get, request, mapping::photo_context)
    }
}
