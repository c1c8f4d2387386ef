//! Synchronous client for the Flickr REST API.
//!
//! # Overview
//! Every service method follows the same pipeline: build an ordered
//! parameter list (`method`, `api_key`, injected auth, call parameters,
//! optional `api_sig`), send it through a [`Transport`], check the `rsp`
//! envelope, and map the payload into plain domain records.
//!
//! # Design
//! - [`Flickr`] is the entry point. It creates each resource interface
//!   (`people()`, `photos()`, `pools()`, …) once, on first use.
//! - [`AuthContext`] is shared by every interface. Calls read a consistent
//!   snapshot of the secret and token; updates swap the whole state.
//! - The transport seam is [`Transport::execute`], which takes and returns
//!   plain-data [`HttpRequest`]/[`HttpResponse`] values. [`RestTransport`]
//!   implements it with `ureq`; tests substitute canned responses.
//! - Service failures (`stat="fail"`) and transport failures are distinct
//!   [`FlickrError`] variants and are never swallowed or retried.

pub mod api;
mod client;
pub mod config;
pub mod context;
pub mod envelope;
pub mod error;
pub mod extras;
pub mod http;
pub mod mapping;
pub mod params;
pub mod transport;
pub mod types;
pub mod xml;

#[cfg(test)]
mod testing;

pub use api::{
    ActivityInterface, AuthInterface, BlogsInterface, ContactsInterface, FavoritesInterface, GroupsInterface,
    InterestingnessInterface, LicensesInterface, PeopleInterface, PhotosInterface, PhotosetsInterface,
    PoolsInterface, ReflectionInterface, SearchParameters, TagMode, TagsInterface, TestInterface,
    TransformInterface, UrlsInterface,
};
pub use client::Flickr;
pub use config::ClientConfig;
pub use context::{Auth, AuthContext, AuthState, Permission};
pub use envelope::Envelope;
pub use error::{FlickrError, Result, TransportError, XmlError};
pub use extras::{Extra, ALL_EXTRAS, MIN_EXTRAS};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use params::{ParamValue, Parameter, RequestBuilder, RestRequest};
pub use transport::{RestTransport, Transport, TransportConfig};
pub use types::{
    ActivityEvent, ActivityItem, Blog, Contact, GeoData, Group, ImageSize, License, OnlineStatus, Photo,
    PhotoContext, PhotoList, Photoset, PhotosetPhotos, Size, Tag, User,
};
