//! Resource interfaces, one per `flickr.<resource>.*` namespace.
//!
//! Each interface holds a shared handle to the client core and exposes one
//! method per service method. Reads go over GET, writes over POST.

mod activity;
mod auth;
mod blogs;
mod contacts;
mod favorites;
mod groups;
mod interestingness;
mod licenses;
mod people;
mod photos;
mod photosets;
mod pools;
mod reflection;
mod tags;
mod transform;
mod urls;

pub use activity::ActivityInterface;
pub use auth::AuthInterface;
pub use blogs::BlogsInterface;
pub use contacts::ContactsInterface;
pub use favorites::FavoritesInterface;
pub use groups::GroupsInterface;
pub use interestingness::InterestingnessInterface;
pub use licenses::LicensesInterface;
pub use people::PeopleInterface;
pub use photos::{PhotosInterface, SearchParameters, TagMode};
pub use photosets::PhotosetsInterface;
pub use pools::PoolsInterface;
pub use reflection::ReflectionInterface;
pub use tags::TagsInterface;
pub use self::test::TestInterface;
pub use transform::TransformInterface;
pub use urls::UrlsInterface;

use crate::extras::{self, Extra};
use crate::params::RequestBuilder;

/// Append the paging and `extras` parameters shared by photo listings.
/// Zero leaves paging to the server.
pub(crate) fn paged(builder: RequestBuilder, extras: &[Extra], per_page: u32, page: u32) -> RequestBuilder {
    builder
        .param_opt("extras", extras::encode(extras))
        .param_positive("per_page", per_page)
        .param_positive("page", page)
}
