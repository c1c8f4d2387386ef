//! The `Flickr` client and the call pipeline shared by every interface.
//!
//! # Design
//! `Flickr` owns one `Core` (API key, transport, auth context) behind an
//! `Arc` and hands a clone of it to each resource interface the first time
//! that interface is requested. Interfaces are created lazily through
//! `OnceLock`, so concurrent first access still yields one instance.
//!
//! Every interface method goes through the same steps: `Core::request`
//! seeds the parameter list (`method`, `api_key`, injected auth), the method
//! appends its own parameters, and `Core::call` freezes the list, sends it,
//! turns a failed envelope into `FlickrError::Service`, and maps the payload.

use std::sync::{Arc, OnceLock};

use crate::api::{
    ActivityInterface, AuthInterface, BlogsInterface, ContactsInterface, FavoritesInterface, GroupsInterface,
    InterestingnessInterface, LicensesInterface, PeopleInterface, PhotosInterface, PhotosetsInterface,
    PoolsInterface, ReflectionInterface, TagsInterface, TestInterface, TransformInterface, UrlsInterface,
};
use crate::config::ClientConfig;
use crate::context::AuthContext;
use crate::error::{FlickrError, Result, TransportError};
use crate::http::HttpMethod;
use crate::params::RequestBuilder;
use crate::transport::{RestTransport, Transport, REST_PATH};
use crate::xml::Element;

#[derive(Debug)]
pub(crate) struct Core {
    api_key: String,
    transport: Arc<dyn Transport>,
    auth: Arc<AuthContext>,
}

impl Core {
    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    pub(crate) fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// Start a request for `method`. Authentication parameters and the
    /// shared secret come from one snapshot of the auth context.
    pub(crate) fn request(&self, method: &str) -> RequestBuilder {
        let state = self.auth.snapshot();
        RequestBuilder::new(method, &self.api_key)
            .with_auth(state.parameters())
            .with_secret(state.shared_secret.clone())
    }

    /// Like [`request`](Self::request) without the injected token, for
    /// methods that carry a token of their own.
    pub(crate) fn request_without_token(&self, method: &str) -> RequestBuilder {
        let state = self.auth.snapshot();
        RequestBuilder::new(method, &self.api_key).with_secret(state.shared_secret.clone())
    }

    /// Send the request and return the payload elements of a successful
    /// envelope.
    fn execute(&self, http: HttpMethod, builder: RequestBuilder) -> Result<Vec<Element>> {
        let request = builder.finish();
        tracing::debug!(method = request.method(), params = request.params().len(), ?http, "calling");

        let envelope = self.transport.send(http, REST_PATH, &request)?;
        envelope.into_result().inspect_err(|err| {
            if let FlickrError::Service { code, message } = err {
                tracing::warn!(method = request.method(), %code, %message, "service error");
            }
        })
    }

    /// Execute and map the first payload element. A successful response
    /// without one is a malformed document.
    pub(crate) fn call<T>(
        &self,
        http: HttpMethod,
        builder: RequestBuilder,
        map: impl FnOnce(&Element) -> T,
    ) -> Result<T> {
        let method = builder.method().to_string();
        let payload = self.execute(http, builder)?;
        let first = payload.first().ok_or_else(|| {
            TransportError::MalformedDocument(format!("{method} returned no payload"))
        })?;
        Ok(map(first))
    }

    /// Execute and map every payload element.
    pub(crate) fn call_all<T>(
        &self,
        http: HttpMethod,
        builder: RequestBuilder,
        map: impl FnOnce(&[Element]) -> T,
    ) -> Result<T> {
        let payload = self.execute(http, builder)?;
        Ok(map(&payload))
    }

    /// Execute a method whose only result is success or a service error.
    pub(crate) fn call_unit(&self, http: HttpMethod, builder: RequestBuilder) -> Result<()> {
        self.execute(http, builder).map(|_| ())
    }
}

/// Entry point to the service: one instance per API key.
///
/// ```no_run
/// use flickr_core::{ClientConfig, Flickr};
///
/// let flickr = Flickr::from_config(ClientConfig::new("api-key"));
/// let user = flickr.people().find_by_email("bob@example.com")?;
/// println!("{} is {}", user.username, user.id);
/// # Ok::<(), flickr_core::FlickrError>(())
/// ```
#[derive(Debug)]
pub struct Flickr {
    core: Arc<Core>,
    activity: OnceLock<ActivityInterface>,
    auth: OnceLock<AuthInterface>,
    blogs: OnceLock<BlogsInterface>,
    contacts: OnceLock<ContactsInterface>,
    favorites: OnceLock<FavoritesInterface>,
    groups: OnceLock<GroupsInterface>,
    interestingness: OnceLock<InterestingnessInterface>,
    licenses: OnceLock<LicensesInterface>,
    people: OnceLock<PeopleInterface>,
    photos: OnceLock<PhotosInterface>,
    photosets: OnceLock<PhotosetsInterface>,
    pools: OnceLock<PoolsInterface>,
    reflection: OnceLock<ReflectionInterface>,
    tags: OnceLock<TagsInterface>,
    test: OnceLock<TestInterface>,
    transform: OnceLock<TransformInterface>,
    urls: OnceLock<UrlsInterface>,
}

impl Flickr {
    pub fn new(api_key: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self::with_context(api_key, transport, Arc::new(AuthContext::new()))
    }

    /// Share an existing auth context, e.g. between two clients.
    pub fn with_context(api_key: impl Into<String>, transport: Arc<dyn Transport>, auth: Arc<AuthContext>) -> Self {
        let core = Core {
            api_key: api_key.into(),
            transport,
            auth,
        };
        Self {
            core: Arc::new(core),
            activity: OnceLock::new(),
            auth: OnceLock::new(),
            blogs: OnceLock::new(),
            contacts: OnceLock::new(),
            favorites: OnceLock::new(),
            groups: OnceLock::new(),
            interestingness: OnceLock::new(),
            licenses: OnceLock::new(),
            people: OnceLock::new(),
            photos: OnceLock::new(),
            photosets: OnceLock::new(),
            pools: OnceLock::new(),
            reflection: OnceLock::new(),
            tags: OnceLock::new(),
            test: OnceLock::new(),
            transform: OnceLock::new(),
            urls: OnceLock::new(),
        }
    }

    /// Build a client over [`RestTransport`], installing the configured
    /// shared secret.
    pub fn from_config(config: ClientConfig) -> Self {
        let transport = Arc::new(RestTransport::new(config.transport_config()));
        let auth = Arc::new(AuthContext::new());
        auth.set_shared_secret(config.shared_secret);
        tracing::debug!(base_url = %transport.config().base_url, "created client");
        Self::with_context(config.api_key, transport, auth)
    }

    pub fn api_key(&self) -> &str {
        self.core.api_key()
    }

    pub fn transport(&self) -> &dyn Transport {
        self.core.transport()
    }

    pub fn auth_context(&self) -> &AuthContext {
        self.core.auth()
    }

    pub fn activity(&self) -> &ActivityInterface {
        self.activity.get_or_init(|| ActivityInterface::new(Arc::clone(&self.core)))
    }

    pub fn auth(&self) -> &AuthInterface {
        self.auth.get_or_init(|| AuthInterface::new(Arc::clone(&self.core)))
    }

    pub fn blogs(&self) -> &BlogsInterface {
        self.blogs.get_or_init(|| BlogsInterface::new(Arc::clone(&self.core)))
    }

    pub fn contacts(&self) -> &ContactsInterface {
        self.contacts.get_or_init(|| ContactsInterface::new(Arc::clone(&self.core)))
    }

    pub fn favorites(&self) -> &FavoritesInterface {
        self.favorites.get_or_init(|| FavoritesInterface::new(Arc::clone(&self.core)))
    }

    pub fn groups(&self) -> &GroupsInterface {
        self.groups.get_or_init(|| GroupsInterface::new(Arc::clone(&self.core)))
    }

    pub fn interestingness(&self) -> &InterestingnessInterface {
        self.interestingness
            .get_or_init(|| InterestingnessInterface::new(Arc::clone(&self.core)))
    }

    pub fn licenses(&self) -> &LicensesInterface {
        self.licenses.get_or_init(|| LicensesInterface::new(Arc::clone(&self.core)))
    }

    pub fn people(&self) -> &PeopleInterface {
        self.people.get_or_init(|| PeopleInterface::new(Arc::clone(&self.core)))
    }

    pub fn photos(&self) -> &PhotosInterface {
        self.photos.get_or_init(|| PhotosInterface::new(Arc::clone(&self.core)))
    }

    pub fn photosets(&self) -> &PhotosetsInterface {
        self.photosets.get_or_init(|| PhotosetsInterface::new(Arc::clone(&self.core)))
    }

    pub fn pools(&self) -> &PoolsInterface {
        self.pools.get_or_init(|| PoolsInterface::new(Arc::clone(&self.core)))
    }

    pub fn reflection(&self) -> &ReflectionInterface {
        self.reflection.get_or_init(|| ReflectionInterface::new(Arc::clone(&self.core)))
    }

    pub fn tags(&self) -> &TagsInterface {
        self.tags.get_or_init(|| TagsInterface::new(Arc::clone(&self.core)))
    }

    pub fn test(&self) -> &TestInterface {
        self.test.get_or_init(|| TestInterface::new(Arc::clone(&self.core)))
    }

    pub fn transform(&self) -> &TransformInterface {
        self.transform.get_or_init(|| TransformInterface::new(Arc::clone(&self.core)))
    }

    pub fn urls(&self) -> &UrlsInterface {
        self.urls.get_or_init(|| UrlsInterface::new(Arc::clone(&self.core)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Auth, Permission};
    use crate::testing::Canned;

    #[test]
    fn accessor_returns_same_instance() {
        let (flickr, _) = Canned::client(&[]);
        assert!(std::ptr::eq(flickr.people(), flickr.people()));
        assert!(std::ptr::eq(flickr.pools(), flickr.pools()));
    }

    #[test]
    fn concurrent_first_access_yields_one_instance() {
        let (flickr, _) = Canned::client(&[]);
        let (a, b) = std::thread::scope(|s| {
            let a = s.spawn(|| flickr.photos() as *const PhotosInterface as usize);
            let b = s.spawn(|| flickr.photos() as *const PhotosInterface as usize);
            (a.join().unwrap(), b.join().unwrap())
        });
        assert_eq!(a, b);
    }

    #[test]
    fn request_seeds_method_key_and_auth() {
        let (flickr, _) = Canned::client(&[]);
        flickr.auth_context().set_auth(Some(Auth::new("tok", Permission::Read)));
        let request = flickr.core.request("flickr.test.login").param("x", "1").finish();
        assert_eq!(request.names(), vec!["method", "api_key", "auth_token", "x"]);
    }

    #[test]
    fn request_is_signed_when_token_and_secret_are_present() {
        let (flickr, _) = Canned::client(&[]);
        flickr.auth_context().set_shared_secret(Some("secret".to_string()));
        flickr.auth_context().set_auth(Some(Auth::new("tok", Permission::Read)));
        let request = flickr.core.request("flickr.test.login").finish();
        assert_eq!(request.names().last(), Some(&"api_sig"));
    }

    #[test]
    fn service_error_is_raised_before_mapping() {
        let (flickr, _) = Canned::client(&[r#"<rsp stat="fail"><err code="1" msg="User not found"/></rsp>"#]);
        let mut mapped = false;
        let err = flickr
            .core
            .call(HttpMethod::Get, flickr.core.request("flickr.people.findByEmail"), |_| mapped = true)
            .unwrap_err();
        assert!(!mapped);
        assert_eq!(err.code(), Some("1"));
    }

    #[test]
    fn missing_payload_is_malformed() {
        let (flickr, _) = Canned::client(&[r#"<rsp stat="ok"/>"#]);
        let err = flickr
            .core
            .call(HttpMethod::Get, flickr.core.request("flickr.people.getInfo"), |_| ())
            .unwrap_err();
        assert!(matches!(err, FlickrError::Transport(TransportError::MalformedDocument(_))));
    }

    #[test]
    fn from_config_installs_shared_secret() {
        let flickr = Flickr::from_config(ClientConfig::new("k").with_shared_secret("s"));
        assert_eq!(flickr.api_key(), "k");
        assert_eq!(flickr.auth_context().snapshot().shared_secret.as_deref(), Some("s"));
        assert_eq!(flickr.transport().config().base_url, "https://www.flickr.com");
    }
}
