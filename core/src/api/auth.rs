//! `flickr.auth.*`: the frob/token exchange.
//!
//! The flow is: get a frob, send the user to
//! [`build_authentication_url`](AuthInterface::build_authentication_url),
//! then trade the frob for a token with [`get_token`](AuthInterface::get_token)
//! and install it with [`AuthContext::set_auth`](crate::AuthContext::set_auth).
//! Every call here is signed.

use std::sync::Arc;

use crate::client::Core;
use crate::context::{Auth, Permission};
use crate::error::{FlickrError, Result};
use crate::http::HttpMethod;
use crate::mapping;
use crate::params::{encode_form, signature, Parameter};
use crate::transport::AUTH_PATH;
use crate::xml::Element;

pub const METHOD_GET_FROB: &str = "flickr.auth.getFrob";
pub const METHOD_GET_TOKEN: &str = "flickr.auth.getToken";
pub const METHOD_GET_FULL_TOKEN: &str = "flickr.auth.getFullToken";
pub const METHOD_CHECK_TOKEN: &str = "flickr.auth.checkToken";

#[derive(Debug)]
pub struct AuthInterface {
    core: Arc<Core>,
}

impl AuthInterface {
    pub(crate) fn new(core: Arc<Core>) -> Self {
        Self { core }
    }

    pub fn get_frob(&self) -> Result<String> {
        let request = self.core.request_without_token(METHOD_GET_FROB).signed();
        self.core.call(HttpMethod::Get, request, Element::text)
    }

    pub fn get_token(&self, frob: &str) -> Result<Auth> {
        let request = self
            .core
            .request_without_token(METHOD_GET_TOKEN)
            .param("frob", frob)
            .signed();
        self.core.call(HttpMethod::Get, request, mapping::auth)
    }

    /// Exchange a mini-token (the 9-digit code shown to mobile users).
    pub fn get_full_token(&self, mini_token: &str) -> Result<Auth> {
        let request = self
            .core
            .request_without_token(METHOD_GET_FULL_TOKEN)
            .param("mini_token", mini_token.replace('-', ""))
            .signed();
        self.core.call(HttpMethod::Get, request, mapping::auth)
    }

    pub fn check_token(&self, token: &str) -> Result<Auth> {
        let request = self
            .core
            .request_without_token(METHOD_CHECK_TOKEN)
            .param("auth_token", token)
            .signed();
        self.core.call(HttpMethod::Get, request, mapping::auth)
    }

    /// The page where the user grants `permission` for `frob`.
    ///
    /// Needs a shared secret to sign the URL.
    pub fn build_authentication_url(&self, permission: Permission, frob: &str) -> Result<String> {
        let secret = self
            .core
            .auth()
            .snapshot()
            .shared_secret
            .clone()
            .ok_or_else(|| FlickrError::Config("a shared secret is required to sign the authentication URL".into()))?;

        let mut params = vec![
            Parameter::new("api_key", self.core.api_key()),
            Parameter::new("perms", permission.as_str()),
            Parameter::new("frob", frob),
        ];
        let sig = signature(&secret, &params);
        params.push(Parameter::new("api_sig", sig));

        let url = self.core.transport().config().url(AUTH_PATH);
        Ok(format!("{url}?{}", encode_form(&params)))
    }
}
