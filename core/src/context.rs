//! Shared authentication state.
//!
//! # Design
//! Every resource interface reads the same `AuthContext`. The state lives
//! behind a `RwLock<Arc<AuthState>>`: writers build a whole new `AuthState`
//! and swap the `Arc`, readers clone the `Arc` and work from that snapshot.
//! A call therefore never sees a secret from one session paired with a
//! token from another.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::params::Parameter;
use crate::types::User;

/// Access level granted to a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    None,
    Read,
    Write,
    Delete,
}

impl Permission {
    pub fn as_str(self) -> &'static str {
        match self {
            Permission::None => "none",
            Permission::Read => "read",
            Permission::Write => "write",
            Permission::Delete => "delete",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Permission::None),
            "read" => Ok(Permission::Read),
            "write" => Ok(Permission::Write),
            "delete" => Ok(Permission::Delete),
            other => Err(format!("unknown permission: {other}")),
        }
    }
}

/// A granted authentication token and what it may do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auth {
    pub token: String,
    pub permission: Permission,
    pub user: Option<User>,
}

impl Auth {
    pub fn new(token: impl Into<String>, permission: Permission) -> Self {
        Self {
            token: token.into(),
            permission,
            user: None,
        }
    }

    /// Parameters injected into every outgoing request.
    pub fn as_parameters(&self) -> Vec<Parameter> {
        vec![Parameter::new("auth_token", self.token.as_str())]
    }
}

/// One consistent view of the authentication state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub shared_secret: Option<String>,
    pub auth: Option<Auth>,
}

impl AuthState {
    pub fn permission(&self) -> Option<Permission> {
        self.auth.as_ref().map(|a| a.permission)
    }

    pub fn parameters(&self) -> Vec<Parameter> {
        self.auth.as_ref().map(Auth::as_parameters).unwrap_or_default()
    }
}

/// Holder of the current [`AuthState`], shared by reference across
/// interfaces and threads.
#[derive(Debug, Default)]
pub struct AuthContext {
    state: RwLock<Arc<AuthState>>,
}

impl AuthContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(secret: impl Into<String>) -> Self {
        let ctx = Self::new();
        ctx.set_shared_secret(Some(secret.into()));
        ctx
    }

    /// The current state. Later updates do not affect the returned snapshot.
    pub fn snapshot(&self) -> Arc<AuthState> {
        Arc::clone(&*self.state.read())
    }

    /// Replace the whole state atomically.
    pub fn replace(&self, state: AuthState) {
        *self.state.write() = Arc::new(state);
    }

    pub fn set_shared_secret(&self, secret: Option<String>) {
        self.update(|s| s.shared_secret = secret);
    }

    pub fn set_auth(&self, auth: Option<Auth>) {
        self.update(|s| s.auth = auth);
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().auth.is_some()
    }

    fn update(&self, f: impl FnOnce(&mut AuthState)) {
        let mut guard = self.state.write();
        let mut next = AuthState::clone(&**guard);
        f(&mut next);
        *guard = Arc::new(next);
        tracing::debug!(
            has_secret = guard.shared_secret.is_some(),
            has_token = guard.auth.is_some(),
            "authentication context updated"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_round_trips_through_strings() {
        for p in [Permission::None, Permission::Read, Permission::Write, Permission::Delete] {
            assert_eq!(p.as_str().parse::<Permission>().unwrap(), p);
        }
        assert!("admin".parse::<Permission>().is_err());
    }

    #[test]
    fn permissions_are_ordered_by_privilege() {
        assert!(Permission::Read < Permission::Write);
        assert!(Permission::Write < Permission::Delete);
    }

    #[test]
    fn empty_context_injects_nothing() {
        let ctx = AuthContext::new();
        assert!(ctx.snapshot().parameters().is_empty());
        assert!(!ctx.is_authenticated());
    }

    #[test]
    fn token_is_injected_as_auth_token() {
        let ctx = AuthContext::new();
        ctx.set_auth(Some(Auth::new("tok-1", Permission::Write)));
        let params = ctx.snapshot().parameters();
        assert_eq!(params, vec![Parameter::new("auth_token", "tok-1")]);
        assert_eq!(ctx.snapshot().permission(), Some(Permission::Write));
    }

    #[test]
    fn snapshot_is_unaffected_by_later_updates() {
        let ctx = AuthContext::with_secret("s1");
        let before = ctx.snapshot();
        ctx.set_shared_secret(Some("s2".to_string()));
        ctx.set_auth(Some(Auth::new("t", Permission::Read)));

        assert_eq!(before.shared_secret.as_deref(), Some("s1"));
        assert!(before.auth.is_none());
        assert_eq!(ctx.snapshot().shared_secret.as_deref(), Some("s2"));
    }

    #[test]
    fn concurrent_readers_see_whole_states() {
        let ctx = Arc::new(AuthContext::new());
        ctx.replace(AuthState {
            shared_secret: Some("a".to_string()),
            auth: Some(Auth::new("a", Permission::Read)),
        });

        let writer = {
            let ctx = Arc::clone(&ctx);
            std::thread::spawn(move || {
                for i in 0..500 {
                    let tag = if i % 2 == 0 { "a" } else { "b" };
                    ctx.replace(AuthState {
                        shared_secret: Some(tag.to_string()),
                        auth: Some(Auth::new(tag, Permission::Read)),
                    });
                }
            })
        };

        for _ in 0..500 {
            let snap = ctx.snapshot();
            let token = snap.auth.as_ref().map(|a| a.token.as_str());
            assert_eq!(snap.shared_secret.as_deref(), token);
        }
        writer.join().unwrap();
    }
}
