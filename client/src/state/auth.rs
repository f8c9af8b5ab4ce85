//! Auth-session state for the current browser tab.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` provides one [`AuthContext`] for the whole tab. The route guard
//! reads it to decide redirects, the sidebar reads the signed-in user, and
//! the login page and sign-out button write it. All writes go through
//! `login`, `logout`, `resolve` and `on_unauthorized`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;

use crate::error::ClientError;
use crate::net::api::ApiClient;
use crate::net::http::{PageLocation, TokenStore, Transport};
use crate::net::types::User;

/// Current user plus whether the session query is still resolving.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { user: None, loading: true }
    }
}

impl AuthState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Settle the session query. Any error means "no session".
    pub fn resolve(&mut self, result: Result<Option<User>, ClientError>) {
        self.user = match result {
            Ok(user) => user,
            Err(err) => {
                if !matches!(err, ClientError::Auth(_)) {
                    log::warn!("session lookup failed: {err}");
                }
                None
            }
        };
        self.loading = false;
    }

    pub fn login(&mut self, user: User) {
        self.user = Some(user);
        self.loading = false;
    }

    pub fn logout(&mut self) {
        self.user = None;
        self.loading = false;
    }
}

/// Tab-wide handle on [`AuthState`].
#[derive(Clone, Copy, Debug)]
pub struct AuthContext {
    state: RwSignal<AuthState>,
}

impl AuthContext {
    #[must_use]
    pub fn new() -> Self {
        Self { state: RwSignal::new(AuthState::default()) }
    }

    #[must_use]
    pub fn state(&self) -> RwSignal<AuthState> {
        self.state
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.state.with(|s| s.user.clone())
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.with(AuthState::is_authenticated)
    }

    pub fn login(&self, user: User) {
        self.state.update(|s| s.login(user));
    }

    pub fn resolve(&self, result: Result<Option<User>, ClientError>) {
        self.state.update(|s| s.resolve(result));
    }

    pub fn on_unauthorized(&self) {
        self.state.update(AuthState::logout);
    }

    /// Run the session query and settle the state with its result.
    pub async fn refresh<T, S, L>(&self, api: &ApiClient<T, S, L>)
    where
        T: Transport,
        S: TokenStore,
        L: PageLocation,
    {
        let result = api.fetch_session().await;
        self.resolve(result);
    }

    /// Best-effort remote sign-out; the local session is always cleared.
    pub async fn logout<T, S, L>(&self, api: &ApiClient<T, S, L>)
    where
        T: Transport,
        S: TokenStore,
        L: PageLocation,
    {
        if let Err(err) = api.sign_out().await {
            log::warn!("remote sign-out failed: {err}");
        }
        self.state.update(AuthState::logout);
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the tab's auth context and provide it to descendants.
pub fn provide_auth() -> AuthContext {
    let auth = AuthContext::new();
    provide_context(auth);
    auth
}

/// The tab's auth context.
///
/// # Panics
///
/// Panics when called outside the `App` root that provides it.
#[must_use]
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("use_auth called outside the App root that provides AuthContext")
}
