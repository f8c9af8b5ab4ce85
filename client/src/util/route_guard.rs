//! Route guard: keeps signed-out users off protected pages and signed-in
//! users off the auth screens.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every routed view is wrapped in [`RouteGuard`]. The same protected-route
//! list drives the HTTP client's forced logout on 401, so a page the guard
//! protects is also a page an expired token gets bounced from.
//!
//! This is a UX guard only; the API still authenticates every request.

#[cfg(test)]
#[path = "route_guard_test.rs"]
mod route_guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};
use url::{Url, form_urlencoded};

use crate::state::auth::{AuthState, use_auth};

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const RETURN_TO_PARAM: &str = "returnTo";

/// Placeholder origin `returnTo` values are resolved against.
const LOCAL_ORIGIN: &str = "http://local.invalid";

/// Routes that require a session.
pub const PROTECTED_ROUTES: [&str; 3] = ["/", "/papers", "/upload-paper"];

/// Routes that only make sense without a session.
pub const AUTH_ROUTES: [&str; 5] = ["/login", "/signup", "/forgot-password", "/reset-password", "/verify-email"];

/// Segment-aware prefix match. `/` only matches itself.
#[must_use]
pub fn route_matches(route: &str, path: &str) -> bool {
    if route == HOME_PATH {
        return path == HOME_PATH;
    }
    path.strip_prefix(route)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

#[must_use]
pub fn is_protected_path(path: &str) -> bool {
    PROTECTED_ROUTES.iter().any(|route| route_matches(route, path))
}

#[must_use]
pub fn is_auth_path(path: &str) -> bool {
    AUTH_ROUTES.iter().any(|route| route_matches(route, path))
}

/// `/login?returnTo=<path>` with the path form-encoded.
#[must_use]
pub fn login_redirect(path: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(RETURN_TO_PARAM, path)
        .finish();
    format!("{LOGIN_PATH}?{query}")
}

/// Local `returnTo` target from a query string, with or without the `?`.
/// Anything a browser would resolve to another origin is ignored.
#[must_use]
pub fn return_to(search: &str) -> Option<String> {
    form_urlencoded::parse(search.trim_start_matches('?').as_bytes())
        .find(|(key, _)| key == RETURN_TO_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|target| is_same_origin_path(target))
}

fn is_same_origin_path(target: &str) -> bool {
    if !target.starts_with('/') {
        return false;
    }
    let Ok(base) = Url::parse(LOCAL_ORIGIN) else {
        return false;
    };
    base.join(target).is_ok_and(|joined| joined.origin() == base.origin())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session still resolving; render a neutral placeholder.
    Loading,
    Allow,
    Redirect(String),
}

/// Decide what the guard does for `path` given the current auth state.
#[must_use]
pub fn decide(auth: &AuthState, path: &str, search: &str, redirect_to: Option<&str>) -> GuardDecision {
    if auth.loading {
        return GuardDecision::Loading;
    }
    let signed_in = auth.is_authenticated();
    if !signed_in && is_protected_path(path) {
        return GuardDecision::Redirect(login_redirect(path));
    }
    if signed_in && is_auth_path(path) {
        let target = redirect_to
            .map(str::to_owned)
            .or_else(|| return_to(search))
            .unwrap_or_else(|| HOME_PATH.to_owned());
        return GuardDecision::Redirect(target);
    }
    GuardDecision::Allow
}

/// Render `children` only once [`decide`] allows the current location.
#[component]
pub fn RouteGuard(
    /// Where signed-in users land when they open an auth screen.
    #[prop(optional, into)]
    redirect_to: Option<String>,
    children: ChildrenFn,
) -> impl IntoView {
    let auth = use_auth();
    let location = use_location();
    let navigate = use_navigate();

    let decision = Memo::new(move |_| {
        decide(
            &auth.state().get(),
            &location.pathname.get(),
            &location.search.get(),
            redirect_to.as_deref(),
        )
    });

    Effect::new(move || {
        if let GuardDecision::Redirect(target) = decision.get() {
            navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    move || match decision.get() {
        GuardDecision::Allow => children().into_any(),
        GuardDecision::Loading => view! {
            <div class="guard-placeholder">
                <span class="spinner"></span>
            </div>
        }
        .into_any(),
        GuardDecision::Redirect(_) => view! {
            <div class="guard-placeholder">
                <p>"Redirecting..."</p>
            </div>
        }
        .into_any(),
    }
}
