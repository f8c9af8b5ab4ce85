//! Email verification landing page.
//!
//! The page fires the verification call once on mount with the `token` query
//! parameter and renders one of four states. A missing token never reaches
//! the network.

#[cfg(test)]
#[path = "verify_email_test.rs"]
mod verify_email_test;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::auth_shell::{AuthShell, Spinner};
use crate::error::ClientError;
use crate::net::api::use_api;

pub const INVALID_LINK_MESSAGE: &str = "Invalid verification link";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerifyStatus {
    Loading,
    Success,
    Expired,
    Error(String),
}

impl VerifyStatus {
    /// Map the verification outcome onto a screen state.
    #[must_use]
    pub fn from_result(result: Result<(), ClientError>) -> Self {
        match result {
            Ok(()) => Self::Success,
            Err(err) if err.is_expired() => Self::Expired,
            Err(err) => Self::Error(err.to_string()),
        }
    }
}

#[component]
pub fn VerifyEmailPage() -> impl IntoView {
    let api = use_api();
    let query = use_query_map();
    let status = RwSignal::new(VerifyStatus::Loading);

    let token = query.with_untracked(|q| q.get("token")).unwrap_or_default();
    if token.trim().is_empty() {
        status.set(VerifyStatus::Error(INVALID_LINK_MESSAGE.to_owned()));
    } else {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = api.verify_email(&token).await;
            status.set(VerifyStatus::from_result(result));
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (&api, token);
    }

    move || match status.get() {
        VerifyStatus::Loading => view! {
            <AuthShell title="Verifying your email">
                <div class="verify-state">
                    <Spinner/>
                    <p>"Please wait while we confirm your address."</p>
                </div>
            </AuthShell>
        }
        .into_any(),
        VerifyStatus::Success => view! {
            <AuthShell title="Email verified">
                <div class="notice notice--success">
                    <p>"Your email address has been verified. You can now sign in."</p>
                </div>
                <a href="/login" class="btn btn--primary btn--block">"Continue to login"</a>
            </AuthShell>
        }
        .into_any(),
        VerifyStatus::Expired => view! {
            <AuthShell title="Link expired">
                <div class="notice notice--warning">
                    <p>"This verification link has expired. Sign up again to receive a new one."</p>
                </div>
                <a href="/signup" class="btn btn--primary btn--block">"Back to sign up"</a>
            </AuthShell>
        }
        .into_any(),
        VerifyStatus::Error(message) => view! {
            <AuthShell title="Verification failed">
                <div class="notice notice--error">
                    <p>{message}</p>
                </div>
                <a href="/login" class="btn btn--primary btn--block">"Back to login"</a>
            </AuthShell>
        }
        .into_any(),
    }
}
