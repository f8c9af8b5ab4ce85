//! Email + password login.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::components::auth_shell::AuthShell;
use crate::components::form_error::{FieldError, FormErrors, RootError};
#[cfg(any(test, feature = "hydrate"))]
use crate::error::ClientError;
use crate::net::api::use_api;
use crate::state::auth::use_auth;
#[cfg(any(test, feature = "hydrate"))]
use crate::util::route_guard::{HOME_PATH, return_to};
use crate::util::validation::{LoginForm, fields};

#[cfg(any(test, feature = "hydrate"))]
const VERIFY_EMAIL_HINT: &str =
    "Please verify your email address before signing in. Check your email for a verification link.";

/// Provider errors about an unverified address become a friendlier hint.
#[cfg(any(test, feature = "hydrate"))]
fn login_error(err: ClientError) -> ClientError {
    let message = err.to_string().to_ascii_lowercase();
    if !matches!(err, ClientError::Validation(_)) && (message.contains("verify") || message.contains("verification")) {
        return ClientError::Remote { status: err.status().unwrap_or(403), message: VERIFY_EMAIL_HINT.to_owned() };
    }
    err
}

/// Post-login destination: a local `returnTo`, else home.
#[cfg(any(test, feature = "hydrate"))]
fn after_login_target(search: &str) -> String {
    return_to(search).unwrap_or_else(|| HOME_PATH.to_owned())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let api = use_api();
    let auth = use_auth();
    let navigate = use_navigate();
    let location = use_location();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = FormErrors::new();
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        errors.clear();
        let form = LoginForm { email: email.get(), password: password.get() };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let api = api.clone();
            let navigate = navigate.clone();
            let target = after_login_target(&location.search.get_untracked());
            leptos::task::spawn_local(async move {
                match api.sign_in(&form).await {
                    Ok(user) => {
                        log::info!("signed in as {}", user.email);
                        auth.login(user);
                        navigate(&target, NavigateOptions::default());
                    }
                    Err(err) => errors.show(login_error(err)),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&api, &navigate, &location, auth, form);
            busy.set(false);
        }
    };

    view! {
        <AuthShell title="Welcome to DeSci NG" subtitle="Enter your login details below">
            <RootError errors=errors/>
            <form class="auth-form" on:submit=on_submit novalidate=true>
                <label class="field">
                    <span class="field__label">"Email address"</span>
                    <input
                        class="input"
                        type="email"
                        autocomplete="email"
                        placeholder="Enter your email address"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <FieldError errors=errors field=fields::EMAIL/>
                </label>
                <label class="field">
                    <span class="field__label">"Password"</span>
                    <input
                        class="input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Enter your password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <FieldError errors=errors field=fields::PASSWORD/>
                </label>
                <div class="auth-form__aside">
                    <a href="/forgot-password">"Forgot password?"</a>
                </div>
                <button class="btn btn--primary btn--block" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
            <p class="auth-card__footer">
                "Don't have an account? " <a href="/signup">"Sign up"</a>
            </p>
        </AuthShell>
    }
}
