//! Choose a new password from an emailed reset link.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::components::auth_shell::AuthShell;
use crate::components::form_error::{FieldError, FormErrors, RootError};
use crate::components::toast::use_toasts;
use crate::net::api::use_api;
use crate::util::validation::{NewPasswordForm, fields};

const FORGOT_PASSWORD_PATH: &str = "/forgot-password";

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let api = use_api();
    let toasts = use_toasts();
    let navigate = use_navigate();
    let query = use_query_map();

    let token = Memo::new(move |_| query.with(|q| q.get("token")).filter(|t| !t.trim().is_empty()));

    {
        let navigate = navigate.clone();
        Effect::new(move || {
            if token.get().is_none() {
                navigate(FORGOT_PASSWORD_PATH, NavigateOptions { replace: true, ..NavigateOptions::default() });
            }
        });
    }

    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let errors = FormErrors::new();
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        errors.clear();
        let form = NewPasswordForm { password: password.get(), confirm_password: confirm.get() };
        let token = token.get_untracked().unwrap_or_default();
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let api = api.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match api.reset_password(&token, &form).await {
                    Ok(()) => {
                        toasts.success("Password updated. Sign in with your new password.");
                        navigate("/login", NavigateOptions::default());
                    }
                    Err(err) => errors.show(err),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&api, &navigate, toasts, token, form);
            busy.set(false);
        }
    };

    view! {
        <AuthShell title="Set a new password" subtitle="Choose a password with at least 8 characters">
            <RootError errors=errors/>
            <FieldError errors=errors field=fields::TOKEN/>
            <form class="auth-form" on:submit=on_submit novalidate=true>
                <label class="field">
                    <span class="field__label">"New password"</span>
                    <input
                        class="input"
                        type="password"
                        autocomplete="new-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <FieldError errors=errors field=fields::PASSWORD/>
                </label>
                <label class="field">
                    <span class="field__label">"Confirm password"</span>
                    <input
                        class="input"
                        type="password"
                        autocomplete="new-password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                    <FieldError errors=errors field=fields::CONFIRM_PASSWORD/>
                </label>
                <button class="btn btn--primary btn--block" type="submit" disabled=move || busy.get() || token.get().is_none()>
                    {move || if busy.get() { "Resetting..." } else { "Reset password" }}
                </button>
            </form>
            <p class="auth-card__footer">
                <a href="/login">"Back to login"</a>
            </p>
        </AuthShell>
    }
}
