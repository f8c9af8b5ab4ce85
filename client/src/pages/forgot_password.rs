//! Request a password reset link by email.

use leptos::prelude::*;

use crate::components::auth_shell::AuthShell;
use crate::components::form_error::{FieldError, FormErrors, RootError};
use crate::net::api::use_api;
use crate::util::validation::{ForgotPasswordForm, fields};

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let api = StoredValue::new(use_api());

    let email = RwSignal::new(String::new());
    let errors = FormErrors::new();
    let busy = RwSignal::new(false);
    let sent_to = RwSignal::new(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        errors.clear();
        let form = ForgotPasswordForm { email: email.get() };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let api = api.get_value();
            leptos::task::spawn_local(async move {
                match api.forget_password(&form).await {
                    Ok(()) => sent_to.set(Some(form.email.trim().to_owned())),
                    Err(err) => errors.show(err),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (api, form);
            busy.set(false);
        }
    };

    view! {
        <Show
            when=move || sent_to.get().is_none()
            fallback=move || {
                view! {
                    <AuthShell title="Check your email">
                        <div class="notice notice--info">
                            <p>
                                "If an account exists for " <strong>{move || sent_to.get().unwrap_or_default()}</strong>
                                ", a password reset link is on its way."
                            </p>
                        </div>
                        <a href="/login" class="btn btn--primary btn--block">"Back to login"</a>
                    </AuthShell>
                }
            }
        >
            <AuthShell title="Forgot password?" subtitle="Enter your email and we'll send you a reset link">
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
                    <button class="btn btn--primary btn--block" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Sending..." } else { "Send reset link" }}
                    </button>
                </form>
                <p class="auth-card__footer">
                    "Remembered it? " <a href="/login">"Back to login"</a>
                </p>
            </AuthShell>
        </Show>
    }
}
