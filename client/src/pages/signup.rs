//! Account registration with institution and areas of interest.

use leptos::prelude::*;

use crate::components::auth_shell::AuthShell;
use crate::components::form_error::{FieldError, FormErrors, RootError};
use crate::components::keyword_select::KeywordSelect;
use crate::net::api::use_api;
use crate::net::types::Institution;
use crate::util::validation::{SignupForm, fields};

#[component]
pub fn SignupPage() -> impl IntoView {
    let api = StoredValue::new(use_api());

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let institution = RwSignal::new(None::<u64>);
    let areas = RwSignal::new(Vec::<String>::new());
    let institutions = RwSignal::new(Vec::<Institution>::new());
    let institutions_error = RwSignal::new(false);

    let errors = FormErrors::new();
    let busy = RwSignal::new(false);
    let sent_to = RwSignal::new(None::<String>);

    #[cfg(feature = "hydrate")]
    {
        let api = api.get_value();
        leptos::task::spawn_local(async move {
            match api.list_institutions().await {
                Ok(list) => institutions.set(list),
                Err(err) => {
                    log::warn!("failed to load institutions: {err}");
                    institutions_error.set(true);
                }
            }
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        errors.clear();
        let form = SignupForm {
            name: name.get(),
            email: email.get(),
            password: password.get(),
            confirm_password: confirm.get(),
            institution_id: institution.get(),
            areas_of_interest: areas.get(),
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let api = api.get_value();
            leptos::task::spawn_local(async move {
                match api.sign_up(&form).await {
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

    let try_again = move |_| {
        sent_to.set(None);
        password.set(String::new());
        confirm.set(String::new());
        errors.clear();
    };

    let on_institution = move |ev| {
        let value = event_target_value(&ev);
        institution.set(value.parse::<u64>().ok());
    };

    view! {
        <Show
            when=move || sent_to.get().is_none()
            fallback=move || {
                view! {
                    <AuthShell title="Check your email">
                        <div class="notice notice--info">
                            <p>"We've sent a verification link to " <strong>{move || sent_to.get().unwrap_or_default()}</strong></p>
                            <p class="notice__detail">
                                "Please check your email and click the verification link to activate your account."
                            </p>
                        </div>
                        <p class="auth-card__footer">
                            "Didn't receive it? "
                            <button class="btn btn--link" on:click=try_again>"Try again"</button>
                        </p>
                        <a href="/login" class="btn btn--primary btn--block">"Back to login"</a>
                    </AuthShell>
                }
            }
        >
            <AuthShell title="Create an account" subtitle="Join DeSci NG to review submitted research">
                <RootError errors=errors/>
                <form class="auth-form" on:submit=on_submit novalidate=true>
                    <label class="field">
                        <span class="field__label">"Full name"</span>
                        <input
                            class="input"
                            type="text"
                            autocomplete="name"
                            prop:value=move || name.get()
                            on:input=move |ev| name.set(event_target_value(&ev))
                        />
                        <FieldError errors=errors field=fields::NAME/>
                    </label>
                    <label class="field">
                        <span class="field__label">"Email address"</span>
                        <input
                            class="input"
                            type="email"
                            autocomplete="email"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                        <FieldError errors=errors field=fields::EMAIL/>
                    </label>
                    <label class="field">
                        <span class="field__label">"Institution (optional)"</span>
                        <select class="input" on:change=on_institution>
                            <option value="">"Select your institution"</option>
                            <For
                                each=move || institutions.get()
                                key=|inst| inst.id
                                children=move |inst| {
                                    view! {
                                        <option value=inst.id.to_string() selected=move || institution.get() == Some(inst.id)>
                                            {inst.name}
                                        </option>
                                    }
                                }
                            />
                        </select>
                        <Show when=move || institutions_error.get()>
                            <p class="field-error">"Could not load institutions."</p>
                        </Show>
                    </label>
                    <div class="field">
                        <span class="field__label">"Areas of interest"</span>
                        <KeywordSelect selected=areas placeholder="Search or add areas of interest"/>
                    </div>
                    <label class="field">
                        <span class="field__label">"Password"</span>
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
                    <button class="btn btn--primary btn--block" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Create account" }}
                    </button>
                </form>
                <p class="auth-card__footer">
                    "Already have an account? " <a href="/login">"Sign in"</a>
                </p>
            </AuthShell>
        </Show>
    }
}
