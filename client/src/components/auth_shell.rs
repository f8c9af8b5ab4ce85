//! Centered card layout shared by the auth screens.

use leptos::prelude::*;

#[component]
pub fn AuthShell(
    #[prop(into)] title: String,
    #[prop(optional, into)] subtitle: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="auth-page">
            <main class="auth-card">
                <a href="/" class="auth-card__logo">"DeSci NG"</a>
                <h1 class="auth-card__title">{title}</h1>
                {subtitle.map(|s| view! { <p class="auth-card__subtitle">{s}</p> })}
                {children()}
            </main>
        </div>
    }
}

/// Spinner for in-progress screens.
#[component]
pub fn Spinner() -> impl IntoView {
    view! { <span class="spinner" aria-label="Loading"></span> }
}
