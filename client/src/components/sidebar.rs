//! Collapsible navigation sidebar with the signed-in user and sign out.

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;

use crate::net::api::use_api;
use crate::state::auth::use_auth;
use crate::state::papers::use_paper_queries;
use crate::util::route_guard::{HOME_PATH, route_matches};

const NAV_ITEMS: [(&str, &str, &str); 2] = [("Dashboard", HOME_PATH, "⌂"), ("Upload paper", "/upload-paper", "⇪")];

#[component]
pub fn Sidebar() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let queries = use_paper_queries();
    let location = use_location();
    let navigate = use_navigate();
    let collapsed = RwSignal::new(false);
    let signing_out = RwSignal::new(false);

    let on_sign_out = move |_| {
        if signing_out.get() {
            return;
        }
        signing_out.set(true);
        #[cfg(feature = "hydrate")]
        {
            let api = api.clone();
            let queries = queries.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                auth.logout(&api).await;
                queries.reset();
                signing_out.set(false);
                navigate("/login", NavigateOptions::default());
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (&api, &queries, &navigate);
    };

    let initials = move || auth.user().map_or_else(|| "?".to_owned(), |u| u.initials());
    let user_name = move || auth.user().map(|u| u.name).unwrap_or_default();
    let user_email = move || auth.user().map(|u| u.email).unwrap_or_default();

    view! {
        <aside class="sidebar" class:sidebar--collapsed=move || collapsed.get()>
            <div class="sidebar__header">
                <Show when=move || !collapsed.get()>
                    <h1 class="sidebar__title">"Dashboard"</h1>
                </Show>
                <button
                    class="btn btn--ghost sidebar__toggle"
                    title="Toggle sidebar"
                    on:click=move |_| collapsed.update(|c| *c = !*c)
                >
                    {move || if collapsed.get() { "›" } else { "‹" }}
                </button>
            </div>

            <nav class="sidebar__nav">
                {NAV_ITEMS
                    .into_iter()
                    .map(|(label, href, icon)| {
                        let active = move || {
                            let path = location.pathname.get();
                            route_matches(href, &path) || (href == HOME_PATH && route_matches("/papers", &path))
                        };
                        view! {
                            <a href=href class="sidebar__link" class:sidebar__link--active=active>
                                <span class="sidebar__icon">{icon}</span>
                                <Show when=move || !collapsed.get()>
                                    <span>{label}</span>
                                </Show>
                            </a>
                        }
                    })
                    .collect_view()}
            </nav>

            <div class="sidebar__footer">
                <div class="sidebar__user">
                    <span class="sidebar__avatar">{initials}</span>
                    <Show when=move || !collapsed.get()>
                        <div class="sidebar__identity">
                            <p class="sidebar__name">{user_name}</p>
                            <p class="sidebar__email">{user_email}</p>
                        </div>
                    </Show>
                </div>
                <button class="btn btn--ghost sidebar__logout" on:click=on_sign_out disabled=move || signing_out.get()>
                    {move || if signing_out.get() { "Signing out..." } else { "Sign out" }}
                </button>
            </div>
        </aside>
    }
}
