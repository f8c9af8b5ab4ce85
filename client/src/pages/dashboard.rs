//! Dashboard page listing submitted papers for review.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. Status tabs, the debounced search
//! box and the pagination strip all write into one `PaperFilters` signal; the
//! derived `PaperListKey` drives a cached list query.
//!
//! INVARIANTS
//! ==========
//! A response is applied only while its key is still the current key, so a
//! slow page-2 fetch never overwrites a newer page-3 result.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::components::pagination::Pagination;
use crate::components::paper_table::PaperTable;
use crate::components::sidebar::Sidebar;
#[cfg(feature = "hydrate")]
use crate::error::ClientError;
use crate::net::types::{PaperList, PaperStatus};
use crate::state::auth::use_auth;
use crate::state::papers::{PaperFilters, use_paper_queries};
use crate::util::debounce::{Debouncer, SEARCH_DEBOUNCE_MS};

/// "Showing 11-20 of 42 papers" style summary for the current page.
fn list_summary(list: &PaperList, page: u32) -> String {
    if list.total == 0 || list.data.is_empty() {
        return "No papers found".to_owned();
    }
    let first = u64::from(page.saturating_sub(1)).saturating_mul(list.size).saturating_add(1);
    let last = first.saturating_add(list.data.len() as u64 - 1);
    format!("Showing {first}-{last} of {} papers", list.total)
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let queries = use_paper_queries();
    let auth = use_auth();
    let filters = RwSignal::new(PaperFilters::default());
    let list = RwSignal::new(None::<PaperList>);
    let loading = RwSignal::new(true);
    let load_error = RwSignal::new(None::<String>);
    let debouncer = Debouncer::new();

    let key = Memo::new(move |_| filters.with(|f| f.key(None)));

    Effect::new(move || {
        let current = key.get();
        loading.set(true);
        load_error.set(None);
        #[cfg(feature = "hydrate")]
        {
            let queries = queries.clone();
            leptos::task::spawn_local(async move {
                let result = queries.list(&current).await;
                if key.get_untracked() != current {
                    return;
                }
                match result {
                    Ok(page) => list.set(Some(page)),
                    Err(ClientError::Auth(_)) => auth.on_unauthorized(),
                    Err(err) => {
                        log::warn!("paper list failed: {err}");
                        load_error.set(Some(err.to_string()));
                    }
                }
                loading.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (&queries, auth, current);
    });

    let on_search = move |ev| {
        let value = event_target_value(&ev);
        filters.update(|f| f.search_input = value);
        debouncer.call(SEARCH_DEBOUNCE_MS, move || {
            filters.update(|f| {
                f.commit_search();
            });
        });
    };

    let papers = Signal::derive(move || list.with(|l| l.as_ref().map(|l| l.data.clone()).unwrap_or_default()));
    let total_pages = Signal::derive(move || list.with(|l| l.as_ref().map_or(1, PaperList::total_pages)));
    let current_page = Signal::derive(move || filters.with(|f| f.page));
    let on_page = Callback::new(move |page: u32| {
        let total = total_pages.get_untracked();
        filters.update(|f| f.set_page(page, total));
    });

    let summary = move || list.with(|l| l.as_ref().map(|l| list_summary(l, current_page.get())));

    view! {
        <div class="app-layout">
            <Sidebar/>
            <main class="app-main">
                <header class="page-header">
                    <h1 class="page-header__title">"Dashboard"</h1>
                    <p class="page-header__subtitle">"Welcome back! Here's an overview of submitted papers."</p>
                </header>

                <section class="panel">
                    <div class="panel__toolbar">
                        <div class="tabs" role="tablist">
                            {PaperStatus::ALL
                                .into_iter()
                                .map(|status| {
                                    let active = move || filters.with(|f| f.status == status);
                                    view! {
                                        <button
                                            class="tabs__tab"
                                            class:tabs__tab--active=active
                                            role="tab"
                                            aria-selected=move || active().to_string()
                                            on:click=move |_| filters.update(|f| f.set_status(status))
                                        >
                                            {status.label()}
                                        </button>
                                    }
                                })
                                .collect_view()}
                        </div>
                        <input
                            class="input panel__search"
                            type="search"
                            placeholder="Search papers..."
                            prop:value=move || filters.with(|f| f.search_input.clone())
                            on:input=on_search
                        />
                    </div>

                    <Show when=move || load_error.get().is_some()>
                        <div class="notice notice--error">
                            <p>{move || load_error.get().unwrap_or_default()}</p>
                        </div>
                    </Show>

                    <PaperTable papers=papers loading=loading/>

                    <div class="panel__footer">
                        <span class="panel__summary">{summary}</span>
                        <Pagination current=current_page total=total_pages on_change=on_page/>
                    </div>
                </section>
            </main>
        </div>
    }
}
