//! Paper review page: metadata, PDF link and approve / reject.
//!
//! ARCHITECTURE
//! ============
//! The detail comes from the shared `PaperQueries` cache. A review decision
//! goes through `PaperQueries::update_status`, which invalidates the lists and
//! this detail; the page then bumps `revision` to refetch. No optimistic
//! update is applied, so a failure leaves the page exactly as it was.

#[cfg(test)]
#[path = "paper_test.rs"]
mod paper_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::form_error::FormErrors;
use crate::components::paper_table::StatusBadge;
use crate::components::review_dialog::{ApproveDialog, RejectDialog};
use crate::components::sidebar::Sidebar;
use crate::components::toast::use_toasts;
#[cfg(feature = "hydrate")]
use crate::error::ClientError;
use crate::net::types::{Paper, PaperStatus, StatusChange};
use crate::state::auth::use_auth;
use crate::state::papers::use_paper_queries;
use crate::util::validation::{FormInput, RejectForm};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Dialog {
    Approve,
    Reject,
}

fn parse_paper_id(raw: Option<String>) -> Option<u64> {
    raw?.trim().parse().ok()
}

/// Which review buttons make sense for a paper in `status`.
fn review_actions(status: PaperStatus) -> (bool, bool) {
    (status != PaperStatus::Published, status != PaperStatus::Rejected)
}

#[component]
pub fn PaperPage() -> impl IntoView {
    let queries = use_paper_queries();
    let toasts = use_toasts();
    let auth = use_auth();
    let params = use_params_map();

    let paper_id = Memo::new(move |_| parse_paper_id(params.with(|p| p.get("id"))));
    let paper = RwSignal::new(None::<Paper>);
    let load_error = RwSignal::new(None::<String>);
    let revision = RwSignal::new(0_u32);

    let dialog = RwSignal::new(None::<Dialog>);
    let reason = RwSignal::new(String::new());
    let reason_errors = FormErrors::new();
    let busy = RwSignal::new(false);

    {
        let queries = queries.clone();
        Effect::new(move || {
            revision.track();
            let Some(id) = paper_id.get() else {
                load_error.set(Some("Paper not found".to_owned()));
                return;
            };
            load_error.set(None);
            #[cfg(feature = "hydrate")]
            {
                let queries = queries.clone();
                leptos::task::spawn_local(async move {
                    match queries.detail(id).await {
                        Ok(found) => paper.set(Some(found)),
                        Err(ClientError::Auth(_)) => auth.on_unauthorized(),
                        Err(err) => {
                            log::warn!("paper {id} failed to load: {err}");
                            load_error.set(Some(err.to_string()));
                        }
                    }
                });
            }
            #[cfg(not(feature = "hydrate"))]
            let _ = (&queries, auth, id);
        });
    }

    let submit = move |change: StatusChange| {
        let Some(id) = paper_id.get_untracked() else {
            return;
        };
        busy.set(true);
        #[cfg(feature = "hydrate")]
        {
            let queries = queries.clone();
            leptos::task::spawn_local(async move {
                match queries.update_status(id, &change).await {
                    Ok(()) => {
                        let verb = match change {
                            StatusChange::Publish => "approved",
                            StatusChange::Reject(_) => "rejected",
                        };
                        toasts.success(format!("Paper {verb}"));
                        dialog.set(None);
                        reason.set(String::new());
                        revision.update(|r| *r += 1);
                    }
                    Err(err) => toasts.error(err.to_string()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&queries, toasts, id, change);
            busy.set(false);
        }
    };

    let submit_approve = submit.clone();
    let on_approve = Callback::new(move |()| submit_approve(StatusChange::Publish));
    let on_reject = Callback::new(move |()| {
        reason_errors.clear();
        match (RejectForm { reason: reason.get_untracked() }).parse() {
            Ok(valid) => submit(StatusChange::Reject(valid)),
            Err(errors) => reason_errors.show(errors.into()),
        }
    });
    let on_cancel = Callback::new(move |()| {
        if !busy.get_untracked() {
            dialog.set(None);
            reason_errors.clear();
        }
    });

    let details = move || {
        paper.get().map(|p| {
            let (can_approve, can_reject) = review_actions(p.status);
            let pdf = p.pdf_href();
            let keywords = p.keyword_names();
            view! {
                <header class="page-header page-header--split">
                    <div>
                        <a href="/" class="page-header__back">"‹ Back to papers"</a>
                        <h1 class="page-header__title">{p.title.clone()}</h1>
                        <p class="page-header__subtitle">
                            {p.user.name.clone()} " · " {p.user.email.clone()}
                        </p>
                    </div>
                    <div class="page-header__actions">
                        <StatusBadge status=p.status/>
                        <Show when=move || can_approve>
                            <button class="btn btn--primary" on:click=move |_| dialog.set(Some(Dialog::Approve))>
                                "Approve"
                            </button>
                        </Show>
                        <Show when=move || can_reject>
                            <button class="btn btn--danger" on:click=move |_| dialog.set(Some(Dialog::Reject))>
                                "Reject"
                            </button>
                        </Show>
                    </div>
                </header>
                <section class="panel paper-detail">
                    <dl class="paper-detail__meta">
                        <dt>"Uploaded"</dt>
                        <dd>{p.uploaded_on().to_owned()}</dd>
                        <dt>"Keywords"</dt>
                        <dd>{if keywords.is_empty() { "None".to_owned() } else { keywords }}</dd>
                        <dt>"Document"</dt>
                        <dd>
                            {match pdf {
                                Some(href) => view! {
                                    <a href=href target="_blank" rel="noopener">"View PDF"</a>
                                }
                                .into_any(),
                                None => view! { <span>"No file attached"</span> }.into_any(),
                            }}
                        </dd>
                    </dl>
                    <h2 class="paper-detail__heading">"Abstract"</h2>
                    <p class="paper-detail__abstract">{p.abstract_text.clone()}</p>
                    {p.notes.clone().filter(|n| !n.trim().is_empty()).map(|notes| {
                        view! {
                            <h2 class="paper-detail__heading">"Notes"</h2>
                            <p class="paper-detail__notes">{notes}</p>
                        }
                    })}
                </section>
            }
        })
    };

    let dialog_title = move || paper.with(|p| p.as_ref().map(|p| p.title.clone()).unwrap_or_default());

    view! {
        <div class="app-layout">
            <Sidebar/>
            <main class="app-main">
                <Show when=move || load_error.get().is_some()>
                    <div class="notice notice--error">
                        <p>{move || load_error.get().unwrap_or_default()}</p>
                        <a href="/">"Back to papers"</a>
                    </div>
                </Show>
                <Show when=move || paper.with(Option::is_none) && load_error.get().is_none()>
                    <div class="guard-placeholder">
                        <span class="spinner"></span>
                    </div>
                </Show>
                {details}
            </main>
            {move || match dialog.get() {
                Some(Dialog::Approve) => view! {
                    <ApproveDialog title=dialog_title() busy=busy on_cancel=on_cancel on_confirm=on_approve/>
                }
                .into_any(),
                Some(Dialog::Reject) => view! {
                    <RejectDialog
                        reason=reason
                        errors=reason_errors
                        busy=busy
                        on_cancel=on_cancel
                        on_confirm=on_reject
                    />
                }
                .into_any(),
                None => ().into_any(),
            }}
        </div>
    }
}
