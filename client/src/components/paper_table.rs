//! Paper table with sortable title/author columns and a title filter.

use leptos::prelude::*;

use crate::net::types::{Paper, PaperStatus};
use crate::util::table::{SortColumn, SortDirection, TableSort, visible_rows};

#[must_use]
pub fn status_badge_class(status: PaperStatus) -> &'static str {
    match status {
        PaperStatus::Published => "badge badge--published",
        PaperStatus::Pending => "badge badge--pending",
        PaperStatus::Rejected => "badge badge--rejected",
    }
}

#[component]
pub fn StatusBadge(status: PaperStatus) -> impl IntoView {
    view! { <span class=status_badge_class(status)>{status.label()}</span> }
}

#[component]
pub fn PaperTable(#[prop(into)] papers: Signal<Vec<Paper>>, #[prop(into)] loading: Signal<bool>) -> impl IntoView {
    let sort = RwSignal::new(TableSort::default());
    let filter = RwSignal::new(String::new());

    let rows = Memo::new(move |_| papers.with(|p| visible_rows(p, &filter.get(), sort.get())));

    let arrow = move |column: SortColumn| {
        move || match sort.get().direction(column) {
            Some(SortDirection::Asc) => "↑",
            Some(SortDirection::Desc) => "↓",
            None => "↕",
        }
    };

    view! {
        <div class="paper-table">
            <div class="paper-table__toolbar">
                <input
                    class="input paper-table__filter"
                    type="search"
                    placeholder="Filter titles on this page..."
                    prop:value=move || filter.get()
                    on:input=move |ev| filter.set(event_target_value(&ev))
                />
            </div>
            <table class="table">
                <thead>
                    <tr>
                        <th>
                            <button class="table__sort" on:click=move |_| sort.update(|s| s.toggle(SortColumn::Title))>
                                "Title " {arrow(SortColumn::Title)}
                            </button>
                        </th>
                        <th>
                            <button class="table__sort" on:click=move |_| sort.update(|s| s.toggle(SortColumn::Author))>
                                "Author " {arrow(SortColumn::Author)}
                            </button>
                        </th>
                        <th>"Status"</th>
                        <th>"Uploaded"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <Show
                        when=move || !loading.get()
                        fallback=|| view! { <tr><td colspan="5" class="table__empty">"Loading papers..."</td></tr> }
                    >
                        <Show
                            when=move || rows.with(|r| !r.is_empty())
                            fallback=|| view! { <tr><td colspan="5" class="table__empty">"No papers found."</td></tr> }
                        >
                            <For
                                each=move || rows.get()
                                key=|paper| (paper.id, paper.status)
                                children=move |paper| {
                                    let href = format!("/papers/{}", paper.id);
                                    let author = format!("{}, {}", paper.user.name, paper.user.email);
                                    let uploaded = paper.uploaded_on().to_owned();
                                    view! {
                                        <tr>
                                            <td><a href=href.clone() class="table__link">{paper.title}</a></td>
                                            <td>{author}</td>
                                            <td><StatusBadge status=paper.status/></td>
                                            <td>{uploaded}</td>
                                            <td><a href=href class="btn btn--ghost">"Review"</a></td>
                                        </tr>
                                    }
                                }
                            />
                        </Show>
                    </Show>
                </tbody>
            </table>
        </div>
    }
}
