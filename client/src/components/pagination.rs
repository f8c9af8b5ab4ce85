//! Prev / page numbers / next strip under the paper table.

use leptos::prelude::*;

use crate::util::pagination::{PageItem, has_next, has_prev, page_items};

#[component]
pub fn Pagination(
    #[prop(into)] current: Signal<u32>,
    #[prop(into)] total: Signal<u32>,
    on_change: Callback<u32>,
) -> impl IntoView {
    move || {
        let page = current.get();
        let pages = total.get();
        let items = page_items(page, pages);
        (!items.is_empty()).then(|| {
            view! {
                <nav class="pagination" aria-label="Pagination">
                    <button
                        class="pagination__step"
                        disabled=!has_prev(page)
                        on:click=move |_| on_change.run(page.saturating_sub(1).max(1))
                    >
                        "‹ Prev"
                    </button>
                    {items
                        .into_iter()
                        .map(|item| match item {
                            PageItem::Page(n) => {
                                let class = if n == page { "pagination__page pagination__page--active" } else { "pagination__page" };
                                view! {
                                    <button class=class on:click=move |_| on_change.run(n)>{n}</button>
                                }
                                .into_any()
                            }
                            PageItem::Ellipsis => view! { <span class="pagination__gap">"…"</span> }.into_any(),
                        })
                        .collect_view()}
                    <button
                        class="pagination__step"
                        disabled=!has_next(page, pages)
                        on:click=move |_| on_change.run((page + 1).min(pages))
                    >
                        "Next ›"
                    </button>
                </nav>
            }
        })
    }
}
