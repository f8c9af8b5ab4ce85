//! Creatable keyword multi-select fed by debounced keyword search.

use leptos::prelude::*;

use crate::net::api::use_api;
use crate::net::types::Keyword;
use crate::util::debounce::{Debouncer, SEARCH_DEBOUNCE_MS};

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v.eq_ignore_ascii_case(value)) {
        list.push(value.to_owned());
    }
}

/// Picked keywords go to `selected`; typed ones the search did not return go
/// to `created` when provided, otherwise to `selected` as well.
#[component]
pub fn KeywordSelect(
    selected: RwSignal<Vec<String>>,
    #[prop(optional)] created: Option<RwSignal<Vec<String>>>,
    #[prop(optional, into)] placeholder: Option<String>,
) -> impl IntoView {
    let api = use_api();
    let query = RwSignal::new(String::new());
    let options = RwSignal::new(Vec::<Keyword>::new());
    let debouncer = Debouncer::new();
    let placeholder = placeholder.unwrap_or_else(|| "Search keywords...".to_owned());

    let on_input = move |ev| {
        let text = event_target_value(&ev);
        query.set(text.clone());
        let api = api.clone();
        debouncer.call(SEARCH_DEBOUNCE_MS, move || {
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                let found = api.search_keywords(&text).await;
                if query.get_untracked() == text {
                    options.set(found);
                }
            });
            #[cfg(not(feature = "hydrate"))]
            let _ = (api, text);
        });
    };

    let pick = move |name: String| {
        selected.update(|s| push_unique(s, &name));
        query.set(String::new());
        options.set(Vec::new());
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() != "Enter" {
            return;
        }
        ev.prevent_default();
        let text = query.get_untracked().trim().to_owned();
        if text.is_empty() {
            return;
        }
        let known = options.with_untracked(|o| o.iter().any(|k| k.name.eq_ignore_ascii_case(&text)));
        match created {
            Some(created) if !known => created.update(|c| push_unique(c, &text)),
            _ => selected.update(|s| push_unique(s, &text)),
        }
        query.set(String::new());
        options.set(Vec::new());
    };

    let chips = move || {
        let mut chips: Vec<(String, bool)> = selected.get().into_iter().map(|k| (k, false)).collect();
        if let Some(created) = created {
            chips.extend(created.get().into_iter().map(|k| (k, true)));
        }
        chips
    };

    view! {
        <div class="keyword-select">
            <div class="keyword-select__chips">
                <For
                    each=chips
                    key=|(name, is_new)| (name.clone(), *is_new)
                    children=move |(name, is_new)| {
                        let label = if is_new { format!("{name} (new)") } else { name.clone() };
                        let on_remove = move |_| {
                            let target = if is_new { created } else { Some(selected) };
                            if let Some(list) = target {
                                list.update(|l| l.retain(|k| k != &name));
                            }
                        };
                        view! {
                            <span class="chip">
                                {label}
                                <button type="button" class="chip__remove" on:click=on_remove>"×"</button>
                            </span>
                        }
                    }
                />
            </div>
            <input
                class="input"
                type="text"
                placeholder=placeholder
                prop:value=move || query.get()
                on:input=on_input
                on:keydown=on_keydown
            />
            <Show when=move || options.with(|o| !o.is_empty())>
                <ul class="keyword-select__options">
                    <For
                        each=move || options.get()
                        key=|keyword| keyword.id
                        children=move |keyword| {
                            let name = keyword.name.clone();
                            view! {
                                <li>
                                    <button type="button" class="keyword-select__option" on:click=move |_| pick(name.clone())>
                                        {keyword.name}
                                    </button>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </div>
    }
}
