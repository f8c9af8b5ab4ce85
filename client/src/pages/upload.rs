//! Paper submission form.

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::form_error::{FieldError, FormErrors, RootError};
use crate::components::keyword_select::KeywordSelect;
use crate::components::sidebar::Sidebar;
use crate::components::toast::use_toasts;
#[cfg(feature = "hydrate")]
use crate::error::ClientError;
use crate::net::http::FilePart;
use crate::state::papers::use_paper_queries;
use crate::util::validation::{FormInput, UploadForm, fields};

/// Read the first file of an `<input type="file">` change event.
#[cfg(feature = "hydrate")]
async fn read_selected_file(ev: &leptos::ev::Event) -> Option<FilePart> {
    use wasm_bindgen::JsCast;

    let input = ev.target()?.dyn_into::<web_sys::HtmlInputElement>().ok()?;
    let file = input.files()?.get(0)?;
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await.ok()?;
    Some(FilePart {
        file_name: file.name(),
        content_type: file.type_(),
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    })
}

#[component]
pub fn UploadPage() -> impl IntoView {
    let queries = use_paper_queries();
    let toasts = use_toasts();
    let navigate = use_navigate();

    let title = RwSignal::new(String::new());
    let abstract_text = RwSignal::new(String::new());
    let category_id = RwSignal::new(String::new());
    let field_id = RwSignal::new(String::new());
    let keywords = RwSignal::new(Vec::<String>::new());
    let new_keywords = RwSignal::new(Vec::<String>::new());
    let notes = RwSignal::new(String::new());
    let file = RwSignal::new(None::<FilePart>);

    let errors = FormErrors::new();
    let busy = RwSignal::new(false);

    let on_file = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            file.set(read_selected_file(&ev).await);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (ev, file);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        errors.clear();
        let form = UploadForm {
            title: title.get(),
            abstract_text: abstract_text.get(),
            category_id: category_id.get(),
            field_id: field_id.get(),
            keywords: keywords.get(),
            new_keywords: new_keywords.get(),
            notes: notes.get(),
            file: file.get(),
        };
        let paper = match form.parse() {
            Ok(paper) => paper,
            Err(invalid) => {
                errors.show(invalid.into());
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let queries = queries.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match queries.upload(paper).await {
                    Ok(()) => {
                        toasts.success("Paper uploaded");
                        navigate("/", NavigateOptions::default());
                    }
                    Err(ClientError::Transport(message)) => toasts.error(message),
                    Err(err) => errors.show(err),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&queries, &navigate, toasts, paper);
            busy.set(false);
        }
    };

    let file_label = move || {
        file.with(|f| f.as_ref().map_or_else(|| "No file selected".to_owned(), |f| f.file_name.clone()))
    };

    view! {
        <div class="app-layout">
            <Sidebar/>
            <main class="app-main">
                <header class="page-header">
                    <h1 class="page-header__title">"Upload paper"</h1>
                    <p class="page-header__subtitle">"Submit a PDF with its metadata for review."</p>
                </header>
                <section class="panel">
                    <RootError errors=errors/>
                    <form class="upload-form" on:submit=on_submit novalidate=true>
                        <label class="field">
                            <span class="field__label">"Title"</span>
                            <input
                                class="input"
                                type="text"
                                prop:value=move || title.get()
                                on:input=move |ev| title.set(event_target_value(&ev))
                            />
                            <FieldError errors=errors field=fields::TITLE/>
                        </label>
                        <label class="field">
                            <span class="field__label">"Abstract"</span>
                            <textarea
                                class="input input--multiline"
                                rows="6"
                                prop:value=move || abstract_text.get()
                                on:input=move |ev| abstract_text.set(event_target_value(&ev))
                            ></textarea>
                            <FieldError errors=errors field=fields::ABSTRACT/>
                        </label>
                        <div class="field-row">
                            <label class="field">
                                <span class="field__label">"Category ID"</span>
                                <input
                                    class="input"
                                    type="number"
                                    min="1"
                                    prop:value=move || category_id.get()
                                    on:input=move |ev| category_id.set(event_target_value(&ev))
                                />
                                <FieldError errors=errors field=fields::CATEGORY_ID/>
                            </label>
                            <label class="field">
                                <span class="field__label">"Field ID"</span>
                                <input
                                    class="input"
                                    type="number"
                                    min="1"
                                    prop:value=move || field_id.get()
                                    on:input=move |ev| field_id.set(event_target_value(&ev))
                                />
                                <FieldError errors=errors field=fields::FIELD_ID/>
                            </label>
                        </div>
                        <div class="field">
                            <span class="field__label">"Keywords"</span>
                            <KeywordSelect selected=keywords created=new_keywords/>
                            <FieldError errors=errors field=fields::KEYWORDS/>
                        </div>
                        <label class="field">
                            <span class="field__label">"Notes (optional)"</span>
                            <textarea
                                class="input input--multiline"
                                rows="3"
                                prop:value=move || notes.get()
                                on:input=move |ev| notes.set(event_target_value(&ev))
                            ></textarea>
                        </label>
                        <label class="field file-field">
                            <span class="field__label">"PDF file"</span>
                            <input class="file-field__input" type="file" accept="application/pdf,.pdf" on:change=on_file/>
                            <span class="file-field__name">{file_label}</span>
                            <FieldError errors=errors field=fields::FILE/>
                        </label>
                        <div class="upload-form__actions">
                            <a href="/" class="btn">"Cancel"</a>
                            <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                                {move || if busy.get() { "Uploading..." } else { "Upload paper" }}
                            </button>
                        </div>
                    </form>
                </section>
            </main>
        </div>
    }
}
