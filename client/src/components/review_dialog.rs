//! Approve / reject confirmation dialogs for the paper review page.

use leptos::prelude::*;

use crate::components::form_error::{FieldError, FormErrors};
use crate::util::validation::{MAX_REJECTION_REASON_CHARS, fields};

#[component]
pub fn ApproveDialog(
    title: String,
    #[prop(into)] busy: Signal<bool>,
    on_cancel: Callback<()>,
    on_confirm: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>"Approve paper"</h2>
                <p class="dialog__body">
                    "Publish “" {title} "”? It becomes visible to all readers."
                </p>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(()) disabled=move || busy.get()>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" on:click=move |_| on_confirm.run(()) disabled=move || busy.get()>
                        {move || if busy.get() { "Approving..." } else { "Approve" }}
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Reject dialog. The reason is validated by the caller's `on_confirm`,
/// which reports failures through `errors`.
#[component]
pub fn RejectDialog(
    reason: RwSignal<String>,
    errors: FormErrors,
    #[prop(into)] busy: Signal<bool>,
    on_cancel: Callback<()>,
    on_confirm: Callback<()>,
) -> impl IntoView {
    let remaining = move || {
        let used = reason.with(|r| r.chars().count());
        MAX_REJECTION_REASON_CHARS.saturating_sub(used)
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>"Reject paper"</h2>
                <label class="dialog__label">
                    "Reason for rejection"
                    <textarea
                        class="dialog__textarea"
                        maxlength=MAX_REJECTION_REASON_CHARS.to_string()
                        placeholder="Explain what the author needs to fix"
                        prop:value=move || reason.get()
                        on:input=move |ev| reason.set(event_target_value(&ev))
                        autofocus=true
                    ></textarea>
                </label>
                <p class="dialog__hint">{remaining} " characters left"</p>
                <FieldError errors=errors field=fields::REASON/>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(()) disabled=move || busy.get()>
                        "Cancel"
                    </button>
                    <button class="btn btn--danger" on:click=move |_| on_confirm.run(()) disabled=move || busy.get()>
                        {move || if busy.get() { "Rejecting..." } else { "Reject" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
