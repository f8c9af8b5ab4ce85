//! Inline form error rendering.
//!
//! Validation errors land next to their fields; anything else becomes the
//! form's root message.

#[cfg(test)]
#[path = "form_error_test.rs"]
mod form_error_test;

use leptos::prelude::*;

use crate::error::ClientError;
use crate::util::validation::FieldErrors;

/// Per-field and root error signals shared by one form.
#[derive(Clone, Copy, Debug)]
pub struct FormErrors {
    pub fields: RwSignal<FieldErrors>,
    pub root: RwSignal<Option<String>>,
}

impl FormErrors {
    #[must_use]
    pub fn new() -> Self {
        Self { fields: RwSignal::new(FieldErrors::default()), root: RwSignal::new(None) }
    }

    pub fn clear(&self) {
        self.fields.set(FieldErrors::default());
        self.root.set(None);
    }

    /// Route `err` to the field map or the root message.
    pub fn show(&self, err: ClientError) {
        let (fields, root) = split_error(err);
        self.fields.set(fields);
        self.root.set(root);
    }
}

impl Default for FormErrors {
    fn default() -> Self {
        Self::new()
    }
}

/// Field errors for validation failures, a root message for everything else.
#[must_use]
pub fn split_error(err: ClientError) -> (FieldErrors, Option<String>) {
    match err {
        ClientError::Validation(fields) => (fields, None),
        other => (FieldErrors::default(), Some(other.to_string())),
    }
}

#[component]
pub fn FieldError(errors: FormErrors, field: &'static str) -> impl IntoView {
    move || {
        errors
            .fields
            .with(|f| f.get(field).map(str::to_owned))
            .map(|message| view! { <p class="field-error">{message}</p> })
    }
}

#[component]
pub fn RootError(errors: FormErrors) -> impl IntoView {
    move || {
        errors
            .root
            .get()
            .map(|message| view! { <div class="form-error" role="alert">{message}</div> })
    }
}
