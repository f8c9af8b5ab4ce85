//! Typed form validators.
//!
//! Each form struct holds the raw input strings bound to its fields. Field
//! rules are declared with `validator` derives; [`FormInput::parse`] trims the
//! input, runs those rules, and yields either the typed request the API layer
//! sends or the per-field messages the form renders inline. Nothing is sent
//! over the network until validation passes.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use std::collections::BTreeMap;
use std::fmt;

use validator::{Validate, ValidationError, ValidationErrors};

use crate::net::http::FilePart;
use crate::net::types::{RejectionReason, SignInRequest, SignUpRequest, UploadPaper};

/// Upper bound on a rejection reason, in characters.
pub const MAX_REJECTION_REASON_CHARS: usize = 2000;

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Field identifiers used as keys in [`FieldErrors`].
pub mod fields {
    pub const EMAIL: &str = "email";
    pub const PASSWORD: &str = "password";
    pub const CONFIRM_PASSWORD: &str = "confirmPassword";
    pub const NAME: &str = "name";
    pub const TOKEN: &str = "token";
    pub const REASON: &str = "reason";
    pub const TITLE: &str = "title";
    pub const ABSTRACT: &str = "abstract";
    pub const CATEGORY_ID: &str = "categoryId";
    pub const FIELD_ID: &str = "fieldId";
    pub const KEYWORDS: &str = "keywords";
    pub const FILE: &str = "file";

    /// Map a form struct's Rust field name to its error key.
    #[must_use]
    pub fn for_struct_field(name: &str) -> Option<&'static str> {
        Some(match name {
            "email" => EMAIL,
            "password" => PASSWORD,
            "confirm_password" => CONFIRM_PASSWORD,
            "name" => NAME,
            "reason" => REASON,
            "title" => TITLE,
            "abstract_text" => ABSTRACT,
            "category_id" => CATEGORY_ID,
            "field_id" => FIELD_ID,
            "keywords" => KEYWORDS,
            "file" => FILE,
            _ => return None,
        })
    }
}

// =============================================================================
// FIELD ERRORS
// =============================================================================

/// Validation messages keyed by field, in field-name order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    /// Single error attached to `field`.
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.insert(field, message);
        errors
    }

    /// Record `message` for `field`; the first message per field wins.
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `Ok(value)` when no errors were recorded.
    ///
    /// # Errors
    ///
    /// Returns `self` when any field failed.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.values().next() {
            Some(message) => f.write_str(message),
            None => f.write_str("invalid input"),
        }
    }
}

/// First message per failing field, keyed by [`fields`] constants.
impl From<ValidationErrors> for FieldErrors {
    fn from(report: ValidationErrors) -> Self {
        let mut errors = Self::default();
        for (name, failures) in report.field_errors() {
            let name: &str = &name;
            let Some(field) = fields::for_struct_field(name) else {
                log::warn!("validation failed on unmapped field {name}");
                continue;
            };
            let message = failures.iter().find_map(|f| f.message.as_deref()).unwrap_or("Invalid value");
            errors.insert(field, message);
        }
        errors
    }
}

/// Convert raw form input into a typed request.
pub trait FormInput {
    type Output;

    /// # Errors
    ///
    /// Returns every field that failed, keyed by [`fields`] constants.
    fn parse(&self) -> Result<Self::Output, FieldErrors>;
}

fn check(draft: &impl Validate) -> Result<(), FieldErrors> {
    draft.validate().map_err(FieldErrors::from)
}

// =============================================================================
// AUTH FORMS
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Validate)]
pub struct LoginForm {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Please enter a valid email address")
    )]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl FormInput for LoginForm {
    type Output = SignInRequest;

    fn parse(&self) -> Result<SignInRequest, FieldErrors> {
        let form = Self { email: self.email.trim().to_owned(), ..self.clone() };
        check(&form)?;
        Ok(SignInRequest { email: form.email, password: form.password })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Validate)]
pub struct SignupForm {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Please enter a valid email address")
    )]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(
        length(min = 1, message = "Please confirm your password"),
        must_match(other = "password", message = "Passwords don't match")
    )]
    pub confirm_password: String,
    pub institution_id: Option<u64>,
    pub areas_of_interest: Vec<String>,
}

/// Signup input that passed validation; the callback URL is page-dependent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignupDetails {
    pub name: String,
    pub email: String,
    pub password: String,
    pub institution_id: Option<u64>,
    pub areas_of_interest: Vec<String>,
}

impl SignupDetails {
    /// Build the auth-provider request. Areas of interest travel as a
    /// JSON-encoded list.
    #[must_use]
    pub fn into_request(self, callback_url: String) -> SignUpRequest {
        let areas_of_interest = (!self.areas_of_interest.is_empty())
            .then(|| serde_json::to_string(&self.areas_of_interest).ok())
            .flatten();
        SignUpRequest {
            email: self.email,
            password: self.password,
            name: self.name,
            institution_id: self.institution_id,
            areas_of_interest,
            callback_url,
        }
    }
}

impl FormInput for SignupForm {
    type Output = SignupDetails;

    fn parse(&self) -> Result<SignupDetails, FieldErrors> {
        let form = Self {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            ..self.clone()
        };
        check(&form)?;

        let mut areas: Vec<String> = Vec::new();
        for area in form.areas_of_interest.iter().map(|a| a.trim()) {
            if !area.is_empty() && !areas.iter().any(|a| a == area) {
                areas.push(area.to_owned());
            }
        }

        Ok(SignupDetails {
            name: form.name,
            email: form.email,
            password: form.password,
            institution_id: form.institution_id,
            areas_of_interest: areas,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Validate)]
pub struct ForgotPasswordForm {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Please enter a valid email address")
    )]
    pub email: String,
}

impl FormInput for ForgotPasswordForm {
    type Output = String;

    fn parse(&self) -> Result<String, FieldErrors> {
        let form = Self { email: self.email.trim().to_owned() };
        check(&form)?;
        Ok(form.email)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Validate)]
pub struct NewPasswordForm {
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(
        length(min = 1, message = "Please confirm your password"),
        must_match(other = "password", message = "Passwords don't match")
    )]
    pub confirm_password: String,
}

impl FormInput for NewPasswordForm {
    type Output = String;

    fn parse(&self) -> Result<String, FieldErrors> {
        check(self)?;
        Ok(self.password.clone())
    }
}

// =============================================================================
// REVIEW + UPLOAD FORMS
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RejectForm {
    pub reason: String,
}

impl FormInput for RejectForm {
    type Output = RejectionReason;

    fn parse(&self) -> Result<RejectionReason, FieldErrors> {
        RejectionReason::new(&self.reason)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadForm {
    pub title: String,
    pub abstract_text: String,
    pub category_id: String,
    pub field_id: String,
    /// Picked from keyword search results.
    pub keywords: Vec<String>,
    /// Typed by the user and not yet known to the API.
    pub new_keywords: Vec<String>,
    pub notes: String,
    pub file: Option<FilePart>,
}

/// Trimmed and parsed upload input the field rules run against.
#[derive(Validate)]
struct UploadDraft {
    #[validate(length(min = 1, message = "Title is required"))]
    title: String,
    #[validate(length(min = 1, message = "Abstract is required"))]
    abstract_text: String,
    #[validate(range(min = 1, message = "Category must be a positive number"))]
    category_id: u64,
    #[validate(range(min = 1, message = "Field must be a positive number"))]
    field_id: u64,
    /// Picked keywords followed by new ones.
    #[validate(length(min = 1, message = "Add at least one keyword"))]
    keywords: Vec<String>,
    picked: usize,
    #[validate(required(message = "A PDF file is required"), custom(function = "pdf_within_limit"))]
    file: Option<FilePart>,
}

impl FormInput for UploadForm {
    type Output = UploadPaper;

    fn parse(&self) -> Result<UploadPaper, FieldErrors> {
        let picked = clean_list(&self.keywords);
        let new_keywords = clean_list(&self.new_keywords).into_iter().filter(|k| !picked.contains(k));
        let draft = UploadDraft {
            title: self.title.trim().to_owned(),
            abstract_text: self.abstract_text.trim().to_owned(),
            category_id: self.category_id.trim().parse().unwrap_or(0),
            field_id: self.field_id.trim().parse().unwrap_or(0),
            picked: picked.len(),
            keywords: picked.iter().cloned().chain(new_keywords).collect(),
            file: self.file.clone(),
        };
        check(&draft)?;

        let UploadDraft { title, abstract_text, category_id, field_id, mut keywords, picked, file } = draft;
        let Some(file) = file else {
            return Err(FieldErrors::single(fields::FILE, "A PDF file is required"));
        };
        let new_keywords = keywords.split_off(picked);
        let notes = self.notes.trim();
        Ok(UploadPaper {
            title,
            abstract_text,
            category_id,
            field_id,
            keywords,
            new_keywords,
            notes: (!notes.is_empty()).then(|| notes.to_owned()),
            file,
        })
    }
}

fn clean_list(items: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items.iter().map(|i| i.trim()).filter(|i| !i.is_empty()) {
        if !out.iter().any(|o| o.eq_ignore_ascii_case(item)) {
            out.push(item.to_owned());
        }
    }
    out
}

fn pdf_within_limit(file: &FilePart) -> Result<(), ValidationError> {
    let is_pdf = file.content_type == "application/pdf" || file.file_name.to_ascii_lowercase().ends_with(".pdf");
    if !is_pdf {
        return Err(ValidationError::new("pdf").with_message("Only PDF files are accepted".into()));
    }
    if file.bytes.len() > MAX_UPLOAD_BYTES {
        return Err(ValidationError::new("size").with_message("File must be 10 MB or smaller".into()));
    }
    Ok(())
}
