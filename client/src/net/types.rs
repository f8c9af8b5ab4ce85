//! REST DTOs for the papers API and the auth provider.
//!
//! DESIGN
//! ======
//! These types mirror the JSON the API and auth provider emit (camelCase,
//! loosely typed ids and counters) so decoding stays lenient at the edge and
//! the rest of the client works with plain Rust values.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::net::http::{FilePart, FormPart};
use crate::util::validation::{FieldErrors, MAX_REJECTION_REASON_CHARS, fields};

// =============================================================================
// USERS
// =============================================================================

/// An authenticated admin as returned by `/admin/me` and the auth provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Auth-provider user identifier.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Affiliated institution, if one was picked at signup.
    #[serde(default)]
    pub institution_id: Option<i64>,
    /// Keyword names chosen at signup.
    #[serde(default, deserialize_with = "deserialize_areas")]
    pub areas_of_interest: Vec<String>,
}

impl User {
    /// Two-letter avatar initials derived from the display name.
    #[must_use]
    pub fn initials(&self) -> String {
        let initials: String = self
            .name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect();
        if initials.is_empty() { "?".to_owned() } else { initials }
    }
}

/// Envelope of `GET /admin/me`.
#[derive(Clone, Debug, Deserialize)]
pub struct SessionResponse {
    #[serde(default)]
    pub user: Option<User>,
}

/// Body returned by the auth provider's sign-in and sign-up endpoints.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub token: Option<String>,
}

/// A selectable institution on the signup form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Institution {
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub id: u64,
    pub name: String,
}

// =============================================================================
// AUTH REQUESTS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution_id: Option<u64>,
    /// JSON-encoded list; the auth provider stores this field as a string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub areas_of_interest: Option<String>,
    #[serde(rename = "callbackURL")]
    pub callback_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgetPasswordRequest {
    pub email: String,
    pub redirect_to: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

// =============================================================================
// PAPERS
// =============================================================================

/// Review state of a submitted paper.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperStatus {
    #[default]
    Pending,
    Published,
    Rejected,
}

impl PaperStatus {
    pub const ALL: [Self; 3] = [Self::Pending, Self::Published, Self::Rejected];

    /// Wire value, also used as the `status` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Published => "published",
            Self::Rejected => "rejected",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Published => "Published",
            Self::Rejected => "Rejected",
        }
    }
}

/// Submitting author summary embedded in a paper.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperAuthor {
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub id: u64,
    pub name: String,
    pub email: String,
}

/// A keyword tag; also the option type of the keyword pickers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Envelope of `GET /keywords/search`.
#[derive(Clone, Debug, Deserialize)]
pub struct KeywordSearchResponse {
    #[serde(default)]
    pub keywords: Vec<Keyword>,
}

/// A submitted paper.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub id: u64,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub status: PaperStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub ipfs_cid: String,
    #[serde(default)]
    pub ipfs_url: String,
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub user_id: u64,
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub category_id: u64,
    /// Tag set; order carries no meaning.
    #[serde(default)]
    pub keywords: Vec<Keyword>,
    pub user: PaperAuthor,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Paper {
    /// Same-origin link to the PDF through the IPFS proxy route.
    #[must_use]
    pub fn pdf_href(&self) -> Option<String> {
        let cid = self.ipfs_cid.trim();
        (!cid.is_empty()).then(|| format!("/api/ipfs/{cid}"))
    }

    /// Calendar date portion of `created_at` (`YYYY-MM-DD`).
    #[must_use]
    pub fn uploaded_on(&self) -> &str {
        self.created_at.get(..10).unwrap_or(&self.created_at)
    }

    #[must_use]
    pub fn keyword_names(&self) -> String {
        self.keywords
            .iter()
            .map(|k| k.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One page of `GET /papers`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperList {
    #[serde(default)]
    pub data: Vec<Paper>,
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub total: u64,
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub size: u64,
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub next_page: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub prev_page: Option<String>,
}

impl PaperList {
    /// Number of pages implied by `total` and `size` (at least one).
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        if self.size == 0 {
            return 1;
        }
        u32::try_from(self.total.div_ceil(self.size))
            .unwrap_or(u32::MAX)
            .max(1)
    }
}

// =============================================================================
// STATUS UPDATES
// =============================================================================

/// A non-empty rejection reason of bounded length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectionReason(String);

impl RejectionReason {
    /// # Errors
    ///
    /// Returns field errors when the reason is blank or too long.
    pub fn new(reason: &str) -> Result<Self, FieldErrors> {
        let reason = reason.trim();
        let mut errors = FieldErrors::default();
        if reason.is_empty() {
            errors.insert(fields::REASON, "Rejection reason is required");
        } else if reason.chars().count() > MAX_REJECTION_REASON_CHARS {
            errors.insert(
                fields::REASON,
                format!("Rejection reason must be at most {MAX_REJECTION_REASON_CHARS} characters"),
            );
        }
        errors.into_result(Self(reason.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Review decision applied by `PUT /papers/{id}/update-status`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusChange {
    Publish,
    Reject(RejectionReason),
}

impl StatusChange {
    #[must_use]
    pub fn status(&self) -> PaperStatus {
        match self {
            Self::Publish => PaperStatus::Published,
            Self::Reject(_) => PaperStatus::Rejected,
        }
    }

    #[must_use]
    pub fn to_request(&self) -> StatusUpdateRequest {
        StatusUpdateRequest {
            status: self.status(),
            rejection_reason: match self {
                Self::Publish => None,
                Self::Reject(reason) => Some(reason.as_str().to_owned()),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    pub status: PaperStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

// =============================================================================
// UPLOADS
// =============================================================================

/// Validated paper submission, sent as multipart form data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadPaper {
    pub title: String,
    pub abstract_text: String,
    pub category_id: u64,
    pub field_id: u64,
    /// Names of existing keywords.
    pub keywords: Vec<String>,
    /// Free-text keywords created during upload.
    pub new_keywords: Vec<String>,
    pub notes: Option<String>,
    pub file: FilePart,
}

impl UploadPaper {
    /// Flatten into multipart fields, indexing list entries as `name[i]`.
    #[must_use]
    pub fn into_form_parts(self) -> Vec<FormPart> {
        let mut parts = vec![
            FormPart::text("title", self.title),
            FormPart::text("abstract", self.abstract_text),
            FormPart::text("categoryId", self.category_id.to_string()),
            FormPart::text("fieldId", self.field_id.to_string()),
        ];
        for (idx, keyword) in self.keywords.into_iter().enumerate() {
            parts.push(FormPart::text(format!("keywords[{idx}]"), keyword));
        }
        for (idx, keyword) in self.new_keywords.into_iter().enumerate() {
            parts.push(FormPart::text(format!("newKeywords[{idx}]"), keyword));
        }
        if let Some(notes) = self.notes {
            parts.push(FormPart::text("notes", notes));
        }
        parts.push(FormPart::File { name: "file".to_owned(), file: self.file });
        parts
    }
}

// =============================================================================
// LENIENT DECODERS
// =============================================================================

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        _ => Err(D::Error::custom("expected string or number id")),
    }
}

fn deserialize_u64_from_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(number) => number
            .as_u64()
            .ok_or_else(|| D::Error::custom("expected non-negative integer")),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| D::Error::custom(format!("expected numeric string, got {s:?}"))),
        _ => Err(D::Error::custom("expected number")),
    }
}

fn deserialize_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Number(n) => Ok(Some(n.to_string())),
        _ => Err(D::Error::custom("expected string, number, or null")),
    }
}

/// Areas of interest arrive either as a list or as a JSON-encoded list string.
fn deserialize_areas<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(Vec::new()),
        serde_json::Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| item.as_str().map(str::to_owned))
            .collect()),
        serde_json::Value::String(raw) if raw.trim().is_empty() => Ok(Vec::new()),
        serde_json::Value::String(raw) => serde_json::from_str::<Vec<String>>(&raw)
            .map_err(|e| D::Error::custom(format!("invalid areasOfInterest: {e}"))),
        _ => Err(D::Error::custom("expected list or JSON string")),
    }
}
