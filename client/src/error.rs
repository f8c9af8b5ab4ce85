//! Client error taxonomy.
//!
//! DESIGN
//! ======
//! Transport and auth-provider failures are converted into `ClientError` at
//! the HTTP edge, so pages and state modules only ever match on these four
//! kinds instead of inspecting `gloo-net` or JSON error shapes.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::util::validation::FieldErrors;

/// Every failure a client operation can surface to the UI.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// Form input rejected before any request was sent.
    #[error("{0}")]
    Validation(FieldErrors),

    /// The server rejected the credential (HTTP 401).
    #[error("{0}")]
    Auth(String),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Transport(String),
}

impl ClientError {
    /// Build a `Remote` or `Auth` error from a failed response body.
    ///
    /// The auth provider and the API both answer with `{"message": ...}`;
    /// the IPFS proxy answers with `{"error": ...}`. Anything else falls back
    /// to a generic status message.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = response_message(body).unwrap_or_else(|| request_failed_message(status));
        if status == 401 { Self::Auth(message) } else { Self::Remote { status, message } }
    }

    /// HTTP status carried by the error, if one was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth(_) => Some(401),
            Self::Remote { status, .. } => Some(*status),
            Self::Validation(_) | Self::Transport(_) => None,
        }
    }

    /// Whether the message reports an expired link or token.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.to_string().to_ascii_lowercase().contains("expired")
    }
}

impl From<FieldErrors> for ClientError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

pub(crate) fn request_failed_message(status: u16) -> String {
    format!("request failed: {status}")
}

fn response_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(serde_json::Value::as_str))
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_owned)
}
