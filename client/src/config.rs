//! Client endpoint configuration.
//!
//! Base URLs are baked in at compile time from `DESCI_API_URL` and
//! `DESCI_AUTH_URL`, falling back to a local development stack.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use url::form_urlencoded;

pub const DEFAULT_API_URL: &str = "http://localhost:4000/api/v1";
pub const DEFAULT_AUTH_URL: &str = "http://localhost:4000/api/auth";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    api_url: String,
    auth_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}

impl ClientConfig {
    #[must_use]
    pub fn new(api_url: &str, auth_url: &str) -> Self {
        Self {
            api_url: api_url.trim().trim_end_matches('/').to_owned(),
            auth_url: auth_url.trim().trim_end_matches('/').to_owned(),
        }
    }

    /// Values captured from the build environment.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::new(
            option_env!("DESCI_API_URL").unwrap_or(DEFAULT_API_URL),
            option_env!("DESCI_AUTH_URL").unwrap_or(DEFAULT_AUTH_URL),
        )
    }

    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    #[must_use]
    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    /// REST API endpoint for `path` (leading slash expected).
    #[must_use]
    pub fn api(&self, path: &str) -> String {
        join(&self.api_url, path)
    }

    /// REST API endpoint with a form-encoded query string. Pairs are emitted
    /// in order; an empty list yields no `?`.
    #[must_use]
    pub fn api_with_query(&self, path: &str, pairs: &[(&str, String)]) -> String {
        with_query(self.api(path), pairs)
    }

    /// Auth-provider endpoint for `path`.
    #[must_use]
    pub fn auth(&self, path: &str) -> String {
        join(&self.auth_url, path)
    }

    #[must_use]
    pub fn auth_with_query(&self, path: &str, pairs: &[(&str, String)]) -> String {
        with_query(self.auth(path), pairs)
    }
}

fn join(base: &str, path: &str) -> String {
    if path.starts_with('/') { format!("{base}{path}") } else { format!("{base}/{path}") }
}

fn with_query(url: String, pairs: &[(&str, String)]) -> String {
    if pairs.is_empty() {
        return url;
    }
    let mut query = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        query.append_pair(key, value);
    }
    format!("{url}?{}", query.finish())
}
