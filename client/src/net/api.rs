//! REST and auth-provider operations.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages and state modules call these methods instead of building requests
//! themselves. `ApiClient` pairs the bearer-token [`HttpClient`] with the
//! configured base URLs; `AppApi` is the browser instance every page shares.
//!
//! ERROR HANDLING
//! ==============
//! Form-backed operations validate first and return
//! `ClientError::Validation` without touching the network. Keyword search is
//! the one operation that swallows failures: the picker just shows no
//! options.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::http::{
    AUTH_TOKEN_HEADER, AppHttp, BrowserLocation, BrowserTokenStore, BrowserTransport, HttpClient, HttpRequest,
    Method, PageLocation, TokenStore, Transport,
};
use super::types::{
    AuthResponse, ForgetPasswordRequest, Institution, Keyword, KeywordSearchResponse, Paper, PaperList,
    ResetPasswordRequest, SessionResponse, StatusChange, UploadPaper, User,
};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::state::papers::PaperListKey;
use crate::util::validation::{
    FieldErrors, FormInput, ForgotPasswordForm, LoginForm, NewPasswordForm, SignupForm, fields,
};

/// Shortest query that triggers a keyword search.
pub const MIN_KEYWORD_QUERY_CHARS: usize = 2;

#[derive(Clone, Debug)]
pub struct ApiClient<T, S, L> {
    http: HttpClient<T, S, L>,
    config: ClientConfig,
}

/// The API client used by the browser app.
pub type AppApi = ApiClient<BrowserTransport, BrowserTokenStore, BrowserLocation>;

/// Browser API client configured from the build environment.
#[must_use]
pub fn app_api() -> AppApi {
    let http: AppHttp = HttpClient::new(BrowserTransport, BrowserTokenStore, BrowserLocation);
    ApiClient::new(http, ClientConfig::from_build_env())
}

/// The API client provided by the app root, or a fresh one from the build
/// environment when none is in context.
#[must_use]
pub fn use_api() -> AppApi {
    leptos::prelude::use_context::<AppApi>().unwrap_or_else(app_api)
}

impl<T, S, L> ApiClient<T, S, L>
where
    T: Transport,
    S: TokenStore,
    L: PageLocation,
{
    pub fn new(http: HttpClient<T, S, L>, config: ClientConfig) -> Self {
        Self { http, config }
    }

    pub fn http(&self) -> &HttpClient<T, S, L> {
        &self.http
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // =========================================================================
    // SESSION
    // =========================================================================

    /// Current user for the stored token. No token resolves to `None`
    /// without a request.
    ///
    /// # Errors
    ///
    /// A 401 clears the stored token and returns `Auth`; other failures
    /// propagate unchanged.
    pub async fn fetch_session(&self) -> Result<Option<User>, ClientError> {
        if self.http.tokens().get().is_none() {
            return Ok(None);
        }
        match self.http.get_json::<SessionResponse>(&self.config.api("/admin/me")).await {
            Ok(session) => Ok(session.user),
            Err(err @ ClientError::Auth(_)) => {
                self.http.tokens().clear();
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Email/password sign-in.
    ///
    /// # Errors
    ///
    /// Validation, provider, or network failures.
    pub async fn sign_in(&self, form: &LoginForm) -> Result<User, ClientError> {
        let request = form.parse()?;
        let response = self
            .http
            .send(HttpRequest::new(Method::Post, self.config.auth("/sign-in/email")).json(&request)?)
            .await?;
        let body: AuthResponse = response.json()?;
        if response.header(AUTH_TOKEN_HEADER).is_none() {
            if let Some(token) = body.token.as_deref().filter(|t| !t.is_empty()) {
                self.http.tokens().set(token);
            }
        }
        body.user.ok_or_else(|| ClientError::Remote {
            status: response.status,
            message: "sign-in response did not include a user".to_owned(),
        })
    }

    /// Register a new account; the provider emails a verification link that
    /// lands on `/login`.
    ///
    /// # Errors
    ///
    /// Validation, provider, or network failures.
    pub async fn sign_up(&self, form: &SignupForm) -> Result<(), ClientError> {
        let details = form.parse()?;
        let callback_url = format!("{}/login", self.http.location().origin());
        let request = details.into_request(callback_url);
        self.http
            .send(HttpRequest::new(Method::Post, self.config.auth("/sign-up/email")).json(&request)?)
            .await?;
        Ok(())
    }

    /// Remote sign-out. The stored token is cleared whether or not the
    /// provider call succeeds.
    ///
    /// # Errors
    ///
    /// Reports the remote failure after local cleanup.
    pub async fn sign_out(&self) -> Result<(), ClientError> {
        let result = match HttpRequest::new(Method::Post, self.config.auth("/sign-out")).json(&serde_json::json!({})) {
            Ok(request) => self.http.send(request).await.map(|_| ()),
            Err(err) => Err(err),
        };
        self.http.tokens().clear();
        result
    }

    /// Ask the provider to email a reset link pointing at `/reset-password`.
    ///
    /// # Errors
    ///
    /// Validation, provider, or network failures.
    pub async fn forget_password(&self, form: &ForgotPasswordForm) -> Result<(), ClientError> {
        let email = form.parse()?;
        let request = ForgetPasswordRequest {
            email,
            redirect_to: format!("{}/reset-password", self.http.location().origin()),
        };
        self.http
            .send(HttpRequest::new(Method::Post, self.config.auth("/forget-password")).json(&request)?)
            .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Validation (including a blank token), provider, or network failures.
    pub async fn reset_password(&self, token: &str, form: &NewPasswordForm) -> Result<(), ClientError> {
        let new_password = form.parse()?;
        let token = token.trim();
        if token.is_empty() {
            return Err(FieldErrors::single(fields::TOKEN, "Invalid or missing reset token").into());
        }
        let request = ResetPasswordRequest { token: token.to_owned(), new_password };
        self.http
            .send(HttpRequest::new(Method::Post, self.config.auth("/reset-password")).json(&request)?)
            .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// A blank token is a validation error; expired links surface as a
    /// remote error whose message mentions the expiry.
    pub async fn verify_email(&self, token: &str) -> Result<(), ClientError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(FieldErrors::single(fields::TOKEN, "Invalid verification link").into());
        }
        let url = self.config.auth_with_query("/verify-email", &[("token", token.to_owned())]);
        self.http.send(HttpRequest::get(url)).await?;
        Ok(())
    }

    // =========================================================================
    // PAPERS
    // =========================================================================

    /// # Errors
    ///
    /// Remote or network failures.
    pub async fn list_papers(&self, key: &PaperListKey) -> Result<PaperList, ClientError> {
        let url = self.config.api_with_query("/papers", &key.query_pairs());
        self.http.get_json(&url).await
    }

    /// # Errors
    ///
    /// Remote or network failures.
    pub async fn get_paper(&self, id: u64) -> Result<Paper, ClientError> {
        self.http.get_json(&self.config.api(&format!("/papers/{id}"))).await
    }

    /// # Errors
    ///
    /// Remote or network failures.
    pub async fn update_paper_status(&self, id: u64, change: &StatusChange) -> Result<(), ClientError> {
        let url = self.config.api(&format!("/papers/{id}/update-status"));
        self.http
            .send(HttpRequest::new(Method::Put, url).json(&change.to_request())?)
            .await?;
        Ok(())
    }

    /// Multipart submission of a validated paper.
    ///
    /// # Errors
    ///
    /// Remote or network failures.
    pub async fn upload_paper(&self, paper: UploadPaper) -> Result<(), ClientError> {
        let request = HttpRequest::new(Method::Post, self.config.api("/papers")).multipart(paper.into_form_parts());
        self.http.send(request).await?;
        Ok(())
    }

    // =========================================================================
    // LOOKUPS
    // =========================================================================

    /// Keywords matching `query`. Short queries and failures both yield an
    /// empty list.
    pub async fn search_keywords(&self, query: &str) -> Vec<Keyword> {
        let query = query.trim();
        if query.chars().count() < MIN_KEYWORD_QUERY_CHARS {
            return Vec::new();
        }
        let url = self.config.api_with_query("/keywords/search", &[("q", query.to_owned())]);
        match self.http.get_json::<KeywordSearchResponse>(&url).await {
            Ok(found) => found.keywords,
            Err(err) => {
                log::warn!("keyword search for {query:?} failed: {err}");
                Vec::new()
            }
        }
    }

    /// # Errors
    ///
    /// Remote or network failures.
    pub async fn list_institutions(&self) -> Result<Vec<Institution>, ClientError> {
        self.http.get_json(&self.config.api("/institutions")).await
    }
}
