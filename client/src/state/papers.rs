//! Paper list/detail queries and the review mutation.
//!
//! SYSTEM CONTEXT
//! ==============
//! `PaperQueries` is provided once by the app root so the dashboard, the
//! detail page and the upload page share one cache. Lists are keyed by
//! [`PaperListKey`], details by paper id. A successful status change or
//! upload invalidates every cached list, so the next list render refetches.

#[cfg(test)]
#[path = "papers_test.rs"]
mod papers_test;

use leptos::prelude::*;

use crate::error::ClientError;
use crate::net::api::{ApiClient, AppApi};
use crate::net::http::{PageLocation, TokenStore, Transport};
use crate::net::types::{Paper, PaperList, PaperStatus, StatusChange, UploadPaper};
use crate::state::query::QueryCache;

// =============================================================================
// KEYS
// =============================================================================

/// Parameters of one `GET /papers` page.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PaperListKey {
    pub search: String,
    pub user_id: Option<String>,
    pub page: u32,
    pub status: PaperStatus,
}

impl Default for PaperListKey {
    fn default() -> Self {
        Self { search: String::new(), user_id: None, page: 1, status: PaperStatus::Pending }
    }
}

impl PaperListKey {
    /// Query parameters; blank search and missing user id are omitted.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        let search = self.search.trim();
        if !search.is_empty() {
            pairs.push(("search", search.to_owned()));
        }
        if let Some(user_id) = self.user_id.as_deref().filter(|id| !id.is_empty()) {
            pairs.push(("userId", user_id.to_owned()));
        }
        pairs.push(("page", self.page.max(1).to_string()));
        pairs.push(("status", self.status.as_str().to_owned()));
        pairs
    }
}

// =============================================================================
// QUERIES
// =============================================================================

#[derive(Clone, Debug)]
pub struct PaperQueries<T, S, L> {
    api: ApiClient<T, S, L>,
    lists: QueryCache<PaperListKey, PaperList>,
    details: QueryCache<u64, Paper>,
}

pub type AppPaperQueries = PaperQueries<
    crate::net::http::BrowserTransport,
    crate::net::http::BrowserTokenStore,
    crate::net::http::BrowserLocation,
>;

impl<T, S, L> PaperQueries<T, S, L>
where
    T: Transport,
    S: TokenStore,
    L: PageLocation,
{
    pub fn new(api: ApiClient<T, S, L>) -> Self {
        Self { api, lists: QueryCache::new(), details: QueryCache::new() }
    }

    pub fn api(&self) -> &ApiClient<T, S, L> {
        &self.api
    }

    /// # Errors
    ///
    /// Remote or network failures from `GET /papers`.
    pub async fn list(&self, key: &PaperListKey) -> Result<PaperList, ClientError> {
        self.lists.fetch(key, || self.api.list_papers(key)).await
    }

    /// # Errors
    ///
    /// Remote or network failures from `GET /papers/{id}`.
    pub async fn detail(&self, id: u64) -> Result<Paper, ClientError> {
        self.details.fetch(&id, || self.api.get_paper(id)).await
    }

    /// Apply a review decision, then drop every cached list and this
    /// paper's detail. Nothing is invalidated on failure.
    ///
    /// # Errors
    ///
    /// Remote or network failures from the status update.
    pub async fn update_status(&self, id: u64, change: &StatusChange) -> Result<(), ClientError> {
        self.api.update_paper_status(id, change).await?;
        log::info!("paper {id} marked {}", change.status().as_str());
        self.lists.clear();
        self.details.invalidate(&id);
        Ok(())
    }

    /// # Errors
    ///
    /// Remote or network failures from the upload.
    pub async fn upload(&self, paper: UploadPaper) -> Result<(), ClientError> {
        self.api.upload_paper(paper).await?;
        self.lists.clear();
        Ok(())
    }

    /// Forget everything cached; used when the session ends.
    pub fn reset(&self) {
        self.lists.clear();
        self.details.clear();
    }
}

/// Shared paper queries from context.
///
/// # Panics
///
/// Panics when called outside the app root that provides them.
#[must_use]
pub fn use_paper_queries() -> AppPaperQueries {
    use_context::<AppPaperQueries>().expect("use_paper_queries called outside the App root that provides PaperQueries")
}

/// Provide shared paper queries for the current component tree.
pub fn provide_paper_queries(api: AppApi) -> AppPaperQueries {
    let queries = PaperQueries::new(api);
    provide_context(queries.clone());
    queries
}

// =============================================================================
// DASHBOARD FILTERS
// =============================================================================

/// Dashboard filter state. `search_input` mirrors the text box; `search`
/// is the debounced value that feeds the list key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaperFilters {
    pub search_input: String,
    pub search: String,
    pub page: u32,
    pub status: PaperStatus,
}

impl Default for PaperFilters {
    fn default() -> Self {
        Self { search_input: String::new(), search: String::new(), page: 1, status: PaperStatus::Pending }
    }
}

impl PaperFilters {
    #[must_use]
    pub fn key(&self, user_id: Option<String>) -> PaperListKey {
        PaperListKey { search: self.search.clone(), user_id, page: self.page, status: self.status }
    }

    pub fn set_status(&mut self, status: PaperStatus) {
        if self.status != status {
            self.status = status;
            self.page = 1;
        }
    }

    /// Promote the typed text to the active search. Returns whether the
    /// active search changed (and the page reset to 1).
    pub fn commit_search(&mut self) -> bool {
        let next = self.search_input.trim();
        if next == self.search {
            return false;
        }
        self.search = next.to_owned();
        self.page = 1;
        true
    }

    pub fn set_page(&mut self, page: u32, total_pages: u32) {
        self.page = page.clamp(1, total_pages.max(1));
    }
}
