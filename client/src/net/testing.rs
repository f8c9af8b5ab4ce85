//! In-memory stand-ins for the browser seams, shared by client tests.

use std::sync::{Arc, Mutex, PoisonError};

use super::http::{HttpClient, HttpRequest, HttpResponse, PageLocation, TokenStore, Transport};
use crate::error::ClientError;

type Handler = dyn Fn(&HttpRequest) -> Result<HttpResponse, ClientError> + Send + Sync;

/// Transport that records requests and answers from a handler closure.
#[derive(Clone)]
pub struct FakeTransport {
    handler: Arc<Handler>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl FakeTransport {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse, ClientError> + Send + Sync + 'static,
    {
        Self { handler: Arc::new(handler), requests: Arc::default() }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn count(&self) -> usize {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Transport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let response = (self.handler)(&request);
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        response
    }
}

#[derive(Clone, Default)]
pub struct MemoryTokenStore(Arc<Mutex<Option<String>>>);

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self(Arc::new(Mutex::new(Some(token.to_owned()))))
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set(&self, token: &str) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
    }

    fn clear(&self) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Location pinned to a path; `assign` calls are recorded, not followed.
#[derive(Clone)]
pub struct FakeLocation {
    path: String,
    search: String,
    assigned: Arc<Mutex<Vec<String>>>,
}

impl FakeLocation {
    pub fn at(path: &str) -> Self {
        Self { path: path.to_owned(), search: String::new(), assigned: Arc::default() }
    }

    pub fn assigned(&self) -> Vec<String> {
        self.assigned.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl PageLocation for FakeLocation {
    fn pathname(&self) -> String {
        self.path.clone()
    }

    fn search(&self) -> String {
        self.search.clone()
    }

    fn origin(&self) -> String {
        "https://admin.example".to_owned()
    }

    fn assign(&self, href: &str) {
        self.assigned
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(href.to_owned());
    }
}

pub type FakeHttp = HttpClient<FakeTransport, MemoryTokenStore, FakeLocation>;

pub fn json_response(status: u16, body: &serde_json::Value) -> HttpResponse {
    HttpResponse { status, status_text: String::new(), headers: Vec::new(), body: body.to_string() }
}

pub fn empty_response(status: u16) -> HttpResponse {
    HttpResponse { status, ..HttpResponse::default() }
}
