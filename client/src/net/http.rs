//! Bearer-token HTTP client.
//!
//! ARCHITECTURE
//! ============
//! `HttpClient` is generic over three browser seams: the network
//! (`Transport`), the token slot in local storage (`TokenStore`) and the
//! current page location (`PageLocation`). The browser implementations are
//! zero-sized handles over `gloo-net`/`web-sys` and compile to inert stubs
//! outside the `hydrate` feature; tests plug in in-memory fakes.
//!
//! INVARIANTS
//! ==========
//! - A stored token is attached to every request as `Authorization: Bearer`.
//! - A `set-auth-token` response header replaces the stored token.
//! - A 401 received while the page sits on a protected route clears the
//!   token and forces a full navigation to `/login`.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::future::Future;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::util::route_guard::{LOGIN_PATH, is_protected_path};

/// Local-storage key holding the bearer token.
pub const TOKEN_STORAGE_KEY: &str = "bearer_token";
/// Response header the auth provider uses to hand out a fresh token.
pub const AUTH_TOKEN_HEADER: &str = "set-auth-token";

#[cfg(feature = "hydrate")]
const CAPTURED_HEADERS: [&str; 2] = [AUTH_TOKEN_HEADER, "content-type"];

// =============================================================================
// REQUEST / RESPONSE
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

/// In-memory file attached to a multipart request.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// One multipart form field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, file: FilePart },
}

impl FormPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Text { name: name.into(), value: value.into() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<FormPart>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self { method, url: url.into(), headers: Vec::new(), body: RequestBody::Empty }
    }

    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns a transport error if `body` cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ClientError> {
        let value = serde_json::to_value(body).map_err(|e| ClientError::Transport(format!("encode body: {e}")))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    #[must_use]
    pub fn multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns a remote error carrying the status when the body does not
    /// match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_str(&self.body)
            .map_err(|e| ClientError::Remote { status: self.status, message: format!("invalid response body: {e}") })
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

// =============================================================================
// SEAMS
// =============================================================================

/// Sends a fully prepared request and yields whatever response came back.
pub trait Transport {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse, ClientError>>;
}

/// Single persisted bearer-token slot.
pub trait TokenStore {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str);
    fn clear(&self);
}

/// Read access to the current page URL plus full-page navigation.
pub trait PageLocation {
    fn pathname(&self) -> String;
    fn search(&self) -> String;
    fn origin(&self) -> String;
    /// Hard navigation that discards in-flight client state.
    fn assign(&self, href: &str);
}

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct HttpClient<T, S, L> {
    transport: T,
    tokens: S,
    location: L,
}

impl<T, S, L> HttpClient<T, S, L>
where
    T: Transport,
    S: TokenStore,
    L: PageLocation,
{
    pub fn new(transport: T, tokens: S, location: L) -> Self {
        Self { transport, tokens, location }
    }

    pub fn tokens(&self) -> &S {
        &self.tokens
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    /// Send `request` with the bearer token attached.
    ///
    /// # Errors
    ///
    /// Returns `Auth` on 401, `Remote` on any other non-2xx status, and
    /// `Transport` when no response was received.
    pub async fn send(&self, mut request: HttpRequest) -> Result<HttpResponse, ClientError> {
        if request.header("authorization").is_none() {
            if let Some(token) = self.tokens.get() {
                request.headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
            }
        }

        let response = self.transport.send(request).await?;

        if let Some(token) = response.header(AUTH_TOKEN_HEADER).filter(|t| !t.is_empty()) {
            self.tokens.set(token);
        }
        if response.status == 401 {
            self.on_unauthorized();
        }
        if !response.ok() {
            return Err(ClientError::from_response(response.status, &response.body));
        }
        Ok(response)
    }

    /// `GET` a JSON document.
    ///
    /// # Errors
    ///
    /// Propagates [`HttpClient::send`] failures and body decoding errors.
    pub async fn get_json<R: DeserializeOwned>(&self, url: &str) -> Result<R, ClientError> {
        self.send(HttpRequest::get(url)).await?.json()
    }

    /// Send a JSON body and decode a JSON reply.
    ///
    /// # Errors
    ///
    /// Propagates [`HttpClient::send`] failures and body decoding errors.
    pub async fn send_json<B, R>(&self, method: Method, url: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(HttpRequest::new(method, url).json(body)?).await?.json()
    }

    fn on_unauthorized(&self) {
        let path = self.location.pathname();
        log::warn!("authentication failed on {path}");
        if is_protected_path(&path) {
            self.tokens.clear();
            self.location.assign(LOGIN_PATH);
        }
    }
}

// =============================================================================
// BROWSER IMPLEMENTATIONS
// =============================================================================

/// `fetch`-backed transport (`gloo-net`).
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

/// `window.localStorage` token slot.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTokenStore;

/// `window.location`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserLocation;

/// The HTTP client every page uses.
pub type AppHttp = HttpClient<BrowserTransport, BrowserTokenStore, BrowserLocation>;

impl Transport for BrowserTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        #[cfg(feature = "hydrate")]
        {
            fetch(request).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(ClientError::Transport("not available on server".to_owned()))
        }
    }
}

#[cfg(feature = "hydrate")]
async fn fetch(request: HttpRequest) -> Result<HttpResponse, ClientError> {
    use gloo_net::http::Request;

    let transport_err = |e: gloo_net::Error| ClientError::Transport(e.to_string());

    let mut builder = match request.method {
        Method::Get => Request::get(&request.url),
        Method::Post => Request::post(&request.url),
        Method::Put => Request::put(&request.url),
    };
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    let prepared = match request.body {
        RequestBody::Empty => builder.build().map_err(transport_err)?,
        RequestBody::Json(value) => builder.json(&value).map_err(transport_err)?,
        RequestBody::Multipart(parts) => builder.body(form_data(&parts)?).map_err(transport_err)?,
    };

    let response = prepared.send().await.map_err(transport_err)?;
    let headers = CAPTURED_HEADERS
        .iter()
        .filter_map(|name| response.headers().get(name).map(|v| ((*name).to_owned(), v)))
        .collect();
    Ok(HttpResponse {
        status: response.status(),
        status_text: response.status_text(),
        headers,
        body: response_body(response.text().await)?,
    })
}

/// A body that could not be read is a transport failure, whatever the status.
#[cfg(any(test, feature = "hydrate"))]
fn response_body<E: std::fmt::Display>(read: Result<String, E>) -> Result<String, ClientError> {
    read.map_err(|e| ClientError::Transport(format!("failed to read response body: {e}")))
}

#[cfg(feature = "hydrate")]
fn form_data(parts: &[FormPart]) -> Result<web_sys::FormData, ClientError> {
    let js_err = |e: wasm_bindgen::JsValue| ClientError::Transport(format!("form data: {e:?}"));

    let form = web_sys::FormData::new().map_err(js_err)?;
    for part in parts {
        match part {
            FormPart::Text { name, value } => form.append_with_str(name, value).map_err(js_err)?,
            FormPart::File { name, file } => {
                let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
                let options = web_sys::BlobPropertyBag::new();
                options.set_type(&file.content_type);
                let blob =
                    web_sys::Blob::new_with_u8_array_sequence_and_options(&js_sys::Array::of1(&bytes), &options)
                        .map_err(js_err)?;
                form.append_with_blob_and_filename(name, &blob, &file.file_name)
                    .map_err(js_err)?;
            }
        }
    }
    Ok(form)
}

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl TokenStore for BrowserTokenStore {
    fn get(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?
                .get_item(TOKEN_STORAGE_KEY)
                .ok()
                .flatten()
                .filter(|t| !t.is_empty())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn set(&self, token: &str) {
        #[cfg(feature = "hydrate")]
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(TOKEN_STORAGE_KEY, token);
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = token;
    }

    fn clear(&self) {
        #[cfg(feature = "hydrate")]
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(TOKEN_STORAGE_KEY);
        }
    }
}

impl PageLocation for BrowserLocation {
    fn pathname(&self) -> String {
        #[cfg(feature = "hydrate")]
        {
            web_sys::window()
                .and_then(|w| w.location().pathname().ok())
                .unwrap_or_else(|| "/".to_owned())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            "/".to_owned()
        }
    }

    fn search(&self) -> String {
        #[cfg(feature = "hydrate")]
        {
            web_sys::window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            String::new()
        }
    }

    fn origin(&self) -> String {
        #[cfg(feature = "hydrate")]
        {
            web_sys::window()
                .and_then(|w| w.location().origin().ok())
                .unwrap_or_default()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            String::new()
        }
    }

    fn assign(&self, href: &str) {
        #[cfg(feature = "hydrate")]
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(href);
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = href;
    }
}
