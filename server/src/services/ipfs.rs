//! IPFS gateway client behind the `/api/ipfs/{cid}` proxy.
//!
//! DESIGN
//! ======
//! The gateway key never leaves the server: the browser asks this process for
//! a CID and the request is re-issued upstream with the key as the
//! `pinataGatewayToken` query parameter. Bodies are streamed, not buffered.

#[cfg(test)]
#[path = "ipfs_test.rs"]
mod ipfs_test;

use axum::body::Body;
use axum::http::{HeaderValue, StatusCode, header};
use futures::TryStreamExt;

use crate::config::GatewayConfig;

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
const TOKEN_PARAM: &str = "pinataGatewayToken";

#[derive(Debug, thiserror::Error)]
pub enum IpfsError {
    #[error("CID is required")]
    MissingCid,
    #[error("Invalid CID")]
    InvalidCid,
    #[error("IPFS gateway is not configured")]
    NotConfigured,
    #[error("Failed to fetch from Pinata: {status_text}")]
    Upstream { status: u16, status_text: String },
    #[error("{0}")]
    Request(String),
}

impl IpfsError {
    /// Status code the proxy answers with.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingCid | Self::InvalidCid => StatusCode::BAD_REQUEST,
            Self::NotConfigured | Self::Upstream { .. } | Self::Request(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Trim `cid` and check it is one segment of the CID alphabet.
///
/// The upstream request carries the gateway key and must stay under `/ipfs/`.
///
/// # Errors
///
/// [`IpfsError::MissingCid`] when blank, [`IpfsError::InvalidCid`] when any
/// character is outside `[A-Za-z0-9]`.
pub fn parse_cid(cid: &str) -> Result<&str, IpfsError> {
    let cid = cid.trim();
    if cid.is_empty() {
        return Err(IpfsError::MissingCid);
    }
    if !cid.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(IpfsError::InvalidCid);
    }
    Ok(cid)
}

/// A successful upstream response, ready to be streamed back.
pub struct GatewayFile {
    pub content_type: HeaderValue,
    pub body: Body,
}

#[derive(Clone, Debug)]
pub struct IpfsGateway {
    http: reqwest::Client,
    base_url: String,
    key: String,
}

impl IpfsGateway {
    #[must_use]
    pub fn new(http: reqwest::Client, config: GatewayConfig) -> Self {
        Self { http, base_url: config.url.trim_end_matches('/').to_owned(), key: config.key }
    }

    #[must_use]
    pub fn content_url(&self, cid: &str) -> String {
        format!("{}/ipfs/{cid}", self.base_url)
    }

    /// Fetch `cid` from the gateway.
    ///
    /// # Errors
    ///
    /// [`IpfsError::MissingCid`] / [`IpfsError::InvalidCid`] as in
    /// [`parse_cid`], [`IpfsError::Upstream`] for a non-2xx gateway answer and
    /// [`IpfsError::Request`] when the gateway cannot be reached.
    pub async fn fetch(&self, cid: &str) -> Result<GatewayFile, IpfsError> {
        let cid = parse_cid(cid)?;

        let response = self
            .http
            .get(self.content_url(cid))
            .query(&[(TOKEN_PARAM, self.key.as_str())])
            .send()
            .await
            .map_err(|e| IpfsError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IpfsError::Upstream {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("Unknown status").to_owned(),
            });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));

        let cid = cid.to_owned();
        let stream = response.bytes_stream().inspect_err(move |e| {
            tracing::warn!(%cid, error = %e, "ipfs stream interrupted");
        });
        Ok(GatewayFile { content_type, body: Body::from_stream(stream) })
    }
}
