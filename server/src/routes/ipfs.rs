//! `/api/ipfs/{cid}`: same-origin proxy to the pinning gateway.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::services::ipfs::{IpfsError, parse_cid};
use crate::state::AppState;

const INTERNAL_ERROR_BODY: &str = "Internal server error";

pub async fn proxy(State(state): State<AppState>, Path(cid): Path<String>) -> Response {
    let cid = match parse_cid(&cid) {
        Ok(cid) => cid,
        Err(err) => return ipfs_error_response(err),
    };
    let Some(gateway) = state.ipfs.as_ref() else {
        return ipfs_error_response(IpfsError::NotConfigured);
    };
    match gateway.fetch(cid).await {
        Ok(file) => ([(header::CONTENT_TYPE, file.content_type)], file.body).into_response(),
        Err(err) => ipfs_error_response(err),
    }
}

/// `GET /api/ipfs` and `/api/ipfs/` with no CID segment.
pub async fn missing_cid() -> Response {
    ipfs_error_response(IpfsError::MissingCid)
}

pub(crate) fn ipfs_error_response(err: IpfsError) -> Response {
    let status = err.status_code();
    let message = match &err {
        IpfsError::NotConfigured => {
            tracing::error!("PINATA_GATEWAY_URL / PINATA_GATEWAY_KEY not configured");
            INTERNAL_ERROR_BODY.to_owned()
        }
        IpfsError::Upstream { status, .. } => {
            tracing::warn!(upstream_status = status, "ipfs gateway rejected request");
            err.to_string()
        }
        IpfsError::Request(e) => {
            tracing::error!(error = %e, "ipfs gateway unreachable");
            err.to_string()
        }
        IpfsError::InvalidCid => {
            tracing::warn!("rejected malformed cid");
            err.to_string()
        }
        IpfsError::MissingCid => err.to_string(),
    };
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}
