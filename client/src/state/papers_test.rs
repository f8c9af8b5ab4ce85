use std::sync::{Arc, Mutex};

use futures::executor::block_on;

use super::*;
use crate::config::ClientConfig;
use crate::net::http::{HttpClient, Method, RequestBody};
use crate::net::testing::{
    FakeLocation, FakeTransport, MemoryTokenStore, empty_response, json_response,
};
use crate::net::types::RejectionReason;

type FakeQueries = PaperQueries<FakeTransport, MemoryTokenStore, FakeLocation>;

fn paper_json(id: u64, status: PaperStatus) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": format!("Paper {id}"),
        "abstract": "...",
        "status": status.as_str(),
        "ipfsCid": "bafy",
        "ipfsUrl": "",
        "userId": 1,
        "categoryId": 1,
        "keywords": [],
        "user": { "id": 1, "name": "Ada", "email": "ada@example.com" },
        "createdAt": "2025-01-01T00:00:00Z",
        "updatedAt": "2025-01-01T00:00:00Z"
    })
}

/// Fake papers API backed by a status table that `update-status` mutates.
fn papers_api() -> (FakeQueries, FakeTransport) {
    let statuses = Arc::new(Mutex::new(vec![(41_u64, PaperStatus::Pending), (42, PaperStatus::Pending)]));
    let transport = FakeTransport::new(move |req| {
        let mut statuses = statuses.lock().unwrap();
        let path = req.url.trim_start_matches("https://api.example");
        if req.method == Method::Put && path == "/papers/42/update-status" {
            let RequestBody::Json(body) = &req.body else {
                return Ok(empty_response(400));
            };
            let next: PaperStatus = serde_json::from_value(body["status"].clone()).unwrap();
            for entry in statuses.iter_mut().filter(|(id, _)| *id == 42) {
                entry.1 = next;
            }
            return Ok(json_response(200, &serde_json::json!({ "ok": true })));
        }
        if path.starts_with("/papers?") {
            let data: Vec<_> = statuses.iter().map(|(id, status)| paper_json(*id, *status)).collect();
            return Ok(json_response(
                200,
                &serde_json::json!({ "data": data, "total": 2, "size": 10, "next_page": null, "prev_page": null }),
            ));
        }
        if let Some(id) = path.strip_prefix("/papers/") {
            let id: u64 = id.parse().unwrap();
            return Ok(json_response(200, &paper_json(id, PaperStatus::Pending)));
        }
        Ok(empty_response(404))
    });
    let http = HttpClient::new(transport.clone(), MemoryTokenStore::with_token("tok"), FakeLocation::at("/"));
    let api = ApiClient::new(http, ClientConfig::new("https://api.example", "https://auth.example"));
    (PaperQueries::new(api), transport)
}

fn status_of(list: &PaperList, id: u64) -> PaperStatus {
    list.data.iter().find(|p| p.id == id).map(|p| p.status).unwrap()
}

// =============================================================
// Keys
// =============================================================

#[test]
fn default_key_is_first_pending_page() {
    let key = PaperListKey::default();
    assert_eq!(key.query_pairs(), vec![("page", "1".to_owned()), ("status", "pending".to_owned())]);
}

#[test]
fn key_includes_search_and_user_when_present() {
    let key = PaperListKey {
        search: " soil ".to_owned(),
        user_id: Some("7".to_owned()),
        page: 3,
        status: PaperStatus::Rejected,
    };
    assert_eq!(
        key.query_pairs(),
        vec![
            ("search", "soil".to_owned()),
            ("userId", "7".to_owned()),
            ("page", "3".to_owned()),
            ("status", "rejected".to_owned()),
        ]
    );
}

// =============================================================
// Queries
// =============================================================

#[test]
fn identical_keys_issue_one_request() {
    let (queries, transport) = papers_api();
    let key = PaperListKey::default();

    block_on(queries.list(&key)).unwrap();
    block_on(queries.list(&key.clone())).unwrap();

    assert_eq!(transport.count(), 1);
}

#[test]
fn changing_any_key_part_refetches() {
    let (queries, transport) = papers_api();
    let base = PaperListKey::default();

    block_on(queries.list(&base)).unwrap();
    block_on(queries.list(&PaperListKey { page: 2, ..base.clone() })).unwrap();
    block_on(queries.list(&PaperListKey { search: "soil".to_owned(), ..base.clone() })).unwrap();
    block_on(queries.list(&PaperListKey { status: PaperStatus::Published, ..base.clone() })).unwrap();
    block_on(queries.list(&PaperListKey { user_id: Some("1".to_owned()), ..base })).unwrap();

    assert_eq!(transport.count(), 5);
}

#[test]
fn detail_is_cached_by_id() {
    let (queries, transport) = papers_api();
    let paper = block_on(queries.detail(41)).unwrap();
    block_on(queries.detail(41)).unwrap();
    assert_eq!(paper.id, 41);
    assert_eq!(transport.count(), 1);
}

#[test]
fn rejecting_paper_invalidates_lists() {
    let (queries, transport) = papers_api();
    let key = PaperListKey::default();

    let before = block_on(queries.list(&key)).unwrap();
    assert_eq!(status_of(&before, 42), PaperStatus::Pending);

    let reason = RejectionReason::new("duplicate submission").unwrap();
    block_on(queries.update_status(42, &StatusChange::Reject(reason))).unwrap();

    let after = block_on(queries.list(&key)).unwrap();
    assert_eq!(status_of(&after, 42), PaperStatus::Rejected);

    let sent = transport.requests();
    assert_eq!(sent.len(), 3);
    assert_eq!(
        sent[1].body,
        RequestBody::Json(serde_json::json!({ "status": "rejected", "rejectionReason": "duplicate submission" }))
    );
}

#[test]
fn failed_update_keeps_cache() {
    let transport = FakeTransport::new(|req| {
        if req.method == Method::Put {
            return Ok(json_response(500, &serde_json::json!({ "message": "database down" })));
        }
        Ok(json_response(200, &serde_json::json!({ "data": [], "total": 0, "size": 10 })))
    });
    let http = HttpClient::new(transport.clone(), MemoryTokenStore::default(), FakeLocation::at("/"));
    let queries = PaperQueries::new(ApiClient::new(http, ClientConfig::new("https://api.example", "https://auth.example")));
    let key = PaperListKey::default();

    block_on(queries.list(&key)).unwrap();
    let err = block_on(queries.update_status(1, &StatusChange::Publish)).unwrap_err();
    block_on(queries.list(&key)).unwrap();

    assert_eq!(err.to_string(), "database down");
    assert_eq!(transport.count(), 2);
}

// =============================================================
// Filters
// =============================================================

#[test]
fn status_change_resets_page() {
    let mut filters = PaperFilters { page: 4, ..PaperFilters::default() };
    filters.set_status(PaperStatus::Published);
    assert_eq!(filters.page, 1);

    filters.page = 3;
    filters.set_status(PaperStatus::Published);
    assert_eq!(filters.page, 3);
}

#[test]
fn commit_search_only_changes_on_new_text() {
    let mut filters = PaperFilters { page: 2, search_input: " soil ".to_owned(), ..PaperFilters::default() };
    assert!(filters.commit_search());
    assert_eq!(filters.search, "soil");
    assert_eq!(filters.page, 1);

    filters.page = 2;
    assert!(!filters.commit_search());
    assert_eq!(filters.page, 2);
}

#[test]
fn set_page_clamps_to_range() {
    let mut filters = PaperFilters::default();
    filters.set_page(9, 3);
    assert_eq!(filters.page, 3);
    filters.set_page(0, 3);
    assert_eq!(filters.page, 1);
    assert_eq!(filters.key(None).page, 1);
}
