use futures::executor::block_on;

use super::*;
use crate::net::testing::{FakeHttp, FakeLocation, FakeTransport, MemoryTokenStore, empty_response, json_response};

fn client(transport: FakeTransport, tokens: MemoryTokenStore, path: &str) -> FakeHttp {
    HttpClient::new(transport, tokens, FakeLocation::at(path))
}

#[test]
fn attaches_stored_bearer_token() {
    let transport = FakeTransport::new(|_| Ok(empty_response(200)));
    let http = client(transport.clone(), MemoryTokenStore::with_token("tok-1"), "/");

    block_on(http.send(HttpRequest::get("https://api.example/papers"))).unwrap();

    let sent = transport.requests();
    assert_eq!(sent[0].header("authorization"), Some("Bearer tok-1"));
}

#[test]
fn sends_no_authorization_without_token() {
    let transport = FakeTransport::new(|_| Ok(empty_response(200)));
    let http = client(transport.clone(), MemoryTokenStore::default(), "/login");

    block_on(http.send(HttpRequest::get("https://api.example/institutions"))).unwrap();

    assert_eq!(transport.requests()[0].header("Authorization"), None);
}

#[test]
fn captures_rotated_token_header() {
    let transport = FakeTransport::new(|_| {
        Ok(HttpResponse {
            status: 200,
            headers: vec![("Set-Auth-Token".to_owned(), "tok-2".to_owned())],
            ..HttpResponse::default()
        })
    });
    let tokens = MemoryTokenStore::with_token("tok-1");
    let http = client(transport, tokens.clone(), "/login");

    block_on(http.send(HttpRequest::get("https://auth.example/sign-in/email"))).unwrap();

    assert_eq!(tokens.get().as_deref(), Some("tok-2"));
}

#[test]
fn unauthorized_on_protected_path_clears_token_and_redirects() {
    let transport = FakeTransport::new(|_| Ok(json_response(401, &serde_json::json!({ "message": "expired" }))));
    let tokens = MemoryTokenStore::with_token("stale");
    let http = client(transport, tokens.clone(), "/papers/42");

    let err = block_on(http.send(HttpRequest::get("https://api.example/papers/42"))).unwrap_err();

    assert_eq!(err, ClientError::Auth("expired".to_owned()));
    assert_eq!(tokens.get(), None);
    assert_eq!(http.location().assigned(), vec!["/login".to_owned()]);
}

#[test]
fn unauthorized_on_auth_page_leaves_location_alone() {
    let transport = FakeTransport::new(|_| Ok(empty_response(401)));
    let tokens = MemoryTokenStore::with_token("tok");
    let http = client(transport, tokens.clone(), "/login");

    let err = block_on(http.send(HttpRequest::get("https://auth.example/sign-in/email"))).unwrap_err();

    assert!(matches!(err, ClientError::Auth(_)));
    assert!(http.location().assigned().is_empty());
    assert_eq!(tokens.get().as_deref(), Some("tok"));
}

#[test]
fn non_success_status_becomes_remote_error() {
    let transport = FakeTransport::new(|_| Ok(json_response(404, &serde_json::json!({ "message": "Paper not found" }))));
    let http = client(transport, MemoryTokenStore::default(), "/");

    let err = block_on(http.get_json::<serde_json::Value>("https://api.example/papers/9")).unwrap_err();

    assert_eq!(err, ClientError::Remote { status: 404, message: "Paper not found".to_owned() });
}

#[test]
fn transport_failure_propagates() {
    let transport = FakeTransport::new(|_| Err(ClientError::Transport("offline".to_owned())));
    let http = client(transport, MemoryTokenStore::default(), "/");

    let err = block_on(http.send(HttpRequest::get("https://api.example/papers"))).unwrap_err();

    assert_eq!(err.status(), None);
}

#[test]
fn send_json_encodes_body_and_decodes_reply() {
    let transport = FakeTransport::new(|req| {
        let RequestBody::Json(body) = &req.body else {
            return Ok(empty_response(400));
        };
        Ok(json_response(200, &serde_json::json!({ "echo": body["status"] })))
    });
    let http = client(transport.clone(), MemoryTokenStore::default(), "/");

    let reply: serde_json::Value = block_on(http.send_json(
        Method::Put,
        "https://api.example/papers/1/update-status",
        &serde_json::json!({ "status": "published" }),
    ))
    .unwrap();

    assert_eq!(reply["echo"], "published");
    assert_eq!(transport.requests()[0].method, Method::Put);
}

#[test]
fn undecodable_body_reports_status() {
    let transport = FakeTransport::new(|_| {
        Ok(HttpResponse { status: 200, body: "<html>".to_owned(), ..HttpResponse::default() })
    });
    let http = client(transport, MemoryTokenStore::default(), "/");

    let err = block_on(http.get_json::<serde_json::Value>("https://api.example/admin/me")).unwrap_err();

    assert_eq!(err.status(), Some(200));
}

#[test]
fn form_part_name_covers_both_variants() {
    let file = FormPart::File {
        name: "file".to_owned(),
        file: FilePart { file_name: "a.pdf".to_owned(), content_type: "application/pdf".to_owned(), bytes: Vec::new() },
    };
    assert_eq!(file.name(), "file");
    assert_eq!(FormPart::text("title", "x").name(), "title");
}

#[test]
fn unreadable_body_is_transport_error() {
    let err = response_body::<&str>(Err("stream aborted")).unwrap_err();
    assert_eq!(err, ClientError::Transport("failed to read response body: stream aborted".to_owned()));
    assert_eq!(response_body::<&str>(Ok("{}".to_owned())), Ok("{}".to_owned()));
}
