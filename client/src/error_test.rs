use super::*;

#[test]
fn from_response_prefers_message_field() {
    let err = ClientError::from_response(422, r#"{"message":"Email already in use"}"#);
    assert_eq!(err, ClientError::Remote { status: 422, message: "Email already in use".to_owned() });
}

#[test]
fn from_response_reads_error_field() {
    let err = ClientError::from_response(500, r#"{"error":"Failed to fetch from Pinata: Not Found"}"#);
    assert_eq!(err.to_string(), "Failed to fetch from Pinata: Not Found");
}

#[test]
fn from_response_falls_back_to_status_message() {
    let err = ClientError::from_response(502, "<html>bad gateway</html>");
    assert_eq!(err.to_string(), "request failed: 502");
}

#[test]
fn from_response_maps_401_to_auth() {
    let err = ClientError::from_response(401, r#"{"message":"Invalid email or password"}"#);
    assert_eq!(err, ClientError::Auth("Invalid email or password".to_owned()));
    assert_eq!(err.status(), Some(401));
}

#[test]
fn blank_message_is_ignored() {
    let err = ClientError::from_response(400, r#"{"message":"   "}"#);
    assert_eq!(err.to_string(), "request failed: 400");
}

#[test]
fn transport_error_has_no_status() {
    let err = ClientError::Transport("connection refused".to_owned());
    assert_eq!(err.status(), None);
    assert_eq!(err.to_string(), "network error: connection refused");
}

#[test]
fn is_expired_matches_case_insensitively() {
    assert!(ClientError::from_response(400, r#"{"message":"Token EXPIRED"}"#).is_expired());
    assert!(!ClientError::from_response(400, r#"{"message":"invalid token"}"#).is_expired());
}
