use super::*;
use crate::util::validation::fields;

#[test]
fn validation_errors_stay_on_fields() {
    let (field_errors, root) = split_error(FieldErrors::single(fields::EMAIL, "Email is required").into());
    assert_eq!(field_errors.get(fields::EMAIL), Some("Email is required"));
    assert_eq!(root, None);
}

#[test]
fn remote_errors_become_root_message() {
    let (field_errors, root) = split_error(ClientError::Remote { status: 422, message: "Email already in use".to_owned() });
    assert!(field_errors.is_empty());
    assert_eq!(root.as_deref(), Some("Email already in use"));
}

#[test]
fn transport_errors_become_root_message() {
    let (_, root) = split_error(ClientError::Transport("offline".to_owned()));
    assert_eq!(root.as_deref(), Some("network error: offline"));
}
