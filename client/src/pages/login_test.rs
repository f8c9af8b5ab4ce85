use super::*;

#[test]
fn unverified_email_error_becomes_hint() {
    let err = login_error(ClientError::Remote { status: 403, message: "Email not verified. Please verify your email".to_owned() });
    assert_eq!(err.to_string(), VERIFY_EMAIL_HINT);
    assert_eq!(err.status(), Some(403));
}

#[test]
fn other_errors_pass_through() {
    let err = login_error(ClientError::Auth("Invalid email or password".to_owned()));
    assert_eq!(err, ClientError::Auth("Invalid email or password".to_owned()));
}

#[test]
fn after_login_prefers_local_return_to() {
    assert_eq!(after_login_target("?returnTo=%2Fpapers%2F3"), "/papers/3");
    assert_eq!(after_login_target("?returnTo=https%3A%2F%2Fevil.example"), "/");
    assert_eq!(after_login_target(""), "/");
}
