use super::*;

#[test]
fn success_maps_to_success() {
    assert_eq!(VerifyStatus::from_result(Ok(())), VerifyStatus::Success);
}

#[test]
fn expired_token_maps_to_expired() {
    let err = ClientError::Remote { status: 400, message: "Token expired".to_owned() };
    assert_eq!(VerifyStatus::from_result(Err(err)), VerifyStatus::Expired);
}

#[test]
fn other_failures_keep_their_message() {
    let err = ClientError::Remote { status: 400, message: "Invalid token".to_owned() };
    assert_eq!(VerifyStatus::from_result(Err(err)), VerifyStatus::Error("Invalid token".to_owned()));
}
