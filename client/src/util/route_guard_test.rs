use super::*;
use crate::net::types::User;

fn signed_in() -> AuthState {
    AuthState {
        user: Some(User {
            id: "u1".to_owned(),
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            institution_id: None,
            areas_of_interest: Vec::new(),
        }),
        loading: false,
    }
}

fn signed_out() -> AuthState {
    AuthState { user: None, loading: false }
}

// =============================================================
// Matching
// =============================================================

#[test]
fn root_route_matches_only_root() {
    assert!(route_matches("/", "/"));
    assert!(!route_matches("/", "/login"));
}

#[test]
fn routes_match_on_segment_boundaries() {
    assert!(route_matches("/papers", "/papers"));
    assert!(route_matches("/papers", "/papers/42"));
    assert!(!route_matches("/papers", "/papersmith"));
    assert!(!route_matches("/login", "/login-help"));
}

#[test]
fn protected_and_auth_lists_are_disjoint() {
    for path in AUTH_ROUTES {
        assert!(!is_protected_path(path), "{path}");
    }
    assert!(is_protected_path("/upload-paper"));
    assert!(is_protected_path("/papers/7"));
    assert!(is_auth_path("/verify-email"));
    assert!(!is_protected_path("/about"));
}

// =============================================================
// Redirect targets
// =============================================================

#[test]
fn login_redirect_encodes_path() {
    assert_eq!(login_redirect("/papers/42"), "/login?returnTo=%2Fpapers%2F42");
}

#[test]
fn return_to_accepts_only_local_paths() {
    assert_eq!(return_to("?returnTo=%2Fpapers%2F42").as_deref(), Some("/papers/42"));
    assert_eq!(return_to("returnTo=/upload-paper&x=1").as_deref(), Some("/upload-paper"));
    assert_eq!(return_to("?returnTo=https%3A%2F%2Fevil.example"), None);
    assert_eq!(return_to("?returnTo=%2F%2Fevil.example"), None);
    assert_eq!(return_to("?returnTo=%2F%5Cevil.example"), None);
    assert_eq!(return_to("?returnTo=%2F%09%2Fevil.example"), None);
    assert_eq!(return_to("?returnTo=%2Fpapers%3Fpage%3D2").as_deref(), Some("/papers?page=2"));
    assert_eq!(return_to(""), None);
}

// =============================================================
// Decisions
// =============================================================

#[test]
fn loading_never_redirects() {
    let state = AuthState { user: None, loading: true };
    assert_eq!(decide(&state, "/", "", None), GuardDecision::Loading);
    assert_eq!(decide(&state, "/login", "", None), GuardDecision::Loading);
}

#[test]
fn protected_path_without_session_goes_to_login() {
    assert_eq!(
        decide(&signed_out(), "/papers/42", "", None),
        GuardDecision::Redirect("/login?returnTo=%2Fpapers%2F42".to_owned())
    );
}

#[test]
fn auth_path_with_session_goes_home_or_return_to() {
    assert_eq!(decide(&signed_in(), "/login", "", None), GuardDecision::Redirect("/".to_owned()));
    assert_eq!(
        decide(&signed_in(), "/login", "?returnTo=%2Fpapers%2F42", None),
        GuardDecision::Redirect("/papers/42".to_owned())
    );
}

#[test]
fn explicit_redirect_overrides_return_to() {
    assert_eq!(
        decide(&signed_in(), "/signup", "?returnTo=%2Fpapers", Some("/upload-paper")),
        GuardDecision::Redirect("/upload-paper".to_owned())
    );
}

#[test]
fn matching_session_state_is_allowed() {
    assert_eq!(decide(&signed_in(), "/", "", None), GuardDecision::Allow);
    assert_eq!(decide(&signed_out(), "/login", "", None), GuardDecision::Allow);
    assert_eq!(decide(&signed_out(), "/about", "", None), GuardDecision::Allow);
}
