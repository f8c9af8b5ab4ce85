//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Access control lives in `RouteGuard`, applied in `app`.

pub mod dashboard;
pub mod forgot_password;
pub mod login;
pub mod paper;
pub mod reset_password;
pub mod signup;
pub mod upload;
pub mod verify_email;
