//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules keep routing rules, form validation and table math out of
//! page components so they can be unit tested without a browser.

pub mod debounce;
pub mod pagination;
pub mod route_guard;
pub mod table;
pub mod validation;
