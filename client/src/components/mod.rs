//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render dashboard chrome, forms and tables while reading shared
//! state from Leptos context providers.

pub mod auth_shell;
pub mod form_error;
pub mod keyword_select;
pub mod pagination;
pub mod paper_table;
pub mod review_dialog;
pub mod sidebar;
pub mod toast;
