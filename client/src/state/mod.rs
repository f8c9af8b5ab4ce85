//! Shared client state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` holds the tab's session, `papers` the paper queries and dashboard
//! filters, and `query` the keyed cache both build on.

pub mod auth;
pub mod papers;
pub mod query;
