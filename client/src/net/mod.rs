//! Networking: bearer-token HTTP client, API operations, wire types.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` owns token handling and the 401 path, `api` maps each REST and
//! auth-provider endpoint to a typed method, and `types` defines the JSON
//! schema shared by both.

pub mod api;
pub mod http;
#[cfg(test)]
pub(crate) mod testing;
pub mod types;
