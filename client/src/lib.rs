//! # client
//!
//! Leptos frontend for the DeSci NG paper administration dashboard.
//!
//! This crate contains the pages, components, session and query state, the
//! HTTP client for the papers API and auth provider, and the form validators.
//! The `server` crate renders it with SSR; the `hydrate` feature builds the
//! browser bundle.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("console logger already set: {err}");
    }
    leptos::mount::hydrate_body(app::App);
}
