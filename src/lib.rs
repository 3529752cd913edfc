//! # dashboard-ui
//!
//! Leptos + WASM frontend for the ops dashboard. This crate owns the
//! client-side session layer: fetching the current auth session from the
//! backend, holding the latest snapshot for the UI subtree, and keeping
//! every open tab of the same origin in sync through a broadcast bus.
//!
//! Routing, page rendering, and the backend auth implementation live
//! elsewhere; everything here is the glue between the session endpoint,
//! the browser broadcast primitive, and Leptos context.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod state;
pub mod util;

/// Client entry point for the `hydrate` build.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
