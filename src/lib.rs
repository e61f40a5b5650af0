//! Treasury Monitor Console
//!
//! Browser console for the Treasury Monitor service: sign-in with token
//! refresh, protected pages for metrics, alerts and billing, and a
//! searchable documentation index. Built with Leptos (SSR + hydration) and
//! served by axum, which also proxies `/api` to the backend.

#![recursion_limit = "4096"]

pub mod app;
pub mod core;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
