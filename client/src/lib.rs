//! # client
//!
//! Leptos + WASM frontend for EduVault.
//!
//! This crate contains the route tree, pages, components, auth state and
//! the browser-side adapters around `authkit`: BroadcastChannel/`localStorage`
//! transports for the cross-tab auth bus, the backend API calls, and the
//! route guard.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: installs logging and hydrates the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
