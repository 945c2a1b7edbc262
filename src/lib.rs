//! HRCompass - HR management portal
//!
//! Leptos front end for an HR backend: staff manage employees and leave,
//! employees use a self-service portal. The `core` module holds the
//! framework-independent client, services and session logic.

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
