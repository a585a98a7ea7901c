//! Invoice Extract Web App (Leptos + WASM)

mod app;
pub mod config;
mod file;
mod components;
mod api;
pub mod export;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(app::App);
}
