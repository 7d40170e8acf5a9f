//! Caption Prep Web App (Leptos + WASM)

mod actions;
mod api;
mod app;
mod browser;
mod components;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
    browser::watch_scroll_position();
    leptos::mount::mount_to_body(app::App);
    browser::restore_scroll_position();
}
