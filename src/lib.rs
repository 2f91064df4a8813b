/// Tab Group Snapshots - Chrome Extension for saving and restoring tab groups
/// Built with Rust + WASM + Yew

mod background;
pub mod chrome;
pub mod error;
pub mod host;
pub mod matching;
pub mod messages;
pub mod service;
pub mod snapshot;
pub mod storage;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Answer one popup request in the background service worker
#[wasm_bindgen]
pub fn handle_message(request: JsValue) -> js_sys::Promise {
    background::handle_message(request)
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
