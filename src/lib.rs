/// Video Notes Web - browser front end for video study notes and Q&A
/// Built with Rust + WASM + Yew

mod api;
mod chat;
mod export;
mod notes_data;
mod outline;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export the outline parser for JavaScript access
#[wasm_bindgen]
pub fn parse_outline(raw: &str) -> JsValue {
    let sections = outline::parse(raw);
    serde_wasm_bindgen::to_value(&sections).unwrap_or(JsValue::NULL)
}

// Start the Yew app for the notes page
#[wasm_bindgen]
pub fn start_notes_page() {
    yew::Renderer::<ui::notes::NotesPage>::new().render();
}

// Start the Yew app for the Q&A page
#[wasm_bindgen]
pub fn start_qna_page() {
    yew::Renderer::<ui::qna::QnaPage>::new().render();
}
