//! Live, line-numbered terminal output for forms that launch server-sent event streams.
//!
//! Host pages can either call the exported functions directly
//! (`registerEventSource`, `addTerminalLine`, `clearTerminal`) or mount the
//! full task hub with `mountScriptHub`.

mod app;
pub mod components;
pub mod config;
pub mod dom;
pub mod error;
pub mod form;
pub mod stream;
pub mod terminal;

use wasm_bindgen::prelude::*;
use web_sys::Element;

pub use app::{App, AppProps};
pub use config::HubConfig;
pub use error::HubError;
pub use terminal::{LineSink, Terminal};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
}

#[wasm_bindgen(js_name = registerEventSource)]
pub fn register_event_source(
    form_id: &str,
    terminal_id: &str,
    endpoint: &str,
) -> std::result::Result<(), JsValue> {
    stream::register_event_source(form_id, terminal_id, endpoint)?;
    Ok(())
}

#[wasm_bindgen(js_name = addTerminalLine)]
pub fn add_terminal_line(terminal_id: &str, text: &str) -> std::result::Result<u32, JsValue> {
    let mut terminal = Terminal::from_id(&dom::document()?, terminal_id)?;
    let number = terminal.append_line(text)?;
    Ok(number as u32)
}

#[wasm_bindgen(js_name = clearTerminal)]
pub fn clear_terminal(terminal_id: &str) -> std::result::Result<(), JsValue> {
    Terminal::from_id(&dom::document()?, terminal_id)?.clear();
    Ok(())
}

/// Renders the task hub into `root_id` using the page's embedded config, if any.
#[wasm_bindgen(js_name = mountScriptHub)]
pub fn mount_script_hub(root_id: &str) -> std::result::Result<(), JsValue> {
    let document = dom::document()?;
    let root = dom::element_by_id::<Element>(&document, root_id, "element")?;
    let config = HubConfig::from_document(&document)?;
    log::info!("mounting script hub with {} task(s)", config.tasks.len());
    yew::Renderer::<App>::with_root_and_props(root, AppProps { config }).render();
    Ok(())
}
