use wasm_bindgen::JsCast;
use web_sys::{Document, Window};

use crate::error::{HubError, Result};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(HubError::NoWindow)
}

pub fn document() -> Result<Document> {
    window()?.document().ok_or(HubError::NoDocument)
}

/// Looks up `id` and casts it, naming `expected` in the error on a type mismatch.
pub fn element_by_id<T: JsCast>(document: &Document, id: &str, expected: &'static str) -> Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| HubError::MissingElement { id: id.to_owned() })?
        .dyn_into::<T>()
        .map_err(|_| HubError::UnexpectedElement {
            id: id.to_owned(),
            expected,
        })
}
