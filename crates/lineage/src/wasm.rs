//! WebAssembly bindings for Lineage
//!
//! The browser canvas hands over the snapshot as JSON and gets nodes and
//! edges back as JSON.

use wasm_bindgen::prelude::*;

use crate::core::LayoutConfig;

/// Initialize WASM module
///
/// Sets up panic hooks and logging for better error messages in the browser.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use crate::core::logging::init_logging;
    let _ = init_logging(Some("info"), None);
}

/// Lay out a JSON snapshot with the default spacing
///
/// Throws a JavaScript error if the snapshot is not valid JSON.
#[wasm_bindgen]
pub fn compute_layout(input: &str) -> Result<String, JsValue> {
    crate::layout_json(input).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Lay out a JSON snapshot with custom row and column spacing
#[wasm_bindgen]
pub fn compute_layout_with_spacing(
    input: &str,
    horizontal_spacing: f64,
    vertical_spacing: f64,
) -> Result<String, JsValue> {
    let config = LayoutConfig::default()
        .with_horizontal_spacing(horizontal_spacing)
        .with_vertical_spacing(vertical_spacing);

    crate::layout_json_with_config(input, &config).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Ids of the people whose name contains `query`, as a JSON array
#[wasm_bindgen]
pub fn search_people(input: &str, query: &str) -> Result<String, JsValue> {
    let database = crate::parse(input).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let layout = crate::layout(database.people(), database.relationships());
    let ids: Vec<&str> = crate::tree::find_matches(&layout.nodes, query)
        .into_iter()
        .map(|node| node.id.as_str())
        .collect();

    serde_json::to_string(&ids).map_err(|e| JsValue::from_str(&e.to_string()))
}
