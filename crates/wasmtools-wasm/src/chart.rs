//! Chart data binding.
//!
//! The parsed value goes to the charting library as a plain JS object with
//! no reshaping.

use crate::types::to_js_error;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasmtools_core::chart;

/// Parse chart JSON into a JS value.
///
/// On failure the error string carries the line and column for the inline
/// error display, and nothing should be rendered.
#[wasm_bindgen]
pub fn parse_chart_json(text: &str) -> Result<JsValue, JsValue> {
    let value = chart::parse_chart_json(text).map_err(|e| {
        log::warn!("{}", e);
        to_js_error(e)
    })?;
    // Objects, not Maps, so the charting library can read them
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).map_err(to_js_error)
}
