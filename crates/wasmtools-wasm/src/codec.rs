//! Upload decoding and PNG export bindings.
//!
//! # Example
//!
//! ```typescript
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes, file.type);
//! const png = encode_png(image);
//! const name = export_filename("vignette");
//! ```

use crate::types::{to_js_error, JsPixelBuffer};
use wasm_bindgen::prelude::*;
use wasmtools_core::codec;

/// Decode a PNG, JPEG, WebP or GIF upload. Any other MIME type is rejected.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8], mime: &str) -> Result<JsPixelBuffer, JsValue> {
    codec::decode_image(bytes, mime)
        .map(JsPixelBuffer::from_core)
        .map_err(to_js_error)
}

/// Whether an upload of this MIME type is accepted.
#[wasm_bindgen]
pub fn is_supported_type(mime: &str) -> bool {
    codec::SourceFormat::from_mime(mime).is_ok()
}

/// Encode an image as PNG bytes.
#[wasm_bindgen]
pub fn encode_png(image: &JsPixelBuffer) -> Result<Vec<u8>, JsValue> {
    codec::encode_png(image.as_core()).map_err(to_js_error)
}

/// Download name `<tool>_<timestamp>.png` using the current time.
#[wasm_bindgen]
pub fn export_filename(tool: &str) -> String {
    codec::export_filename(tool, now_ms())
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn now_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
