//! WASM Tools - WebAssembly bindings
//!
//! This crate exposes the wasmtools-core transforms, calculators and helpers
//! to the browser pages.
//!
//! # Module Structure
//!
//! - `types` - `JsPixelBuffer`, the RGBA image handle
//! - `adjustments`, `transform`, `channels`, `effects` - one binding per transform
//! - `editor` - tool objects and the per-page editor
//! - `codec` - upload decoding and PNG export
//! - `calculator` - keypad, programmer and fraction calculators
//! - `i18n` - translations and the persisted language
//! - `chart` - chart JSON parsing
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, apply_vignette, encode_png } from 'wasmtools-wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes, file.type);
//! const result = apply_vignette(image, 60, 40, 50);
//! const png = encode_png(result);
//! ```

use wasm_bindgen::prelude::*;

mod adjustments;
mod calculator;
mod channels;
mod chart;
mod codec;
mod editor;
mod effects;
mod i18n;
mod logger;
mod transform;
mod types;

// Re-export public types
pub use adjustments::{
    apply_contrast, apply_exposure, apply_grayscale, apply_invert, apply_posterize,
    apply_saturation, apply_temperature,
};
pub use calculator::{
    fraction_evaluate, fraction_to_decimal, fraction_to_mixed, JsBasicCalculator,
    JsProgrammerCalculator,
};
pub use channels::{apply_channel_mixer, apply_color_balance, mixer_preset, separate_channel};
pub use chart::parse_chart_json;
pub use codec::{decode_image, encode_png, export_filename, is_supported_type};
pub use editor::{apply_tool, JsEditor};
pub use effects::{
    apply_drop_shadow, apply_pixelate, apply_rounded_corners, apply_vignette, drop_shadow_padding,
};
pub use i18n::{get_language, normalize_language, set_language, translate};
pub use transform::{apply_flip, apply_rotation, rotated_bounds};
pub use types::JsPixelBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::init();
    log::debug!("wasmtools {} ready", version());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_init_twice() {
        init();
        init();
    }
}
