//! Tonal adjustment WASM bindings.
//!
//! Each binding takes the slider values directly and returns a new image.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const brighter = apply_exposure(image, 40, 0, 0);
//! const gray = apply_grayscale(brighter, "average", 100);
//! ```

use crate::types::{parse_name, to_js_error, JsPixelBuffer};
use wasm_bindgen::prelude::*;
use wasmtools_core::adjustments::{self as core, GrayMethod};

/// Contrast (-100 to 100).
#[wasm_bindgen]
pub fn apply_contrast(image: &JsPixelBuffer, contrast: f32) -> JsPixelBuffer {
    let params = core::ContrastParams { contrast };
    JsPixelBuffer::from_core(core::apply_contrast(image.as_core(), &params))
}

/// Exposure with highlight and shadow bands (each -100 to 100).
#[wasm_bindgen]
pub fn apply_exposure(
    image: &JsPixelBuffer,
    exposure: f32,
    highlights: f32,
    shadows: f32,
) -> JsPixelBuffer {
    let params = core::ExposureParams {
        exposure,
        highlights,
        shadows,
    };
    JsPixelBuffer::from_core(core::apply_exposure(image.as_core(), &params))
}

/// Saturation (-100 to 100).
#[wasm_bindgen]
pub fn apply_saturation(image: &JsPixelBuffer, saturation: f32) -> JsPixelBuffer {
    let params = core::SaturationParams { saturation };
    JsPixelBuffer::from_core(core::apply_saturation(image.as_core(), &params))
}

/// Temperature and tint (each -100 to 100).
#[wasm_bindgen]
pub fn apply_temperature(image: &JsPixelBuffer, temperature: f32, tint: f32) -> JsPixelBuffer {
    let params = core::TemperatureParams { temperature, tint };
    JsPixelBuffer::from_core(core::apply_temperature(image.as_core(), &params))
}

/// Grayscale by `method` (`luminosity`, `average`, `lightness`, `desaturate`).
#[wasm_bindgen]
pub fn apply_grayscale(
    image: &JsPixelBuffer,
    method: &str,
    intensity: f32,
) -> Result<JsPixelBuffer, JsValue> {
    let method: GrayMethod = parse_name(method).map_err(to_js_error)?;
    let params = core::GrayscaleParams { method, intensity };
    Ok(JsPixelBuffer::from_core(core::apply_grayscale(
        image.as_core(),
        &params,
    )))
}

/// Invert the selected channels.
#[wasm_bindgen]
pub fn apply_invert(
    image: &JsPixelBuffer,
    red: bool,
    green: bool,
    blue: bool,
    intensity: f32,
) -> JsPixelBuffer {
    let params = core::InvertParams {
        red,
        green,
        blue,
        intensity,
    };
    JsPixelBuffer::from_core(core::apply_invert(image.as_core(), &params))
}

/// Posterize to `levels` values per channel.
#[wasm_bindgen]
pub fn apply_posterize(image: &JsPixelBuffer, levels: u8, intensity: f32) -> JsPixelBuffer {
    let params = core::PosterizeParams { levels, intensity };
    JsPixelBuffer::from_core(core::apply_posterize(image.as_core(), &params))
}
