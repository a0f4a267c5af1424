//! WASM bindings for stylized effects.

use crate::types::{to_js_error, JsPixelBuffer};
use wasm_bindgen::prelude::*;
use wasmtools_core::effects::{
    apply_drop_shadow as core_shadow, apply_pixelate as core_pixelate,
    apply_rounded_corners as core_corners, apply_vignette as core_vignette, shadow_padding,
    CornerRadii, PixelateParams, ShadowParams, VignetteParams,
};
use wasmtools_core::Rgba;

/// Radial darkening; all three values are 0 to 100.
#[wasm_bindgen]
pub fn apply_vignette(
    image: &JsPixelBuffer,
    intensity: f32,
    radius: f32,
    softness: f32,
) -> JsPixelBuffer {
    let params = VignetteParams {
        intensity,
        radius,
        softness,
    };
    JsPixelBuffer::from_core(core_vignette(image.as_core(), &params))
}

/// Blocky downscale; `colors = 0` keeps the full palette.
#[wasm_bindgen]
pub fn apply_pixelate(image: &JsPixelBuffer, pixel_size: u32, colors: u32) -> JsPixelBuffer {
    let params = PixelateParams { pixel_size, colors };
    JsPixelBuffer::from_core(core_pixelate(image.as_core(), &params))
}

/// Round each corner by its own radius in pixels.
#[wasm_bindgen]
pub fn apply_rounded_corners(
    image: &JsPixelBuffer,
    top_left: f32,
    top_right: f32,
    bottom_left: f32,
    bottom_right: f32,
) -> JsPixelBuffer {
    let radii = CornerRadii {
        top_left,
        top_right,
        bottom_left,
        bottom_right,
    };
    JsPixelBuffer::from_core(core_corners(image.as_core(), &radii))
}

/// Drop shadow behind the image. The result is larger than the input.
///
/// `color` is a `#rgb`, `#rrggbb` or `#rrggbbaa` string; `opacity` is 0 to 100.
#[wasm_bindgen]
pub fn apply_drop_shadow(
    image: &JsPixelBuffer,
    offset_x: i32,
    offset_y: i32,
    blur: u32,
    color: &str,
    opacity: f32,
) -> Result<JsPixelBuffer, JsValue> {
    let params = ShadowParams {
        offset_x,
        offset_y,
        blur,
        color: Rgba::from_hex(color).map_err(to_js_error)?,
        opacity,
    };
    Ok(JsPixelBuffer::from_core(core_shadow(image.as_core(), &params)))
}

/// Padding the drop shadow adds on each side.
#[wasm_bindgen]
pub fn drop_shadow_padding(offset_x: i32, offset_y: i32, blur: u32) -> u32 {
    shadow_padding(&ShadowParams {
        offset_x,
        offset_y,
        blur,
        ..Default::default()
    })
}
