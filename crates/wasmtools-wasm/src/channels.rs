//! WASM bindings for channel operations: separation, mixing and color balance.

use crate::types::{parse_name, to_js_error, JsPixelBuffer};
use wasm_bindgen::prelude::*;
use wasmtools_core::channels::{
    apply_channel_mixer as core_mixer, apply_color_balance as core_balance, extract_channel,
    Channel, ChannelMatrix, ColorBalanceParams, MixerPreset,
};

/// Grayscale view of one channel (`"red"`, `"green"` or `"blue"`).
#[wasm_bindgen]
pub fn separate_channel(image: &JsPixelBuffer, channel: &str) -> Result<JsPixelBuffer, JsValue> {
    let channel: Channel = parse_name(channel).map_err(to_js_error)?;
    Ok(JsPixelBuffer::from_core(extract_channel(
        image.as_core(),
        channel,
    )))
}

/// Mix channels with a 3x3 percent matrix given row by row
/// (`[rr, rg, rb, gr, gg, gb, br, bg, bb]`).
#[wasm_bindgen]
pub fn apply_channel_mixer(image: &JsPixelBuffer, matrix: &[f32]) -> Result<JsPixelBuffer, JsValue> {
    let matrix = matrix_from_slice(matrix).map_err(to_js_error)?;
    Ok(JsPixelBuffer::from_core(core_mixer(image.as_core(), &matrix)))
}

/// The nine matrix values of a named preset (`"sepia"`, `"swap_red_blue"`, ...).
#[wasm_bindgen]
pub fn mixer_preset(name: &str) -> Result<Vec<f32>, JsValue> {
    let preset: MixerPreset = parse_name(name).map_err(to_js_error)?;
    Ok(ChannelMatrix::preset(preset).rows().concat())
}

/// Shift cyan-red, magenta-green and yellow-blue (each -100 to 100).
#[wasm_bindgen]
pub fn apply_color_balance(
    image: &JsPixelBuffer,
    red: f32,
    green: f32,
    blue: f32,
    preserve_luminosity: bool,
) -> JsPixelBuffer {
    let params = ColorBalanceParams {
        red,
        green,
        blue,
        preserve_luminosity,
    };
    JsPixelBuffer::from_core(core_balance(image.as_core(), &params))
}

fn matrix_from_slice(values: &[f32]) -> Result<ChannelMatrix, String> {
    match values {
        [rr, rg, rb, gr, gg, gb, br, bg, bb] => Ok(ChannelMatrix::from_rows(
            [*rr, *rg, *rb],
            [*gr, *gg, *gb],
            [*br, *bg, *bb],
        )),
        _ => Err(format!(
            "Channel matrix needs 9 values, got {}",
            values.len()
        )),
    }
}
