//! Posterize: quantize each channel to a fixed number of levels.

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::luminance::{blend, clamp_channel, intensity_fraction};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PosterizeParams {
    /// Number of levels per channel (2 to 255)
    pub levels: u8,
    /// Blend amount (0 to 100)
    pub intensity: f32,
}

impl Default for PosterizeParams {
    fn default() -> Self {
        Self {
            levels: 4,
            intensity: 100.0,
        }
    }
}

/// Build the 256-entry quantization table for `levels` steps.
///
/// Step width is `255 / (levels - 1)`; values round to the nearest step.
pub fn posterize_lut(levels: u8) -> [u8; 256] {
    let step = 255.0 / (levels.max(2) - 1) as f32;
    let mut lut = [0u8; 256];
    for (v, out) in lut.iter_mut().enumerate() {
        *out = clamp_channel((v as f32 / step).round() * step);
    }
    lut
}

/// Posterize every color channel, blended by `intensity / 100`.
pub fn apply_posterize(image: &PixelBuffer, params: &PosterizeParams) -> PixelBuffer {
    let f = intensity_fraction(params.intensity);
    if f == 0.0 {
        return image.clone();
    }
    let lut = posterize_lut(params.levels);
    let quantize = |v: u8| blend(v, lut[v as usize], f);

    image.map_pixels(|[r, g, b, a]| [quantize(r), quantize(g), quantize(b), a])
}
