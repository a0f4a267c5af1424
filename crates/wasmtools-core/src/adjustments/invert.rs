//! Per-channel color inversion.

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::luminance::{blend, intensity_fraction};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvertParams {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
    /// Blend amount (0 to 100)
    pub intensity: f32,
}

impl Default for InvertParams {
    fn default() -> Self {
        Self {
            red: true,
            green: true,
            blue: true,
            intensity: 100.0,
        }
    }
}

impl InvertParams {
    /// True when applying would leave every pixel unchanged.
    pub fn is_noop(&self) -> bool {
        intensity_fraction(self.intensity) == 0.0 || !(self.red || self.green || self.blue)
    }
}

/// Invert the selected channels (`255 - v`), blended by `intensity / 100`.
pub fn apply_invert(image: &PixelBuffer, params: &InvertParams) -> PixelBuffer {
    if params.is_noop() {
        return image.clone();
    }
    let f = intensity_fraction(params.intensity);
    let invert = |v: u8, on: bool| if on { blend(v, 255 - v, f) } else { v };

    image.map_pixels(|[r, g, b, a]| {
        [
            invert(r, params.red),
            invert(g, params.green),
            invert(b, params.blue),
            a,
        ]
    })
}
