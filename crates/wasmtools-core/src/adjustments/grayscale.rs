//! Grayscale conversion with selectable luminance method.

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::luminance::{blend, clamp_channel, intensity_fraction, luminance};

/// How gray is derived from a color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrayMethod {
    /// Weighted 0.299 / 0.587 / 0.114.
    #[default]
    Luminosity,
    /// Mean of R, G and B.
    Average,
    /// (max + min) / 2.
    Lightness,
    /// Same formula as `Lightness`; kept as its own preset.
    Desaturate,
}

impl GrayMethod {
    /// Gray value for one pixel.
    #[inline]
    pub fn gray(self, r: u8, g: u8, b: u8) -> u8 {
        let (rf, gf, bf) = (r as f32, g as f32, b as f32);
        match self {
            GrayMethod::Luminosity => clamp_channel(luminance(rf, gf, bf)),
            GrayMethod::Average => clamp_channel((rf + gf + bf) / 3.0),
            GrayMethod::Lightness | GrayMethod::Desaturate => {
                let max = r.max(g).max(b) as f32;
                let min = r.min(g).min(b) as f32;
                clamp_channel((max + min) / 2.0)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrayscaleParams {
    pub method: GrayMethod,
    /// Blend amount (0 to 100)
    pub intensity: f32,
}

impl Default for GrayscaleParams {
    fn default() -> Self {
        Self {
            method: GrayMethod::Luminosity,
            intensity: 100.0,
        }
    }
}

/// Convert to grayscale, blended with the original by `intensity / 100`.
pub fn apply_grayscale(image: &PixelBuffer, params: &GrayscaleParams) -> PixelBuffer {
    let f = intensity_fraction(params.intensity);
    if f == 0.0 {
        return image.clone();
    }
    let method = params.method;

    image.map_pixels(|[r, g, b, a]| {
        let gray = method.gray(r, g, b);
        [blend(r, gray, f), blend(g, gray, f), blend(b, gray, f), a]
    })
}
