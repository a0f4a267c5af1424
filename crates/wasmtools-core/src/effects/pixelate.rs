//! Pixelate: point-sampled downscale, optional color quantization, point-sampled upscale.

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PixelateParams {
    /// Block size in pixels (at least 1)
    pub pixel_size: u32,
    /// Target palette size; 0 disables quantization
    pub colors: u32,
}

impl Default for PixelateParams {
    fn default() -> Self {
        Self {
            pixel_size: 8,
            colors: 0,
        }
    }
}

/// Nearest source coordinate for the center of cell `i` when mapping `from` cells onto `to`.
#[inline]
fn point_sample(i: u32, from: u32, to: u32) -> u32 {
    let pos = ((i as f64 + 0.5) * to as f64 / from as f64) as u32;
    pos.min(to - 1)
}

/// Quantization step for a palette of `colors` entries: `256 / cbrt(colors)`.
fn quantize_step(colors: u32) -> Option<f32> {
    (colors > 0).then(|| 256.0 / (colors as f32).cbrt())
}

#[inline]
fn quantize(v: u8, step: f32) -> u8 {
    ((v as f32 / step).floor() * step).min(255.0) as u8
}

/// Downsample to a `ceil(w/size) x ceil(h/size)` grid and scale back up.
///
/// Neither direction smooths. Alpha is sampled but never quantized.
pub fn apply_pixelate(image: &PixelBuffer, params: &PixelateParams) -> PixelBuffer {
    let size = params.pixel_size.max(1);
    let step = quantize_step(params.colors);
    if (size == 1 && step.is_none()) || image.is_empty() {
        return image.clone();
    }

    let (w, h) = image.dimensions();
    let grid_w = w.div_ceil(size);
    let grid_h = h.div_ceil(size);

    // Downscale
    let mut small = PixelBuffer::blank(grid_w, grid_h);
    for gy in 0..grid_h {
        let sy = point_sample(gy, grid_h, h);
        for gx in 0..grid_w {
            let sx = point_sample(gx, grid_w, w);
            let mut px = image.pixel(sx, sy);
            if let Some(step) = step {
                px.r = quantize(px.r, step);
                px.g = quantize(px.g, step);
                px.b = quantize(px.b, step);
            }
            small.set_pixel(gx, gy, px);
        }
    }

    // Upscale
    let mut output = PixelBuffer::blank(w, h);
    for y in 0..h {
        let gy = point_sample(y, h, grid_h);
        for x in 0..w {
            let gx = point_sample(x, w, grid_w);
            output.set_pixel(x, y, small.pixel(gx, gy));
        }
    }
    output
}
