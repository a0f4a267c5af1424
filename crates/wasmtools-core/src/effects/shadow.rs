//! Drop shadow.
//!
//! The canvas grows by `blur * 2 + max(|offset_x|, |offset_y|)` on every side.
//! The source alpha silhouette is offset, blurred with a separable Gaussian
//! and colorized, then the sharp source is composited on top.
//!
//! Blur is capped at [`MAX_BLUR`] and offsets at [`MAX_OFFSET`] pixels.

use serde::{Deserialize, Serialize};

use crate::buffer::{PixelBuffer, Rgba};
use crate::composite::{over, premultiply};
use crate::luminance::{clamp_channel, intensity_fraction};

/// Largest blur radius honored, in pixels.
pub const MAX_BLUR: u32 = 256;

/// Largest offset honored on either axis, in pixels.
pub const MAX_OFFSET: i32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowParams {
    pub offset_x: i32,
    pub offset_y: i32,
    /// Blur radius in pixels; the Gaussian sigma is half of this
    pub blur: u32,
    pub color: Rgba,
    /// Shadow opacity (0 to 100)
    pub opacity: f32,
}

impl Default for ShadowParams {
    fn default() -> Self {
        Self {
            offset_x: 10,
            offset_y: 10,
            blur: 10,
            color: Rgba::BLACK,
            opacity: 50.0,
        }
    }
}

impl ShadowParams {
    /// Copy with blur and offsets limited to the supported range.
    pub fn clamped(&self) -> Self {
        Self {
            offset_x: self.offset_x.clamp(-MAX_OFFSET, MAX_OFFSET),
            offset_y: self.offset_y.clamp(-MAX_OFFSET, MAX_OFFSET),
            blur: self.blur.min(MAX_BLUR),
            ..*self
        }
    }
}

/// Padding added on each side of the canvas.
pub fn shadow_padding(params: &ShadowParams) -> u32 {
    let params = params.clamped();
    params.blur * 2 + params.offset_x.unsigned_abs().max(params.offset_y.unsigned_abs())
}

/// Normalized 1D Gaussian kernel spanning six sigma, odd length.
fn gaussian_kernel_1d(sigma: f32) -> Vec<f32> {
    if sigma <= 0.0 {
        return vec![1.0];
    }

    let kernel_size = ((sigma * 6.0).ceil() as usize) | 1;
    let half = kernel_size / 2;

    let mut kernel: Vec<f32> = (0..kernel_size)
        .map(|i| {
            let x = i as f32 - half as f32;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    for v in kernel.iter_mut() {
        *v /= sum;
    }
    kernel
}

/// Separable blur of a single-channel plane; samples outside the plane are zero.
fn blur_plane(plane: &[f32], width: usize, height: usize, sigma: f32) -> Vec<f32> {
    let kernel = gaussian_kernel_1d(sigma);
    if kernel.len() == 1 {
        return plane.to_vec();
    }
    let half = (kernel.len() / 2) as isize;

    // Horizontal pass
    let mut temp = vec![0.0f32; plane.len()];
    for y in 0..height {
        let row = y * width;
        for x in 0..width {
            let mut sum = 0.0;
            for (k, weight) in kernel.iter().enumerate() {
                let sx = x as isize + k as isize - half;
                if sx >= 0 && (sx as usize) < width {
                    sum += plane[row + sx as usize] * weight;
                }
            }
            temp[row + x] = sum;
        }
    }

    // Vertical pass
    let mut output = vec![0.0f32; plane.len()];
    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0;
            for (k, weight) in kernel.iter().enumerate() {
                let sy = y as isize + k as isize - half;
                if sy >= 0 && (sy as usize) < height {
                    sum += temp[sy as usize * width + x] * weight;
                }
            }
            output[y * width + x] = sum;
        }
    }
    output
}

/// Render the image over a blurred, offset, colorized copy of its silhouette.
///
/// The result is `2 * shadow_padding(params)` larger than the input on each
/// axis; the source sits at `(pad, pad)`.
pub fn apply_drop_shadow(image: &PixelBuffer, params: &ShadowParams) -> PixelBuffer {
    let params = &params.clamped();
    let pad = shadow_padding(params);
    let out_w = image.width.saturating_add(pad * 2);
    let out_h = image.height.saturating_add(pad * 2);
    let (cw, ch) = (out_w as usize, out_h as usize);

    // Offset silhouette
    let mut plane = vec![0.0f32; cw * ch];
    let origin_x = pad as i64 + params.offset_x as i64;
    let origin_y = pad as i64 + params.offset_y as i64;
    for y in 0..image.height {
        let dy = origin_y + y as i64;
        for x in 0..image.width {
            let dx = origin_x + x as i64;
            // Offsets never exceed the padding, so this stays on the canvas
            if (0..out_w as i64).contains(&dx) && (0..out_h as i64).contains(&dy) {
                plane[dy as usize * cw + dx as usize] = image.pixel(x, y).a as f32 / 255.0;
            }
        }
    }

    let blurred = blur_plane(&plane, cw, ch, params.blur as f32 / 2.0);

    let strength = params.color.a as f32 / 255.0 * intensity_fraction(params.opacity);
    let Rgba { r, g, b, .. } = params.color;

    let mut output = PixelBuffer::blank(out_w, out_h);
    for (px, coverage) in output.pixels.chunks_exact_mut(4).zip(&blurred) {
        let a = clamp_channel(coverage * strength * 255.0);
        if a > 0 {
            px.copy_from_slice(&[r, g, b, a]);
        }
    }

    for y in 0..image.height {
        for x in 0..image.width {
            let src = image.pixel(x, y).to_array();
            let idx = output.index(x + pad, y + pad);
            over(&mut output.pixels[idx..idx + 4], premultiply(src));
        }
    }
    output
}
