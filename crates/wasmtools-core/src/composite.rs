//! Porter-Duff "source over" compositing on RGBA8 storage.
//!
//! Samples being composited travel as premultiplied `[r, g, b, a]` where the
//! color channels are on the 0-255 scale and alpha is 0.0-1.0.

use crate::luminance::clamp_channel;

/// Premultiplied sample: color 0-255 (already multiplied by alpha), alpha 0-1.
pub type Premultiplied = [f32; 4];

/// Premultiply a stored RGBA8 pixel.
#[inline]
pub fn premultiply(px: [u8; 4]) -> Premultiplied {
    let a = px[3] as f32 / 255.0;
    [px[0] as f32 * a, px[1] as f32 * a, px[2] as f32 * a, a]
}

/// Composite a premultiplied sample over the straight-alpha pixel `dst`.
#[inline]
pub fn over(dst: &mut [u8], src: Premultiplied) {
    let sa = src[3].clamp(0.0, 1.0);
    if sa <= 0.0 {
        return;
    }
    let da = dst[3] as f32 / 255.0;
    let keep = da * (1.0 - sa);
    let out_a = sa + keep;

    for c in 0..3 {
        dst[c] = clamp_channel((src[c] + dst[c] as f32 * keep) / out_a);
    }
    dst[3] = clamp_channel(out_a * 255.0);
}
