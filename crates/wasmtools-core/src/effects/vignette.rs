//! Radial darkening toward the image edges.
//!
//! A black overlay whose alpha follows a radial gradient centered on the
//! image: transparent inside `inner`, `intensity / 100` beyond `outer`,
//! linear in between.

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::composite::over;
use crate::luminance::intensity_fraction;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VignetteParams {
    /// Maximum darkening (0 to 100)
    pub intensity: f32,
    /// Untouched radius as a percentage of the center-to-corner distance
    pub radius: f32,
    /// Width of the falloff (0 to 100)
    pub softness: f32,
}

impl Default for VignetteParams {
    fn default() -> Self {
        Self {
            intensity: 50.0,
            radius: 50.0,
            softness: 50.0,
        }
    }
}

/// Gradient radii for an image of the given size.
fn gradient_radii(width: u32, height: u32, params: &VignetteParams) -> (f32, f32) {
    let half_w = width as f32 / 2.0;
    let half_h = height as f32 / 2.0;
    let max_dist = (half_w * half_w + half_h * half_h).sqrt();

    let inner = max_dist * params.radius / 100.0;
    let outer = inner + max_dist * (params.softness / 100.0) * 0.5;
    (inner, outer)
}

/// Overlay alpha (0-1) at distance `d` from the center.
#[inline]
fn overlay_alpha(d: f32, inner: f32, outer: f32, max_alpha: f32) -> f32 {
    if d <= inner {
        0.0
    } else if d >= outer {
        max_alpha
    } else {
        max_alpha * (d - inner) / (outer - inner)
    }
}

/// Darken the image with a radial black gradient.
pub fn apply_vignette(image: &PixelBuffer, params: &VignetteParams) -> PixelBuffer {
    let max_alpha = intensity_fraction(params.intensity);
    if max_alpha == 0.0 || image.is_empty() {
        return image.clone();
    }
    let (inner, outer) = gradient_radii(image.width, image.height, params);
    let cx = image.width as f32 / 2.0;
    let cy = image.height as f32 / 2.0;

    let mut output = image.clone();
    for y in 0..image.height {
        for x in 0..image.width {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let a = overlay_alpha((dx * dx + dy * dy).sqrt(), inner, outer, max_alpha);
            if a > 0.0 {
                let idx = output.index(x, y);
                // Black premultiplied: color stays 0
                over(&mut output.pixels[idx..idx + 4], [0.0, 0.0, 0.0, a]);
            }
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Rgba;

    #[test]
    fn test_zero_intensity_is_identity() {
        let img = PixelBuffer::filled(6, 4, Rgba::rgb(200, 100, 50));
        let params = VignetteParams {
            intensity: 0.0,
            ..Default::default()
        };
        assert_eq!(apply_vignette(&img, &params), img);
    }

    #[test]
    fn test_hard_vignette_keeps_only_center() {
        let img = PixelBuffer::filled(5, 5, Rgba::WHITE);
        let out = apply_vignette(
            &img,
            &VignetteParams {
                intensity: 100.0,
                radius: 0.0,
                softness: 0.0,
            },
        );
        assert_eq!(out.pixel(2, 2), Rgba::WHITE);
        assert_eq!(out.pixel(0, 0), Rgba::BLACK);
        assert_eq!(out.pixel(4, 2), Rgba::BLACK);
    }

    #[test]
    fn test_only_darkens() {
        let img = PixelBuffer::filled(9, 7, Rgba::rgb(180, 120, 60));
        let out = apply_vignette(&img, &VignetteParams::default());
        for (a, b) in img.pixels.chunks(4).zip(out.pixels.chunks(4)) {
            assert!(b[0] <= a[0] && b[1] <= a[1] && b[2] <= a[2]);
            assert_eq!(b[3], 255);
        }
    }

    #[test]
    fn test_falloff_is_monotonic_toward_corner() {
        let img = PixelBuffer::filled(21, 21, Rgba::WHITE);
        let out = apply_vignette(
            &img,
            &VignetteParams {
                intensity: 80.0,
                radius: 10.0,
                softness: 100.0,
            },
        );
        let mut prev = 255;
        for i in (0..=10).rev() {
            let v = out.pixel(i, i).r;
            assert!(v <= prev, "diagonal should darken outward");
            prev = v;
        }
        // Corner reaches at most 80% darkening
        assert!(out.pixel(0, 0).r >= 50);
    }

    #[test]
    fn test_gradient_radii() {
        // 6x8: max_dist = 5
        let (inner, outer) = gradient_radii(
            6,
            8,
            &VignetteParams {
                intensity: 100.0,
                radius: 40.0,
                softness: 60.0,
            },
        );
        assert!((inner - 2.0).abs() < 1e-5);
        assert!((outer - 3.5).abs() < 1e-5);
    }
}
