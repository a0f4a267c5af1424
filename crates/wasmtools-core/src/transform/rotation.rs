//! Image rotation by arbitrary angles.
//!
//! The output canvas is filled with a background color and the source is
//! composited on top, centered, using inverse mapping: for each output pixel
//! center we find the source position and sample it.
//!
//! Angles are in degrees, positive = clockwise on screen (y axis pointing
//! down). For rotation by angle θ the inverse transform is:
//! ```text
//! src_x =  (dst_x - cx) * cos(θ) + (dst_y - cy) * sin(θ) + src_cx
//! src_y = -(dst_x - cx) * sin(θ) + (dst_y - cy) * cos(θ) + src_cy
//! ```

use serde::{Deserialize, Serialize};

use crate::buffer::{PixelBuffer, Rgba};
use crate::composite::{over, premultiply, Premultiplied};

/// Trig values this close to 0 or ±1 are snapped, so right angles are exact.
const SNAP_EPSILON: f64 = 1e-9;

/// Sampling method for rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Point sampling, no smoothing.
    Nearest,
    /// Bilinear interpolation of the 4 nearest pixels.
    #[default]
    Bilinear,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotateParams {
    /// Rotation angle in degrees (positive = clockwise)
    pub angle: f64,
    /// Grow the canvas to contain the whole rotated image
    pub expand: bool,
    /// Fill color for the uncovered canvas
    pub background: Rgba,
    pub filter: Interpolation,
}

impl Default for RotateParams {
    fn default() -> Self {
        Self {
            angle: 0.0,
            expand: true,
            background: Rgba::TRANSPARENT,
            filter: Interpolation::Bilinear,
        }
    }
}

#[inline]
fn snap(v: f64) -> f64 {
    if v.abs() < SNAP_EPSILON {
        0.0
    } else if (v.abs() - 1.0).abs() < SNAP_EPSILON {
        v.signum()
    } else {
        v
    }
}

/// `(sin, cos)` of an angle in degrees, snapped at right angles.
fn snapped_sin_cos(angle_degrees: f64) -> (f64, f64) {
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    (snap(sin), snap(cos))
}

/// Compute the dimensions of the bounding box for a rotated image.
///
/// `new_w = ceil(w*|cos| + h*|sin|)`, `new_h = ceil(w*|sin| + h*|cos|)`.
///
/// # Example
///
/// ```
/// use wasmtools_core::transform::compute_rotated_bounds;
///
/// // 90-degree rotation swaps dimensions
/// assert_eq!(compute_rotated_bounds(100, 50, 90.0), (50, 100));
/// ```
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    let (sin, cos) = snapped_sin_cos(angle_degrees);
    let (sin, cos) = (sin.abs(), cos.abs());

    let w = width as f64;
    let h = height as f64;

    // Absorb float noise so exact products don't round up a whole pixel
    let new_w = (w * cos + h * sin - SNAP_EPSILON).ceil().max(1.0) as u32;
    let new_h = (w * sin + h * cos - SNAP_EPSILON).ceil().max(1.0) as u32;

    (new_w, new_h)
}

/// Rotate an image around its center.
///
/// In expand mode the canvas grows to the rotated bounding box; otherwise it
/// keeps the source size and corners may be clipped.
pub fn apply_rotation(image: &PixelBuffer, params: &RotateParams) -> PixelBuffer {
    if image.is_empty() {
        return image.clone();
    }

    let (dst_w, dst_h) = if params.expand {
        compute_rotated_bounds(image.width, image.height, params.angle)
    } else {
        image.dimensions()
    };
    let (sin, cos) = snapped_sin_cos(params.angle);

    // Center of source and destination images
    let src_cx = image.width as f64 / 2.0;
    let src_cy = image.height as f64 / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = PixelBuffer::filled(dst_w, dst_h, params.background);

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let dx = dst_x as f64 + 0.5 - dst_cx;
            let dy = dst_y as f64 + 0.5 - dst_cy;

            let src_x = dx * cos + dy * sin + src_cx;
            let src_y = -dx * sin + dy * cos + src_cy;

            let sample = match params.filter {
                Interpolation::Nearest => sample_nearest(image, src_x, src_y),
                Interpolation::Bilinear => sample_bilinear(image, src_x, src_y),
            };

            if let Some(sample) = sample {
                let idx = output.index(dst_x, dst_y);
                over(&mut output.pixels[idx..idx + 4], sample);
            }
        }
    }

    output
}

#[inline]
fn premultiplied_at(image: &PixelBuffer, px: u32, py: u32) -> Premultiplied {
    premultiply(image.pixel(px, py).to_array())
}

/// Point sample: the pixel whose area contains (x, y).
fn sample_nearest(image: &PixelBuffer, x: f64, y: f64) -> Option<Premultiplied> {
    if x < 0.0 || y < 0.0 || x >= image.width as f64 || y >= image.height as f64 {
        return None;
    }
    Some(premultiplied_at(image, x as u32, y as u32))
}

/// Bilinear sample over pixel centers; taps outside the image are transparent.
fn sample_bilinear(image: &PixelBuffer, x: f64, y: f64) -> Option<Premultiplied> {
    let fx = x - 0.5;
    let fy = y - 0.5;
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = (fx - x0) as f32;
    let ty = (fy - y0) as f32;

    let (w, h) = (image.width as i64, image.height as i64);
    let (x0, y0) = (x0 as i64, y0 as i64);
    if x0 + 1 < 0 || y0 + 1 < 0 || x0 >= w || y0 >= h {
        return None;
    }

    let taps = [
        (x0, y0, (1.0 - tx) * (1.0 - ty)),
        (x0 + 1, y0, tx * (1.0 - ty)),
        (x0, y0 + 1, (1.0 - tx) * ty),
        (x0 + 1, y0 + 1, tx * ty),
    ];

    let mut sum = [0.0f32; 4];
    for (px, py, weight) in taps {
        if weight == 0.0 || px < 0 || py < 0 || px >= w || py >= h {
            continue;
        }
        let p = premultiplied_at(image, px as u32, py as u32);
        for c in 0..4 {
            sum[c] += p[c] * weight;
        }
    }

    (sum[3] > 0.0).then_some(sum)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Opaque test image with a unique color per pixel.
    fn test_image(width: u32, height: u32) -> PixelBuffer {
        let mut img = PixelBuffer::blank(width, height);
        for y in 0..height {
            for x in 0..width {
                img.set_pixel(x, y, Rgba::rgb((x * 17 % 256) as u8, (y * 31 % 256) as u8, ((x + y) % 256) as u8));
            }
        }
        img
    }

    fn params(angle: f64, filter: Interpolation) -> RotateParams {
        RotateParams {
            angle,
            filter,
            ..Default::default()
        }
    }

    #[test]
    fn test_90_degree_rotation_bounds() {
        assert_eq!(compute_rotated_bounds(100, 50, 90.0), (50, 100));
        assert_eq!(compute_rotated_bounds(100, 50, -90.0), (50, 100));
        assert_eq!(compute_rotated_bounds(100, 50, 270.0), (50, 100));
    }

    #[test]
    fn test_180_and_360_rotation_bounds() {
        assert_eq!(compute_rotated_bounds(100, 50, 180.0), (100, 50));
        assert_eq!(compute_rotated_bounds(100, 50, 360.0), (100, 50));
        assert_eq!(compute_rotated_bounds(100, 50, 720.0), (100, 50));
        assert_eq!(compute_rotated_bounds(100, 50, 450.0), (50, 100));
    }

    #[test]
    fn test_45_degree_rotation_bounds() {
        // 100 * (cos45 + sin45) = 141.42 -> 142
        assert_eq!(compute_rotated_bounds(100, 100, 45.0), (142, 142));
    }

    #[test]
    fn test_opposite_rotations_same_bounds() {
        assert_eq!(
            compute_rotated_bounds(100, 80, 30.0),
            compute_rotated_bounds(100, 80, -30.0)
        );
    }

    #[test]
    fn test_bounds_never_zero() {
        for angle in [1.0, 15.0, 45.0, 89.0, 90.0, 135.0, 179.0, 180.0, 270.0, 359.0] {
            let (w, h) = compute_rotated_bounds(1, 1, angle);
            assert!(w > 0 && h > 0, "angle {}", angle);
        }
    }

    #[test]
    fn test_zero_rotation_opaque_is_identity() {
        let img = test_image(7, 5);
        assert_eq!(apply_rotation(&img, &params(0.0, Interpolation::Bilinear)), img);
        assert_eq!(apply_rotation(&img, &params(0.0, Interpolation::Nearest)), img);
    }

    #[test]
    fn test_90_degree_rotation_is_clockwise() {
        // [A B] -> A on top, B below
        let mut img = PixelBuffer::blank(2, 1);
        img.set_pixel(0, 0, Rgba::rgb(255, 0, 0));
        img.set_pixel(1, 0, Rgba::rgb(0, 0, 255));

        for filter in [Interpolation::Nearest, Interpolation::Bilinear] {
            let out = apply_rotation(&img, &params(90.0, filter));
            assert_eq!(out.dimensions(), (1, 2));
            assert_eq!(out.pixel(0, 0), Rgba::rgb(255, 0, 0));
            assert_eq!(out.pixel(0, 1), Rgba::rgb(0, 0, 255));
        }
    }

    #[test]
    fn test_90_degree_rectangular_swaps_dimensions() {
        let img = test_image(20, 10);
        let out = apply_rotation(&img, &params(90.0, Interpolation::Nearest));
        assert_eq!(out.dimensions(), (10, 20));
        // Top-left of the source ends up top-right
        assert_eq!(out.pixel(9, 0), img.pixel(0, 0));
        assert_eq!(out.pixel(0, 19), img.pixel(19, 9));
    }

    #[test]
    fn test_rotation_expands_canvas_with_background() {
        let img = PixelBuffer::filled(10, 10, Rgba::WHITE);
        let out = apply_rotation(
            &img,
            &RotateParams {
                angle: 45.0,
                expand: true,
                background: Rgba::rgb(255, 0, 0),
                filter: Interpolation::Bilinear,
            },
        );
        assert_eq!(out.dimensions(), (15, 15));
        // Corners are uncovered background, center is source
        assert_eq!(out.pixel(0, 0), Rgba::rgb(255, 0, 0));
        assert_eq!(out.pixel(7, 7), Rgba::WHITE);
    }

    #[test]
    fn test_no_expand_keeps_size() {
        let img = test_image(30, 10);
        let out = apply_rotation(
            &img,
            &RotateParams {
                angle: 30.0,
                expand: false,
                ..Default::default()
            },
        );
        assert_eq!(out.dimensions(), (30, 10));
    }

    #[test]
    fn test_transparent_background_outside_source() {
        let img = PixelBuffer::filled(4, 4, Rgba::WHITE);
        let out = apply_rotation(&img, &params(45.0, Interpolation::Nearest));
        assert_eq!(out.pixel(0, 0), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_empty_image() {
        let img = PixelBuffer::blank(0, 0);
        assert!(apply_rotation(&img, &params(30.0, Interpolation::Bilinear)).is_empty());
    }

    #[test]
    fn test_1x1_image_rotation() {
        let img = PixelBuffer::filled(1, 1, Rgba::rgb(128, 128, 128));
        let out = apply_rotation(&img, &params(45.0, Interpolation::Bilinear));
        assert_eq!(out.dimensions(), (2, 2));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
