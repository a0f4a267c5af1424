//! Rounded corners with antialiased edges.
//!
//! Each corner is cut along the quadratic Bezier running from one edge to the
//! other with its control point on the corner itself. In corner-local
//! coordinates that curve is `sqrt(x) + sqrt(y) = sqrt(r)`.

use serde::{Deserialize, Serialize};

use crate::buffer::{PixelBuffer, Rgba};

/// Subsamples per axis when computing edge coverage.
const SUPERSAMPLE: u32 = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_left: f32,
    pub bottom_right: f32,
}

impl CornerRadii {
    pub fn uniform(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_left: radius,
            bottom_right: radius,
        }
    }

    /// Radii clamped to `[0, min(width, height) / 2]`.
    fn clamped(&self, width: u32, height: u32) -> Self {
        let max = width.min(height) as f32 / 2.0;
        let clamp = |r: f32| if r.is_finite() { r.clamp(0.0, max) } else { 0.0 };
        Self {
            top_left: clamp(self.top_left),
            top_right: clamp(self.top_right),
            bottom_left: clamp(self.bottom_left),
            bottom_right: clamp(self.bottom_right),
        }
    }

    fn is_zero(&self) -> bool {
        self.top_left == 0.0
            && self.top_right == 0.0
            && self.bottom_left == 0.0
            && self.bottom_right == 0.0
    }
}

/// Whether corner-local point `(x, y)` lies on the kept side of a corner of radius `r`.
#[inline]
fn inside_corner(x: f32, y: f32, r: f32) -> bool {
    if r <= 0.0 || x >= r || y >= r {
        return true;
    }
    x.max(0.0).sqrt() + y.max(0.0).sqrt() >= r.sqrt()
}

/// Whether image-space point `(px, py)` survives the corner cuts.
#[inline]
fn inside_shape(px: f32, py: f32, w: f32, h: f32, radii: &CornerRadii) -> bool {
    inside_corner(px, py, radii.top_left)
        && inside_corner(w - px, py, radii.top_right)
        && inside_corner(px, h - py, radii.bottom_left)
        && inside_corner(w - px, h - py, radii.bottom_right)
}

/// Fraction of pixel `(x, y)` covered by the shape.
fn coverage(x: u32, y: u32, w: f32, h: f32, radii: &CornerRadii) -> f32 {
    let step = 1.0 / SUPERSAMPLE as f32;
    let mut hits = 0;
    for sy in 0..SUPERSAMPLE {
        let py = y as f32 + (sy as f32 + 0.5) * step;
        for sx in 0..SUPERSAMPLE {
            let px = x as f32 + (sx as f32 + 0.5) * step;
            if inside_shape(px, py, w, h, radii) {
                hits += 1;
            }
        }
    }
    hits as f32 / (SUPERSAMPLE * SUPERSAMPLE) as f32
}

/// Cut the four corners; coverage multiplies alpha and fully outside pixels become transparent.
pub fn apply_rounded_corners(image: &PixelBuffer, radii: &CornerRadii) -> PixelBuffer {
    let radii = radii.clamped(image.width, image.height);
    if radii.is_zero() || image.is_empty() {
        return image.clone();
    }
    let w = image.width as f32;
    let h = image.height as f32;

    let mut output = image.clone();
    for y in 0..image.height {
        for x in 0..image.width {
            let cov = coverage(x, y, w, h, &radii);
            if cov >= 1.0 {
                continue;
            }
            if cov <= 0.0 {
                output.set_pixel(x, y, Rgba::TRANSPARENT);
                continue;
            }
            let idx = output.index(x, y);
            let a = output.pixels[idx + 3] as f32 * cov;
            output.pixels[idx + 3] = a.round() as u8;
        }
    }
    output
}
