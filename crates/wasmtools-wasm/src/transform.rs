//! WASM bindings for geometric transforms: rotation and flip.

use crate::types::{parse_name, to_js_error, JsPixelBuffer};
use wasm_bindgen::prelude::*;
use wasmtools_core::transform::{
    apply_flip as core_flip, apply_rotation as core_rotate, compute_rotated_bounds, FlipParams,
    Interpolation, RotateParams,
};
use wasmtools_core::Rgba;

/// Rotate an image around its center.
///
/// # Arguments
///
/// * `image` - Source image to rotate
/// * `angle_degrees` - Rotation angle in degrees (positive = clockwise)
/// * `expand` - Grow the canvas to fit the rotated image; otherwise keep the size and clip
/// * `background` - Fill color as `#rrggbb` / `#rrggbbaa`
/// * `filter` - `"nearest"` or `"bilinear"`
///
/// # Example (TypeScript)
///
/// ```typescript
/// const rotated = apply_rotation(sourceImage, 15.0, true, "#00000000", "bilinear");
/// ```
#[wasm_bindgen]
pub fn apply_rotation(
    image: &JsPixelBuffer,
    angle_degrees: f64,
    expand: bool,
    background: &str,
    filter: &str,
) -> Result<JsPixelBuffer, JsValue> {
    let params = RotateParams {
        angle: angle_degrees,
        expand,
        background: Rgba::from_hex(background).map_err(to_js_error)?,
        filter: parse_name::<Interpolation>(filter).map_err(to_js_error)?,
    };
    Ok(JsPixelBuffer::from_core(core_rotate(image.as_core(), &params)))
}

/// Output size of an expanded rotation, as `[width, height]`.
#[wasm_bindgen]
pub fn rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> Vec<u32> {
    let (w, h) = compute_rotated_bounds(width, height, angle_degrees);
    vec![w, h]
}

/// Mirror horizontally and/or vertically.
#[wasm_bindgen]
pub fn apply_flip(image: &JsPixelBuffer, horizontal: bool, vertical: bool) -> JsPixelBuffer {
    let params = FlipParams {
        horizontal,
        vertical,
    };
    JsPixelBuffer::from_core(core_flip(image.as_core(), &params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasmtools_core::PixelBuffer;

    /// Create a simple test image.
    fn test_image(width: u32, height: u32) -> JsPixelBuffer {
        let pixels: Vec<u8> = (0..(width * height * 4) as usize)
            .map(|i| if i % 4 == 3 { 255 } else { (i % 256) as u8 })
            .collect();
        JsPixelBuffer::from_core(PixelBuffer::new(width, height, pixels).unwrap())
    }

    fn rotate(img: &JsPixelBuffer, angle: f64) -> JsPixelBuffer {
        apply_rotation(img, angle, true, "#00000000", "nearest")
            .ok()
            .unwrap()
    }

    #[test]
    fn test_rotation_no_change() {
        let img = test_image(10, 10);
        let result = rotate(&img, 0.0);
        assert_eq!(result.width(), 10);
        assert_eq!(result.height(), 10);
        assert_eq!(result.pixels(), img.pixels());
    }

    #[test]
    fn test_rotation_90_degrees() {
        let img = test_image(10, 5);
        let result = rotate(&img, 90.0);
        // 90-degree rotation swaps dimensions
        assert_eq!(result.width(), 5);
        assert_eq!(result.height(), 10);
    }

    #[test]
    fn test_rotation_45_degrees_expands() {
        let img = test_image(10, 10);
        let result = rotate(&img, 45.0);
        assert!(result.width() > 10);
        assert!(result.height() > 10);
        assert_eq!(rotated_bounds(10, 10, 45.0), vec![result.width(), result.height()]);
    }

    #[test]
    fn test_rotation_without_expand_keeps_size() {
        let img = test_image(12, 8);
        let result = apply_rotation(&img, 30.0, false, "#fff", "bilinear")
            .ok()
            .unwrap();
        assert_eq!((result.width(), result.height()), (12, 8));
    }

    #[test]
    fn test_double_flip_restores() {
        let img = test_image(7, 3);
        let once = apply_flip(&img, true, true);
        let twice = apply_flip(&once, true, true);
        assert_eq!(twice.pixels(), img.pixels());
    }
}
