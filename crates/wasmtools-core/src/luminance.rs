//! Luminance and channel arithmetic shared by the pixel transforms.
//!
//! Luminance uses the ITU-R BT.601 weights (0.299 / 0.587 / 0.114), which is
//! what every tool in this collection reports as "luminosity".

/// BT.601 coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// BT.601 coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// BT.601 coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Calculate luminance from channel values on the 0-255 scale.
///
/// Inputs may lie outside 0-255 (intermediate values inside a transform).
#[inline]
pub fn luminance(r: f32, g: f32, b: f32) -> f32 {
    LUMINANCE_R * r + LUMINANCE_G * g + LUMINANCE_B * b
}

/// Calculate luminance from u8 RGB values, rounded to 0-255.
#[inline]
pub fn luminance_u8(r: u8, g: u8, b: u8) -> u8 {
    clamp_channel(luminance(r as f32, g as f32, b as f32))
}

/// Round to the nearest integer and clamp into a storable channel value.
#[inline]
pub fn clamp_channel(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

/// Linear blend `original * (1 - f) + transformed * f`, rounded.
///
/// `f` is the intensity fraction (0.0 to 1.0).
#[inline]
pub fn blend(original: u8, transformed: u8, f: f32) -> u8 {
    clamp_channel(original as f32 * (1.0 - f) + transformed as f32 * f)
}

/// Convert a 0-100 intensity slider value to a blend fraction.
#[inline]
pub fn intensity_fraction(intensity: f32) -> f32 {
    (intensity / 100.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficients_sum_to_one() {
        let sum = LUMINANCE_R + LUMINANCE_G + LUMINANCE_B;
        assert!((sum - 1.0).abs() < 1e-6, "Coefficients should sum to 1.0");
    }

    #[test]
    fn test_luminance_extremes() {
        assert_eq!(luminance_u8(255, 255, 255), 255);
        assert_eq!(luminance_u8(0, 0, 0), 0);
    }

    #[test]
    fn test_luminance_gray_preserves_value() {
        for v in [0u8, 64, 128, 192, 255] {
            assert_eq!(luminance_u8(v, v, v), v);
        }
    }

    #[test]
    fn test_luminance_primaries() {
        // 0.299 * 255 = 76.245
        assert_eq!(luminance_u8(255, 0, 0), 76);
        // 0.587 * 255 = 149.685
        assert_eq!(luminance_u8(0, 255, 0), 150);
        // 0.114 * 255 = 29.07
        assert_eq!(luminance_u8(0, 0, 255), 29);
    }

    #[test]
    fn test_clamp_channel() {
        assert_eq!(clamp_channel(-20.0), 0);
        assert_eq!(clamp_channel(300.0), 255);
        assert_eq!(clamp_channel(86.4), 86);
        assert_eq!(clamp_channel(86.5), 87);
        assert_eq!(clamp_channel(f32::NAN), 0);
    }

    #[test]
    fn test_blend_endpoints() {
        assert_eq!(blend(10, 200, 0.0), 10);
        assert_eq!(blend(10, 200, 1.0), 200);
        assert_eq!(blend(0, 100, 0.5), 50);
    }

    #[test]
    fn test_intensity_fraction_clamps() {
        assert_eq!(intensity_fraction(-5.0), 0.0);
        assert_eq!(intensity_fraction(50.0), 0.5);
        assert_eq!(intensity_fraction(150.0), 1.0);
    }
}
