//! Contrast, exposure, saturation and temperature/tint.

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::luminance::{clamp_channel, luminance};

/// Contrast level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContrastParams {
    /// Contrast level (-255 to 255, UI range -100 to 100)
    pub contrast: f32,
}

/// Exposure with luminance-banded highlight/shadow scaling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExposureParams {
    /// Exposure (-100 to 100); 100 doubles brightness
    pub exposure: f32,
    /// Highlights (-100 to 100), affects luminance above 128
    pub highlights: f32,
    /// Shadows (-100 to 100), affects luminance below 128
    pub shadows: f32,
}

impl ExposureParams {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaturationParams {
    /// Saturation (-100 to 100); -100 is fully desaturated
    pub saturation: f32,
}

/// White balance shift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureParams {
    /// Temperature (-100 cool to 100 warm)
    pub temperature: f32,
    /// Tint (-100 green to 100 magenta)
    pub tint: f32,
}

/// Channel shift per temperature/tint unit.
const SHIFT_PER_UNIT: f32 = 1.5;

/// Contrast factor for a level `c`.
///
/// Formula: `259 * (c + 255) / (255 * (259 - c))`. A level of 0 gives exactly 1.
#[inline]
pub fn contrast_factor(contrast: f32) -> f32 {
    // 259 is a pole; the UI never gets close, but keep the factor finite.
    let c = contrast.clamp(-255.0, 255.0);
    259.0 * (c + 255.0) / (255.0 * (259.0 - c))
}

/// Apply contrast around the 128 midpoint.
///
/// Formula: `v' = clamp(factor * (v - 128) + 128)`
pub fn apply_contrast(image: &PixelBuffer, params: &ContrastParams) -> PixelBuffer {
    if params.contrast == 0.0 {
        return image.clone();
    }
    let factor = contrast_factor(params.contrast);
    let adjust = |v: u8| clamp_channel(factor * (v as f32 - 128.0) + 128.0);

    image.map_pixels(|[r, g, b, a]| [adjust(r), adjust(g), adjust(b), a])
}

/// Apply exposure, then highlight/shadow scaling by luminance band.
///
/// - `expFactor = 2^(exposure/100)` multiplies R, G and B
/// - `L > 128`: scale by `1 + (highlights/100) * ((L - 128) / 127)`
/// - `L < 128`: scale by `1 + (shadows/100) * ((128 - L) / 128)`
pub fn apply_exposure(image: &PixelBuffer, params: &ExposureParams) -> PixelBuffer {
    if params.is_default() {
        return image.clone();
    }
    let exp_factor = 2.0_f32.powf(params.exposure / 100.0);
    let highlights = params.highlights / 100.0;
    let shadows = params.shadows / 100.0;

    image.map_pixels(|[r, g, b, a]| {
        let r = r as f32 * exp_factor;
        let g = g as f32 * exp_factor;
        let b = b as f32 * exp_factor;

        let lum = luminance(r, g, b);
        let scale = if lum > 128.0 {
            1.0 + highlights * ((lum - 128.0) / 127.0)
        } else if lum < 128.0 {
            1.0 + shadows * ((128.0 - lum) / 128.0)
        } else {
            1.0
        };

        [
            clamp_channel(r * scale),
            clamp_channel(g * scale),
            clamp_channel(b * scale),
            a,
        ]
    })
}

/// Apply saturation by pushing channels away from (or toward) luminance.
///
/// Formula: `v' = clamp(gray + (v - gray) * (1 + s/100))`
pub fn apply_saturation(image: &PixelBuffer, params: &SaturationParams) -> PixelBuffer {
    if params.saturation == 0.0 {
        return image.clone();
    }
    let factor = 1.0 + params.saturation / 100.0;

    image.map_pixels(|[r, g, b, a]| {
        let (rf, gf, bf) = (r as f32, g as f32, b as f32);
        let gray = luminance(rf, gf, bf);
        [
            clamp_channel(gray + (rf - gray) * factor),
            clamp_channel(gray + (gf - gray) * factor),
            clamp_channel(gray + (bf - gray) * factor),
            a,
        ]
    })
}

/// Apply temperature and tint shifts.
///
/// With `s = |value| * 1.5`:
/// - Warm: red `+s`, blue `-s`
/// - Cool: blue `+s`, red `-s/2`
/// - Magenta: red and blue `+s/2`, green `-s`
/// - Green: green `+s`, red and blue `-s/2`
pub fn apply_temperature(image: &PixelBuffer, params: &TemperatureParams) -> PixelBuffer {
    if params.temperature == 0.0 && params.tint == 0.0 {
        return image.clone();
    }
    let (mut dr, mut dg, mut db) = (0.0f32, 0.0f32, 0.0f32);

    let s = params.temperature.abs() * SHIFT_PER_UNIT;
    if params.temperature > 0.0 {
        dr += s;
        db -= s;
    } else if params.temperature < 0.0 {
        db += s;
        dr -= s / 2.0;
    }

    let s = params.tint.abs() * SHIFT_PER_UNIT;
    if params.tint > 0.0 {
        dr += s / 2.0;
        dg -= s;
        db += s / 2.0;
    } else if params.tint < 0.0 {
        dg += s;
        dr -= s / 2.0;
        db -= s / 2.0;
    }

    image.map_pixels(|[r, g, b, a]| {
        [
            clamp_channel(r as f32 + dr),
            clamp_channel(g as f32 + dg),
            clamp_channel(b as f32 + db),
            a,
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjustments::test_support::{pixel, sample_image};
    use crate::buffer::Rgba;

    fn rgb(img: &PixelBuffer) -> (u8, u8, u8) {
        let p = img.pixel(0, 0);
        (p.r, p.g, p.b)
    }

    // ===== Identity Tests =====

    #[test]
    fn test_neutral_parameters_are_identity() {
        let img = sample_image();
        assert_eq!(apply_contrast(&img, &ContrastParams::default()), img);
        assert_eq!(apply_exposure(&img, &ExposureParams::default()), img);
        assert_eq!(apply_saturation(&img, &SaturationParams::default()), img);
        assert_eq!(apply_temperature(&img, &TemperatureParams::default()), img);
    }

    #[test]
    fn test_contrast_factor_zero_is_exactly_one() {
        assert_eq!(contrast_factor(0.0), 1.0);
    }

    // ===== Contrast Tests =====

    #[test]
    fn test_contrast_plus_50_on_100() {
        // factor = 259*305 / (255*209) ~ 1.482; 1.482 * -28 + 128 ~ 86.5
        let result = apply_contrast(&pixel(100, 100, 100), &ContrastParams { contrast: 50.0 });
        assert_eq!(rgb(&result), (86, 86, 86));
    }

    #[test]
    fn test_contrast_negative_moves_toward_mid() {
        let img = pixel(0, 128, 255);
        let result = apply_contrast(&img, &ContrastParams { contrast: -100.0 });
        let (r, g, b) = rgb(&result);
        assert!(r > 0, "Black should move toward gray");
        assert_eq!(g, 128, "Midpoint is fixed");
        assert!(b < 255, "White should move toward gray");
    }

    #[test]
    fn test_contrast_extreme_clamps() {
        let result = apply_contrast(&pixel(10, 128, 250), &ContrastParams { contrast: 255.0 });
        assert_eq!(rgb(&result), (0, 128, 255));
    }

    #[test]
    fn test_contrast_preserves_alpha() {
        let img = sample_image();
        let result = apply_contrast(&img, &ContrastParams { contrast: 80.0 });
        for (a, b) in img.pixels.chunks(4).zip(result.pixels.chunks(4)) {
            assert_eq!(a[3], b[3]);
        }
    }

    // ===== Exposure Tests =====

    #[test]
    fn test_exposure_plus_100_doubles() {
        let result = apply_exposure(
            &pixel(40, 40, 40),
            &ExposureParams {
                exposure: 100.0,
                ..Default::default()
            },
        );
        // 80 is below 128, shadows = 0 leaves it alone
        assert_eq!(rgb(&result), (80, 80, 80));
    }

    #[test]
    fn test_exposure_minus_100_halves() {
        let result = apply_exposure(
            &pixel(200, 200, 200),
            &ExposureParams {
                exposure: -100.0,
                ..Default::default()
            },
        );
        assert_eq!(rgb(&result), (100, 100, 100));
    }

    #[test]
    fn test_highlights_only_affect_bright_pixels() {
        let params = ExposureParams {
            highlights: 100.0,
            ..Default::default()
        };
        assert_eq!(rgb(&apply_exposure(&pixel(60, 60, 60), &params)), (60, 60, 60));

        // L = 200: scale = 1 + (72 / 127) ~ 1.567 -> clipped
        let bright = apply_exposure(&pixel(200, 200, 200), &params);
        assert_eq!(rgb(&bright), (255, 255, 255));
    }

    #[test]
    fn test_shadows_lift_dark_pixels() {
        let params = ExposureParams {
            shadows: 50.0,
            ..Default::default()
        };
        // L = 64: scale = 1 + 0.5 * (64 / 128) = 1.25
        assert_eq!(rgb(&apply_exposure(&pixel(64, 64, 64), &params)), (80, 80, 80));
        assert_eq!(
            rgb(&apply_exposure(&pixel(200, 200, 200), &params)),
            (200, 200, 200)
        );
    }

    // ===== Saturation Tests =====

    #[test]
    fn test_saturation_full_desaturate() {
        let result = apply_saturation(&pixel(200, 100, 50), &SaturationParams { saturation: -100.0 });
        let (r, g, b) = rgb(&result);
        assert_eq!(r, g);
        assert_eq!(g, b);
        // 0.299*200 + 0.587*100 + 0.114*50 = 124.2
        assert_eq!(r, 124);
    }

    #[test]
    fn test_saturation_increase_spreads_channels() {
        let result = apply_saturation(&pixel(200, 128, 100), &SaturationParams { saturation: 50.0 });
        let (r, _, b) = rgb(&result);
        assert!((r as i32 - b as i32) > 100);
    }

    #[test]
    fn test_saturation_gray_unchanged() {
        let result = apply_saturation(&pixel(90, 90, 90), &SaturationParams { saturation: 100.0 });
        assert_eq!(rgb(&result), (90, 90, 90));
    }

    // ===== Temperature Tests =====

    #[test]
    fn test_temperature_warm() {
        let result = apply_temperature(
            &pixel(128, 128, 128),
            &TemperatureParams {
                temperature: 20.0,
                tint: 0.0,
            },
        );
        assert_eq!(rgb(&result), (158, 128, 98));
    }

    #[test]
    fn test_temperature_cool_is_asymmetric() {
        let result = apply_temperature(
            &pixel(128, 128, 128),
            &TemperatureParams {
                temperature: -20.0,
                tint: 0.0,
            },
        );
        assert_eq!(rgb(&result), (113, 128, 158));
    }

    #[test]
    fn test_tint_magenta_and_green() {
        let magenta = apply_temperature(
            &pixel(128, 128, 128),
            &TemperatureParams {
                temperature: 0.0,
                tint: 20.0,
            },
        );
        assert_eq!(rgb(&magenta), (143, 98, 143));

        let green = apply_temperature(
            &pixel(128, 128, 128),
            &TemperatureParams {
                temperature: 0.0,
                tint: -20.0,
            },
        );
        assert_eq!(rgb(&green), (113, 158, 113));
    }

    #[test]
    fn test_temperature_extremes_clamp() {
        let result = apply_temperature(
            &pixel(250, 128, 5),
            &TemperatureParams {
                temperature: 100.0,
                tint: 0.0,
            },
        );
        assert_eq!(rgb(&result), (255, 128, 0));
    }

    #[test]
    fn test_alpha_untouched_by_temperature() {
        let img = PixelBuffer::filled(1, 1, Rgba::new(10, 10, 10, 33));
        let result = apply_temperature(
            &img,
            &TemperatureParams {
                temperature: 50.0,
                tint: 50.0,
            },
        );
        assert_eq!(result.pixel(0, 0).a, 33);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
