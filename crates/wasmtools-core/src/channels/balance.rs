//! Color balance with optional luminosity preservation.

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::luminance::{clamp_channel, luminance};

/// Channel shift per slider unit (100 maps to a full 255 shift).
const SHIFT_PER_UNIT: f32 = 2.55;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorBalanceParams {
    /// Cyan (-100) to red (100)
    pub red: f32,
    /// Magenta (-100) to green (100)
    pub green: f32,
    /// Yellow (-100) to blue (100)
    pub blue: f32,
    /// Rescale the shifted color to keep the original luminance
    pub preserve_luminosity: bool,
}

impl ColorBalanceParams {
    pub fn is_neutral(&self) -> bool {
        self.red == 0.0 && self.green == 0.0 && self.blue == 0.0
    }
}

/// Shift each channel by `setting * 2.55`.
///
/// With `preserve_luminosity`, the shifted channels are scaled by
/// `origLum / newLum` (when `newLum > 0`) before clamping.
pub fn apply_color_balance(image: &PixelBuffer, params: &ColorBalanceParams) -> PixelBuffer {
    if params.is_neutral() {
        return image.clone();
    }
    let dr = params.red * SHIFT_PER_UNIT;
    let dg = params.green * SHIFT_PER_UNIT;
    let db = params.blue * SHIFT_PER_UNIT;

    image.map_pixels(|[r, g, b, a]| {
        let (rf, gf, bf) = (r as f32, g as f32, b as f32);
        let (mut nr, mut ng, mut nb) = (rf + dr, gf + dg, bf + db);

        if params.preserve_luminosity {
            let orig_lum = luminance(rf, gf, bf);
            let new_lum = luminance(nr, ng, nb);
            if new_lum > 0.0 {
                let scale = orig_lum / new_lum;
                nr *= scale;
                ng *= scale;
                nb *= scale;
            }
        }

        [clamp_channel(nr), clamp_channel(ng), clamp_channel(nb), a]
    })
}
