//! Horizontal and vertical mirroring.

use serde::{Deserialize, Serialize};

use crate::buffer::{PixelBuffer, CHANNELS};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlipParams {
    /// Mirror left-right
    pub horizontal: bool,
    /// Mirror top-bottom
    pub vertical: bool,
}

/// Mirror an image along the selected axes. Dimensions are unchanged.
///
/// Flipping both axes is the same as a 180-degree rotation.
pub fn apply_flip(image: &PixelBuffer, params: &FlipParams) -> PixelBuffer {
    if !params.horizontal && !params.vertical {
        return image.clone();
    }

    let row_len = image.width as usize * CHANNELS;
    let mut output = vec![0u8; image.pixels.len()];

    // Copy pixel data row by row
    for y in 0..image.height as usize {
        let src_y = if params.vertical {
            image.height as usize - 1 - y
        } else {
            y
        };
        let src_row = &image.pixels[src_y * row_len..(src_y + 1) * row_len];
        let dst_row = &mut output[y * row_len..(y + 1) * row_len];

        if params.horizontal {
            for (dst, src) in dst_row
                .chunks_exact_mut(CHANNELS)
                .zip(src_row.chunks_exact(CHANNELS).rev())
            {
                dst.copy_from_slice(src);
            }
        } else {
            dst_row.copy_from_slice(src_row);
        }
    }

    PixelBuffer {
        width: image.width,
        height: image.height,
        pixels: output,
    }
}
