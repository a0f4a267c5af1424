//! Channel mixer: linear recombination of R, G and B.

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::luminance::clamp_channel;

/// 3x3 channel matrix in percent units.
///
/// Row `r*` produces the output red channel: `R' = (rr*R + rg*G + rb*B) / 100`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelMatrix {
    pub rr: f32,
    pub rg: f32,
    pub rb: f32,
    pub gr: f32,
    pub gg: f32,
    pub gb: f32,
    pub br: f32,
    pub bg: f32,
    pub bb: f32,
}

impl Default for ChannelMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Named matrices offered as preset buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MixerPreset {
    Identity,
    Grayscale,
    Sepia,
    SwapRedGreen,
    SwapRedBlue,
    SwapGreenBlue,
}

impl ChannelMatrix {
    pub const IDENTITY: ChannelMatrix = ChannelMatrix::from_rows(
        [100.0, 0.0, 0.0],
        [0.0, 100.0, 0.0],
        [0.0, 0.0, 100.0],
    );

    pub const fn from_rows(red: [f32; 3], green: [f32; 3], blue: [f32; 3]) -> Self {
        Self {
            rr: red[0],
            rg: red[1],
            rb: red[2],
            gr: green[0],
            gg: green[1],
            gb: green[2],
            br: blue[0],
            bg: blue[1],
            bb: blue[2],
        }
    }

    pub fn rows(&self) -> [[f32; 3]; 3] {
        [
            [self.rr, self.rg, self.rb],
            [self.gr, self.gg, self.gb],
            [self.br, self.bg, self.bb],
        ]
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// The fixed matrix behind a preset.
    pub fn preset(preset: MixerPreset) -> Self {
        const GRAY: [f32; 3] = [29.9, 58.7, 11.4];
        match preset {
            MixerPreset::Identity => Self::IDENTITY,
            MixerPreset::Grayscale => Self::from_rows(GRAY, GRAY, GRAY),
            MixerPreset::Sepia => Self::from_rows(
                [39.3, 76.9, 18.9],
                [34.9, 68.6, 16.8],
                [27.2, 53.4, 13.1],
            ),
            MixerPreset::SwapRedGreen => Self::from_rows(
                [0.0, 100.0, 0.0],
                [100.0, 0.0, 0.0],
                [0.0, 0.0, 100.0],
            ),
            MixerPreset::SwapRedBlue => Self::from_rows(
                [0.0, 0.0, 100.0],
                [0.0, 100.0, 0.0],
                [100.0, 0.0, 0.0],
            ),
            MixerPreset::SwapGreenBlue => Self::from_rows(
                [100.0, 0.0, 0.0],
                [0.0, 0.0, 100.0],
                [0.0, 100.0, 0.0],
            ),
        }
    }
}

impl From<MixerPreset> for ChannelMatrix {
    fn from(preset: MixerPreset) -> Self {
        ChannelMatrix::preset(preset)
    }
}

/// Apply the channel matrix to every pixel.
pub fn apply_channel_mixer(image: &PixelBuffer, matrix: &ChannelMatrix) -> PixelBuffer {
    if matrix.is_identity() {
        return image.clone();
    }
    let rows = matrix.rows().map(|row| row.map(|v| v / 100.0));
    let mix = |row: [f32; 3], r: f32, g: f32, b: f32| clamp_channel(row[0] * r + row[1] * g + row[2] * b);

    image.map_pixels(|[r, g, b, a]| {
        let (r, g, b) = (r as f32, g as f32, b as f32);
        [mix(rows[0], r, g, b), mix(rows[1], r, g, b), mix(rows[2], r, g, b), a]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjustments::test_support::{pixel, sample_image};

    fn mixed(preset: MixerPreset, r: u8, g: u8, b: u8) -> (u8, u8, u8) {
        let p = apply_channel_mixer(&pixel(r, g, b), &preset.into()).pixel(0, 0);
        (p.r, p.g, p.b)
    }

    #[test]
    fn test_identity_is_unchanged() {
        let img = sample_image();
        assert_eq!(apply_channel_mixer(&img, &ChannelMatrix::IDENTITY), img);
    }

    #[test]
    fn test_identity_slow_path_is_unchanged() {
        // Same matrix written out, but nudged so the fast path is skipped
        let mut m = ChannelMatrix::IDENTITY;
        m.rg = 0.0001;
        let img = sample_image();
        let out = apply_channel_mixer(&img, &m);
        for (a, b) in img.pixels.iter().zip(out.pixels.iter()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_swaps() {
        assert_eq!(mixed(MixerPreset::SwapRedGreen, 10, 20, 30), (20, 10, 30));
        assert_eq!(mixed(MixerPreset::SwapRedBlue, 10, 20, 30), (30, 20, 10));
        assert_eq!(mixed(MixerPreset::SwapGreenBlue, 10, 20, 30), (10, 30, 20));
    }

    #[test]
    fn test_grayscale_preset() {
        // 0.299*200 + 0.587*100 + 0.114*50 = 124.2
        assert_eq!(mixed(MixerPreset::Grayscale, 200, 100, 50), (124, 124, 124));
    }

    #[test]
    fn test_sepia_clamps_white() {
        assert_eq!(mixed(MixerPreset::Sepia, 255, 255, 255), (255, 255, 239));
    }

    #[test]
    fn test_alpha_untouched() {
        let img = sample_image();
        let out = apply_channel_mixer(&img, &MixerPreset::Sepia.into());
        for (a, b) in img.pixels.chunks(4).zip(out.pixels.chunks(4)) {
            assert_eq!(a[3], b[3]);
        }
    }

    #[test]
    fn test_preset_serde_name() {
        let preset: MixerPreset = serde_json::from_str("\"swap_red_blue\"").unwrap();
        assert_eq!(preset, MixerPreset::SwapRedBlue);
    }
}
