//! Tonal adjustment transforms.
//!
//! Every transform here is a per-pixel, per-channel pure function: the output
//! buffer has the same dimensions as the input, alpha is left untouched and
//! every channel is rounded and clamped to 0-255 before storage.
//!
//! ## Tools
//! - Contrast, exposure (with highlights/shadows), saturation, temperature/tint
//! - Grayscale (four luminance methods)
//! - Invert (per channel)
//! - Posterize
//!
//! Grayscale, invert and posterize blend the transformed pixel with the
//! original using `intensity / 100`.

mod grayscale;
mod invert;
mod posterize;
mod tone;

pub use grayscale::{apply_grayscale, GrayMethod, GrayscaleParams};
pub use invert::{apply_invert, InvertParams};
pub use posterize::{apply_posterize, PosterizeParams};
pub use tone::{
    apply_contrast, apply_exposure, apply_saturation, apply_temperature, contrast_factor,
    ContrastParams, ExposureParams, SaturationParams, TemperatureParams,
};
