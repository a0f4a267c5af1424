//! Stylized effects: vignette, pixelate, rounded corners and drop shadow.
//!
//! Vignette, pixelate and rounded corners keep the input dimensions. The drop
//! shadow pads the canvas so the blurred, offset shadow fits.

mod corners;
mod pixelate;
mod shadow;
mod vignette;

pub use corners::{apply_rounded_corners, CornerRadii};
pub use pixelate::{apply_pixelate, PixelateParams};
pub use shadow::{apply_drop_shadow, shadow_padding, ShadowParams};
pub use vignette::{apply_vignette, VignetteParams};
