//! Color-matrix and channel transforms.
//!
//! - **Channel mixer**: 3x3 matrix in percent units applied per pixel
//! - **Color balance**: per-channel shift with optional luminosity preservation
//! - **Channel separation**: fan-out into three single-channel grayscale views
//!
//! Alpha is never modified by the mixer or the color balance.

mod balance;
mod mixer;
mod separation;

pub use balance::{apply_color_balance, ColorBalanceParams};
pub use mixer::{apply_channel_mixer, ChannelMatrix, MixerPreset};
pub use separation::{extract_channel, separate_channels, Channel, ChannelViews};
