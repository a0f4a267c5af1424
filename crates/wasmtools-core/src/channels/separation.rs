//! Channel separation: one grayscale view per color channel.

use serde::{Deserialize, Serialize};

use crate::buffer::{PixelBuffer, CHANNELS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    #[inline]
    fn offset(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// The three single-channel views of an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelViews {
    pub red: PixelBuffer,
    pub green: PixelBuffer,
    pub blue: PixelBuffer,
}

impl ChannelViews {
    pub fn get(&self, channel: Channel) -> &PixelBuffer {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }
}

/// Replicate one channel into R, G and B with alpha forced to 255.
pub fn extract_channel(image: &PixelBuffer, channel: Channel) -> PixelBuffer {
    let offset = channel.offset();
    let pixels = image
        .pixels
        .chunks_exact(CHANNELS)
        .flat_map(|px| {
            let v = px[offset];
            [v, v, v, 255]
        })
        .collect();

    PixelBuffer {
        width: image.width,
        height: image.height,
        pixels,
    }
}

/// Split an image into red, green and blue grayscale views.
pub fn separate_channels(image: &PixelBuffer) -> ChannelViews {
    ChannelViews {
        red: extract_channel(image, Channel::Red),
        green: extract_channel(image, Channel::Green),
        blue: extract_channel(image, Channel::Blue),
    }
}
