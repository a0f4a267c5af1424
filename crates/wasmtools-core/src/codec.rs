//! File boundary: decoding uploads into pixel buffers and encoding exports.
//!
//! Only PNG, JPEG, WebP and GIF uploads are accepted; the type is taken from
//! the MIME type reported by the browser. Exports are always PNG.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat, ImageReader};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::PixelBuffer;

/// Errors at the codec boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The upload is not one of the accepted image types.
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    /// The bytes could not be decoded as the declared type.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),

    /// Export requested before any image was loaded
    #[error("No image loaded")]
    NoImage,
}

/// Accepted upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    Png,
    Jpeg,
    Webp,
    Gif,
}

impl SourceFormat {
    pub const ALL: [SourceFormat; 4] = [
        SourceFormat::Png,
        SourceFormat::Jpeg,
        SourceFormat::Webp,
        SourceFormat::Gif,
    ];

    /// Match an exact MIME type.
    pub fn from_mime(mime: &str) -> Result<Self, CodecError> {
        SourceFormat::ALL
            .into_iter()
            .find(|f| f.mime() == mime)
            .ok_or_else(|| CodecError::UnsupportedType(mime.to_string()))
    }

    pub fn mime(self) -> &'static str {
        match self {
            SourceFormat::Png => "image/png",
            SourceFormat::Jpeg => "image/jpeg",
            SourceFormat::Webp => "image/webp",
            SourceFormat::Gif => "image/gif",
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            SourceFormat::Png => ImageFormat::Png,
            SourceFormat::Jpeg => ImageFormat::Jpeg,
            SourceFormat::Webp => ImageFormat::WebP,
            SourceFormat::Gif => ImageFormat::Gif,
        }
    }
}

/// Decode an upload to RGBA8. Animated GIFs yield their first frame.
pub fn decode_image(bytes: &[u8], mime: &str) -> Result<PixelBuffer, CodecError> {
    let format = SourceFormat::from_mime(mime).inspect_err(|e| log::warn!("{}", e))?;

    let img = ImageReader::with_format(Cursor::new(bytes), format.image_format())
        .decode()
        .map_err(|e| CodecError::CorruptedFile(e.to_string()))
        .inspect_err(|e| log::warn!("{}", e))?;

    let buffer = PixelBuffer::from_rgba_image(img.into_rgba8());
    log::debug!(
        "Decoded {} upload: {}x{}",
        format.mime(),
        buffer.width,
        buffer.height
    );
    Ok(buffer)
}

/// Encode a buffer as PNG, keeping alpha.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, CodecError> {
    if buffer.is_empty() {
        return Err(CodecError::InvalidDimensions {
            width: buffer.width,
            height: buffer.height,
        });
    }

    let mut output = Cursor::new(Vec::new());
    PngEncoder::new(&mut output)
        .write_image(
            &buffer.pixels,
            buffer.width,
            buffer.height,
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| CodecError::EncodingFailed(e.to_string()))?;

    Ok(output.into_inner())
}

/// Download name for an export: `<tool>_<timestamp>.png`.
pub fn export_filename(tool: &str, timestamp_ms: u64) -> String {
    format!("{}_{}.png", tool, timestamp_ms)
}
