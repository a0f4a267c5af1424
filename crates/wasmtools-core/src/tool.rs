//! Tool selection and the render loop that drives a single-image page.
//!
//! A [`Tool`] names one transform together with its parameters. The
//! [`Controller`] owns the loaded image and the current tool, re-renders on
//! every change and pushes the result to a [`Sink`].

use serde::{Deserialize, Serialize};

use crate::adjustments::{
    apply_contrast, apply_exposure, apply_grayscale, apply_invert, apply_posterize,
    apply_saturation, apply_temperature, ContrastParams, ExposureParams, GrayscaleParams,
    InvertParams, PosterizeParams, SaturationParams, TemperatureParams,
};
use crate::buffer::PixelBuffer;
use crate::channels::{
    apply_channel_mixer, apply_color_balance, extract_channel, Channel, ChannelMatrix,
    ColorBalanceParams,
};
use crate::codec::{decode_image, encode_png, export_filename, CodecError};
use crate::effects::{
    apply_drop_shadow, apply_pixelate, apply_rounded_corners, apply_vignette, CornerRadii,
    PixelateParams, ShadowParams, VignetteParams,
};
use crate::transform::{apply_flip, apply_rotation, FlipParams, RotateParams};

/// A transform and its parameters, tagged by `"tool"` when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum Tool {
    Rotate(RotateParams),
    Flip(FlipParams),
    Contrast(ContrastParams),
    Saturation(SaturationParams),
    Exposure(ExposureParams),
    Vignette(VignetteParams),
    Temperature(TemperatureParams),
    Pixelate(PixelateParams),
    RoundedCorners(CornerRadii),
    DropShadow(ShadowParams),
    Grayscale(GrayscaleParams),
    Invert(InvertParams),
    Posterize(PosterizeParams),
    ChannelView { channel: Channel },
    ChannelMixer(ChannelMatrix),
    ColorBalance(ColorBalanceParams),
}

impl Default for Tool {
    fn default() -> Self {
        Tool::Contrast(ContrastParams::default())
    }
}

impl Tool {
    /// Run the transform.
    pub fn apply(&self, image: &PixelBuffer) -> PixelBuffer {
        match self {
            Tool::Rotate(p) => apply_rotation(image, p),
            Tool::Flip(p) => apply_flip(image, p),
            Tool::Contrast(p) => apply_contrast(image, p),
            Tool::Saturation(p) => apply_saturation(image, p),
            Tool::Exposure(p) => apply_exposure(image, p),
            Tool::Vignette(p) => apply_vignette(image, p),
            Tool::Temperature(p) => apply_temperature(image, p),
            Tool::Pixelate(p) => apply_pixelate(image, p),
            Tool::RoundedCorners(p) => apply_rounded_corners(image, p),
            Tool::DropShadow(p) => apply_drop_shadow(image, p),
            Tool::Grayscale(p) => apply_grayscale(image, p),
            Tool::Invert(p) => apply_invert(image, p),
            Tool::Posterize(p) => apply_posterize(image, p),
            Tool::ChannelView { channel } => extract_channel(image, *channel),
            Tool::ChannelMixer(m) => apply_channel_mixer(image, m),
            Tool::ColorBalance(p) => apply_color_balance(image, p),
        }
    }

    /// Serialized tag, also used in export file names.
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Rotate(_) => "rotate",
            Tool::Flip(_) => "flip",
            Tool::Contrast(_) => "contrast",
            Tool::Saturation(_) => "saturation",
            Tool::Exposure(_) => "exposure",
            Tool::Vignette(_) => "vignette",
            Tool::Temperature(_) => "temperature",
            Tool::Pixelate(_) => "pixelate",
            Tool::RoundedCorners(_) => "rounded_corners",
            Tool::DropShadow(_) => "drop_shadow",
            Tool::Grayscale(_) => "grayscale",
            Tool::Invert(_) => "invert",
            Tool::Posterize(_) => "posterize",
            Tool::ChannelView { .. } => "channel_view",
            Tool::ChannelMixer(_) => "channel_mixer",
            Tool::ColorBalance(_) => "color_balance",
        }
    }

    /// Same tool with default parameters.
    pub fn reset(&self) -> Tool {
        match self {
            Tool::Rotate(_) => Tool::Rotate(Default::default()),
            Tool::Flip(_) => Tool::Flip(Default::default()),
            Tool::Contrast(_) => Tool::Contrast(Default::default()),
            Tool::Saturation(_) => Tool::Saturation(Default::default()),
            Tool::Exposure(_) => Tool::Exposure(Default::default()),
            Tool::Vignette(_) => Tool::Vignette(Default::default()),
            Tool::Temperature(_) => Tool::Temperature(Default::default()),
            Tool::Pixelate(_) => Tool::Pixelate(Default::default()),
            Tool::RoundedCorners(_) => Tool::RoundedCorners(Default::default()),
            Tool::DropShadow(_) => Tool::DropShadow(Default::default()),
            Tool::Grayscale(_) => Tool::Grayscale(Default::default()),
            Tool::Invert(_) => Tool::Invert(Default::default()),
            Tool::Posterize(_) => Tool::Posterize(Default::default()),
            Tool::ChannelView { .. } => Tool::ChannelView {
                channel: Channel::Red,
            },
            Tool::ChannelMixer(_) => Tool::ChannelMixer(Default::default()),
            Tool::ColorBalance(_) => Tool::ColorBalance(Default::default()),
        }
    }
}

/// Receives every rendered frame.
pub trait Sink {
    fn present(&mut self, buffer: &PixelBuffer);
}

impl<F: FnMut(&PixelBuffer)> Sink for F {
    fn present(&mut self, buffer: &PixelBuffer) {
        self(buffer)
    }
}

/// An encoded download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Image, tool and output for one page.
#[derive(Debug)]
pub struct Controller<S: Sink> {
    source: Option<PixelBuffer>,
    output: Option<PixelBuffer>,
    tool: Tool,
    sink: S,
}

impl<S: Sink> Controller<S> {
    pub fn new(tool: Tool, sink: S) -> Self {
        Self {
            source: None,
            output: None,
            tool,
            sink,
        }
    }

    /// Replace the source image and render.
    pub fn load(&mut self, image: PixelBuffer) {
        log::debug!("Loaded {}x{} image", image.width, image.height);
        self.source = Some(image);
        self.render();
    }

    /// Decode an upload and load it. Unsupported types leave the current image untouched.
    pub fn load_bytes(&mut self, bytes: &[u8], mime: &str) -> Result<(), CodecError> {
        let image = decode_image(bytes, mime)?;
        self.load(image);
        Ok(())
    }

    /// Replace the tool and its parameters, then render.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
        self.render();
    }

    /// Restore the current tool's default parameters and render.
    pub fn reset(&mut self) {
        self.tool = self.tool.reset();
        log::debug!("Reset {} to defaults", self.tool.name());
        self.render();
    }

    /// Apply the tool to the source and push the result to the sink.
    ///
    /// Does nothing until an image is loaded.
    pub fn render(&mut self) -> Option<&PixelBuffer> {
        let source = self.source.as_ref()?;
        let output = self.tool.apply(source);
        log::debug!(
            "Rendered {}: {}x{} -> {}x{}",
            self.tool.name(),
            source.width,
            source.height,
            output.width,
            output.height
        );
        self.sink.present(&output);
        self.output = Some(output);
        self.output.as_ref()
    }

    pub fn source(&self) -> Option<&PixelBuffer> {
        self.source.as_ref()
    }

    /// Last rendered frame.
    pub fn output(&self) -> Option<&PixelBuffer> {
        self.output.as_ref()
    }

    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Encode the last frame as `<tool>_<timestamp>.png`.
    pub fn export(&self, timestamp_ms: u64) -> Result<Export, CodecError> {
        let output = self.output.as_ref().ok_or(CodecError::NoImage)?;
        Ok(Export {
            filename: export_filename(self.tool.name(), timestamp_ms),
            bytes: encode_png(output)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjustments::test_support::sample_image;
    use crate::buffer::Rgba;

    /// Collects every presented frame.
    #[derive(Debug, Default)]
    struct RecordingSink {
        frames: Vec<PixelBuffer>,
    }

    impl Sink for RecordingSink {
        fn present(&mut self, buffer: &PixelBuffer) {
            self.frames.push(buffer.clone());
        }
    }

    fn controller(tool: Tool) -> Controller<RecordingSink> {
        Controller::new(tool, RecordingSink::default())
    }

    #[test]
    fn test_no_render_before_load() {
        let mut c = controller(Tool::default());
        assert!(c.render().is_none());
        c.set_tool(Tool::Invert(InvertParams::default()));
        assert!(c.sink().frames.is_empty());
        assert!(c.output().is_none());
    }

    #[test]
    fn test_every_change_renders() {
        let mut c = controller(Tool::Invert(InvertParams::default()));
        c.load(PixelBuffer::filled(2, 2, Rgba::rgb(10, 20, 30)));
        assert_eq!(c.sink().frames.len(), 1);
        assert_eq!(c.sink().frames[0].pixel(0, 0), Rgba::rgb(245, 235, 225));

        c.set_tool(Tool::Flip(FlipParams {
            horizontal: true,
            vertical: false,
        }));
        c.reset();
        assert_eq!(c.sink().frames.len(), 3);
        assert_eq!(c.output(), c.sink().frames.last());
    }

    #[test]
    fn test_reset_restores_defaults_for_same_tool() {
        let tool = Tool::Pixelate(PixelateParams {
            pixel_size: 3,
            colors: 27,
        });
        assert_eq!(tool.reset(), Tool::Pixelate(PixelateParams::default()));
        let view = Tool::ChannelView {
            channel: Channel::Blue,
        };
        assert_eq!(view.reset().name(), "channel_view");
    }

    #[test]
    fn test_neutral_tools_are_identity() {
        let img = sample_image();
        let tools = [
            Tool::Contrast(Default::default()),
            Tool::Saturation(Default::default()),
            Tool::Exposure(Default::default()),
            Tool::Temperature(Default::default()),
            Tool::Flip(Default::default()),
            Tool::ChannelMixer(Default::default()),
            Tool::ColorBalance(Default::default()),
            Tool::RoundedCorners(Default::default()),
        ];
        for tool in tools {
            assert_eq!(tool.apply(&img), img, "{} should be identity", tool.name());
        }
    }

    #[test]
    fn test_deserialize_tagged_with_defaults() {
        let tool: Tool = serde_json::from_str(r#"{"tool": "vignette", "intensity": 80}"#).unwrap();
        assert_eq!(
            tool,
            Tool::Vignette(VignetteParams {
                intensity: 80.0,
                ..Default::default()
            })
        );

        let tool: Tool =
            serde_json::from_str(r##"{"tool": "drop_shadow", "color": "#ff000080"}"##).unwrap();
        let Tool::DropShadow(params) = tool else {
            panic!("expected drop shadow");
        };
        assert_eq!(params.color, Rgba::new(255, 0, 0, 128));
        assert_eq!(params.blur, ShadowParams::default().blur);

        let tool: Tool =
            serde_json::from_str(r#"{"tool": "channel_view", "channel": "green"}"#).unwrap();
        assert_eq!(
            tool,
            Tool::ChannelView {
                channel: Channel::Green
            }
        );
    }

    #[test]
    fn test_serialized_tag_matches_name() {
        let tools = [
            Tool::Rotate(Default::default()),
            Tool::RoundedCorners(Default::default()),
            Tool::ChannelMixer(Default::default()),
            Tool::DropShadow(Default::default()),
        ];
        for tool in tools {
            let value = serde_json::to_value(&tool).unwrap();
            assert_eq!(value["tool"], tool.name());
        }
    }

    #[test]
    fn test_unknown_tool_rejected() {
        let result: Result<Tool, _> = serde_json::from_str(r#"{"tool": "blur"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_closure_sink() {
        let mut sizes = Vec::new();
        {
            let sink = |b: &PixelBuffer| sizes.push(b.dimensions());
            let mut c = Controller::new(Tool::DropShadow(ShadowParams::default()), sink);
            c.load(PixelBuffer::filled(4, 4, Rgba::WHITE));
        }
        // pad = 10 * 2 + 10
        assert_eq!(sizes, vec![(64, 64)]);
    }

    #[test]
    fn test_export() {
        let mut c = controller(Tool::Posterize(PosterizeParams::default()));
        assert_eq!(c.export(1), Err(CodecError::NoImage));

        c.load(PixelBuffer::filled(2, 2, Rgba::WHITE));
        let export = c.export(1_700_000_000_000).unwrap();
        assert_eq!(export.filename, "posterize_1700000000000.png");
        assert_eq!(&export.bytes[1..4], b"PNG");
    }

    #[test]
    fn test_load_bytes_rejects_unsupported_type() {
        let mut c = controller(Tool::default());
        let png = encode_png(&PixelBuffer::filled(1, 1, Rgba::WHITE)).unwrap();
        assert!(c.load_bytes(&png, "image/bmp").is_err());
        assert!(c.source().is_none());
        assert!(c.load_bytes(&png, "image/png").is_ok());
        assert_eq!(c.source().map(|s| s.dimensions()), Some((1, 1)));
    }
}
