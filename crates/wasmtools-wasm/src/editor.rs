//! Tool dispatch and the per-page editor object.
//!
//! Tools are plain JS objects tagged by `tool`, for example
//! `{ tool: "vignette", intensity: 80 }`. Missing fields take their defaults.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const editor = new JsEditor({ tool: "pixelate" });
//! editor.load_bytes(bytes, file.type);
//! editor.set_tool({ tool: "pixelate", pixel_size: 12 });
//! ctx.putImageData(new ImageData(new Uint8ClampedArray(editor.output().pixels()), editor.width), 0, 0);
//! ```

use crate::codec::now_ms;
use crate::types::{params_from_js, to_js_error, JsPixelBuffer};
use wasm_bindgen::prelude::*;
use wasmtools_core::{Controller, PixelBuffer, Sink, Tool};

/// Apply a tool object to an image.
#[wasm_bindgen]
pub fn apply_tool(image: &JsPixelBuffer, tool: JsValue) -> Result<JsPixelBuffer, JsValue> {
    let tool: Tool = serde_wasm_bindgen::from_value(tool).map_err(to_js_error)?;
    Ok(JsPixelBuffer::from_core(tool.apply(image.as_core())))
}

/// Counts rendered frames; JavaScript pulls the image through `output()`.
#[derive(Debug, Default)]
struct FrameSink {
    frames: u32,
}

impl Sink for FrameSink {
    fn present(&mut self, _buffer: &PixelBuffer) {
        self.frames += 1;
    }
}

/// Editor state for one tool page: the loaded image, the tool and its output.
#[wasm_bindgen]
pub struct JsEditor {
    controller: Controller<FrameSink>,
}

#[wasm_bindgen]
impl JsEditor {
    /// Create an editor for a tool object; `undefined` selects the default tool.
    #[wasm_bindgen(constructor)]
    pub fn new(tool: JsValue) -> Result<JsEditor, JsValue> {
        let tool: Tool = params_from_js(tool)?;
        Ok(Self::with_tool(tool))
    }

    /// Load raw RGBA pixels and render.
    pub fn load(&mut self, image: &JsPixelBuffer) {
        self.controller.load(image.as_core().clone());
    }

    /// Decode an upload and render. Unsupported types are rejected without
    /// touching the current image.
    pub fn load_bytes(&mut self, bytes: &[u8], mime: &str) -> Result<(), JsValue> {
        self.controller.load_bytes(bytes, mime).map_err(to_js_error)
    }

    /// Replace the tool and its parameters, then render.
    pub fn set_tool(&mut self, tool: JsValue) -> Result<(), JsValue> {
        let tool: Tool = serde_wasm_bindgen::from_value(tool).map_err(to_js_error)?;
        self.controller.set_tool(tool);
        Ok(())
    }

    /// Reset the current tool to its defaults and render.
    pub fn reset(&mut self) {
        self.controller.reset();
    }

    /// Current tool as a JS object.
    pub fn tool(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.controller.tool()).map_err(to_js_error)
    }

    /// Name of the current tool
    #[wasm_bindgen(getter)]
    pub fn tool_name(&self) -> String {
        self.controller.tool().name().to_string()
    }

    /// Number of frames rendered so far
    #[wasm_bindgen(getter)]
    pub fn frames(&self) -> u32 {
        self.controller.sink().frames
    }

    /// Last rendered image, if any.
    pub fn output(&self) -> Option<JsPixelBuffer> {
        self.controller
            .output()
            .map(|b| JsPixelBuffer::from_core(b.clone()))
    }

    /// PNG bytes of the last rendered image.
    pub fn export_png(&self) -> Result<Vec<u8>, JsValue> {
        self.export().map(|(_, bytes)| bytes)
    }

    /// Download name for the current export.
    pub fn export_filename(&self) -> String {
        wasmtools_core::export_filename(self.controller.tool().name(), now_ms())
    }
}

impl JsEditor {
    fn with_tool(tool: Tool) -> Self {
        Self {
            controller: Controller::new(tool, FrameSink::default()),
        }
    }

    fn export(&self) -> Result<(String, Vec<u8>), JsValue> {
        let export = self.controller.export(now_ms()).map_err(to_js_error)?;
        Ok((export.filename, export.bytes))
    }
}
