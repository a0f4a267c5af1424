//! WASM Tools Core - pixel transforms and calculators
//!
//! This crate holds everything behind the browser tools that is not browser
//! glue: the RGBA pixel buffer, every image transform, the calculator family,
//! the UI string table, chart data parsing and the upload/export codec.

pub mod adjustments;
pub mod buffer;
pub mod calc;
pub mod channels;
pub mod chart;
pub mod codec;
pub mod composite;
pub mod effects;
pub mod i18n;
pub mod luminance;
pub mod tool;
pub mod transform;

pub use buffer::{BufferError, PixelBuffer, Rgba};
pub use calc::{CalcError, Fraction, FractionError};
pub use chart::{parse_chart_json, ChartError};
pub use codec::{decode_image, encode_png, export_filename, CodecError, SourceFormat};
pub use i18n::{translate, Language};
pub use tool::{Controller, Export, Sink, Tool};
pub use transform::{apply_rotation, compute_rotated_bounds, Interpolation};
