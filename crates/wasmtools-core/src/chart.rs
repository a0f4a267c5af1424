//! Chart data entered as free-form JSON.
//!
//! The value is passed to the charting library untouched; parsing is the only check.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChartError {
    /// The text is not valid JSON. Position is 1-based.
    #[error("Invalid JSON at line {line}, column {column}: {message}")]
    InvalidJson {
        line: usize,
        column: usize,
        message: String,
    },
}

impl From<serde_json::Error> for ChartError {
    fn from(err: serde_json::Error) -> Self {
        let message = err.to_string();
        // serde_json appends " at line L column C"; the position is kept separately
        let message = match message.rfind(" at line ") {
            Some(idx) => message[..idx].to_string(),
            None => message,
        };
        ChartError::InvalidJson {
            line: err.line(),
            column: err.column(),
            message,
        }
    }
}

/// Parse chart data.
pub fn parse_chart_json(text: &str) -> Result<Value, ChartError> {
    let value = serde_json::from_str(text)?;
    Ok(value)
}
