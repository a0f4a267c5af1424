//! Keypad calculator state.

use super::expr::{evaluate_with, is_function, AngleMode};
use super::CalcError;

/// Text shown after a failed evaluation.
pub const ERROR_DISPLAY: &str = "Error";

/// Decimal places kept when formatting a result.
const RESULT_PRECISION: i32 = 10;

/// Characters accepted from the keypad.
fn is_key(ch: char) -> bool {
    ch.is_ascii_digit() || ".+-*/^()×÷−π".contains(ch)
}

/// Keys that begin a new operand rather than extend the previous result.
fn starts_operand(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '.' || ch == '(' || ch == 'π'
}

/// Format a result without floating-point noise (`0.1 + 0.2` shows `0.3`).
pub fn format_result(value: f64) -> String {
    let scale = 10f64.powi(RESULT_PRECISION);
    let rounded = if value.abs() < 1e15 {
        (value * scale).round() / scale
    } else {
        value
    };
    // Avoid "-0"
    if rounded == 0.0 {
        return "0".to_string();
    }
    rounded.to_string()
}

/// Expression entry with an evaluated display.
#[derive(Debug, Clone, Default)]
pub struct BasicCalculator {
    input: String,
    angle_mode: AngleMode,
    /// The display holds a result or `Error`; the next operand replaces it
    showing_result: bool,
    errored: bool,
}

impl BasicCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    pub fn set_angle_mode(&mut self, mode: AngleMode) {
        self.angle_mode = mode;
    }

    /// Current display text; `0` when nothing has been entered.
    pub fn display(&self) -> &str {
        if self.input.is_empty() {
            "0"
        } else {
            &self.input
        }
    }

    /// Append a key. Returns false when the key is not on the keypad.
    pub fn press(&mut self, key: char) -> bool {
        if !is_key(key) {
            return false;
        }
        if self.errored || (self.showing_result && starts_operand(key)) {
            self.input.clear();
        }
        self.errored = false;
        self.showing_result = false;
        self.input.push(key);
        true
    }

    /// Append a function call opener such as `sqrt(`.
    pub fn press_function(&mut self, name: &str) -> bool {
        if !is_function(name) {
            return false;
        }
        if self.errored || self.showing_result {
            self.input.clear();
        }
        self.errored = false;
        self.showing_result = false;
        self.input.push_str(name);
        self.input.push('(');
        true
    }

    pub fn backspace(&mut self) {
        if self.errored {
            self.clear();
            return;
        }
        self.showing_result = false;
        self.input.pop();
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.showing_result = false;
        self.errored = false;
    }

    /// Evaluate the entry and replace the display with the result.
    ///
    /// On failure the display shows `Error` and the next key starts fresh.
    pub fn evaluate(&mut self) -> Result<f64, CalcError> {
        match evaluate_with(&self.input, self.angle_mode) {
            Ok(value) => {
                self.input = format_result(value);
                self.showing_result = true;
                self.errored = false;
                Ok(value)
            }
            Err(err) => {
                self.input = ERROR_DISPLAY.to_string();
                self.showing_result = false;
                self.errored = true;
                Err(err)
            }
        }
    }
}
