//! Calculator bindings: keypad calculator, programmer calculator and fractions.
//!
//! Each calculator is an object owned by its page; there is no shared state.

use crate::types::{parse_name, to_js_error};
use wasm_bindgen::prelude::*;
use wasmtools_core::calc::{
    fraction, AngleMode, Base, BasicCalculator, Fraction, ProgrammerCalculator, ProgrammerOp,
};

/// Keypad calculator for JavaScript.
#[wasm_bindgen]
#[derive(Default)]
pub struct JsBasicCalculator {
    inner: BasicCalculator,
}

#[wasm_bindgen]
impl JsBasicCalculator {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current display text
    #[wasm_bindgen(getter)]
    pub fn display(&self) -> String {
        self.inner.display().to_string()
    }

    /// Use degrees instead of radians for trigonometry
    #[wasm_bindgen(getter)]
    pub fn degrees(&self) -> bool {
        self.inner.angle_mode() == AngleMode::Degrees
    }

    #[wasm_bindgen(setter)]
    pub fn set_degrees(&mut self, value: bool) {
        let mode = if value {
            AngleMode::Degrees
        } else {
            AngleMode::Radians
        };
        self.inner.set_angle_mode(mode);
    }

    /// Press a key. Only the first character of `key` is used; returns false
    /// for keys outside the keypad.
    pub fn press(&mut self, key: &str) -> bool {
        key.chars().next().is_some_and(|c| self.inner.press(c))
    }

    /// Insert a function call such as `sqrt(`.
    pub fn press_function(&mut self, name: &str) -> bool {
        self.inner.press_function(name)
    }

    pub fn backspace(&mut self) {
        self.inner.backspace();
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Evaluate and return the new display text (`Error` on failure).
    pub fn evaluate(&mut self) -> String {
        if let Err(e) = self.inner.evaluate() {
            log::debug!("Evaluation failed: {}", e);
        }
        self.display()
    }
}

/// Programmer calculator for JavaScript.
#[wasm_bindgen]
#[derive(Default)]
pub struct JsProgrammerCalculator {
    inner: ProgrammerCalculator,
}

#[wasm_bindgen]
impl JsProgrammerCalculator {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// The value in the current base
    #[wasm_bindgen(getter)]
    pub fn display(&self) -> String {
        self.inner.display()
    }

    /// Current radix (2, 8, 10 or 16)
    #[wasm_bindgen(getter)]
    pub fn radix(&self) -> u32 {
        self.inner.base().radix()
    }

    /// Switch the radix; the value is kept. Returns false for unsupported radixes.
    pub fn set_radix(&mut self, radix: u32) -> bool {
        match Base::from_radix(radix) {
            Some(base) => {
                self.inner.set_base(base);
                true
            }
            None => false,
        }
    }

    /// Append a digit; digits outside the current base are rejected.
    pub fn input_digit(&mut self, digit: &str) -> Result<(), JsValue> {
        let Some(c) = digit.chars().next() else {
            return Ok(());
        };
        self.inner.input_digit(c).map_err(to_js_error)
    }

    pub fn backspace(&mut self) {
        self.inner.backspace();
    }

    /// Queue an operator by symbol: `+ - * / % & | ^ << >>`.
    pub fn operator(&mut self, symbol: &str) -> Result<(), JsValue> {
        let op = ProgrammerOp::from_symbol(symbol)
            .or_else(|| parse_name(symbol).ok())
            .ok_or_else(|| to_js_error(format!("Unknown operator: {}", symbol)))?;
        self.inner.apply_operator(op);
        Ok(())
    }

    pub fn equals(&mut self) {
        self.inner.equals();
    }

    pub fn not(&mut self) {
        self.inner.not();
    }

    pub fn negate(&mut self) {
        self.inner.negate();
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// `{ binary, octal, decimal, hexadecimal }`
    pub fn all_bases(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.all_bases()).map_err(to_js_error)
    }
}

/// Evaluate `lhs op rhs` over fractions, returning the reduced result as `n/d`.
///
/// Operands accept `a`, `a/b`, `w a/b` and decimals.
#[wasm_bindgen]
pub fn fraction_evaluate(lhs: &str, op: &str, rhs: &str) -> Result<String, JsValue> {
    fraction::evaluate(lhs, op, rhs)
        .map(|f| f.to_string())
        .map_err(to_js_error)
}

/// Render a fraction as a mixed number, e.g. `7/2` -> `3 1/2`.
#[wasm_bindgen]
pub fn fraction_to_mixed(value: &str) -> Result<String, JsValue> {
    Fraction::parse(value)
        .map(|f| f.to_mixed().to_string())
        .map_err(to_js_error)
}

/// Decimal approximation of a fraction.
#[wasm_bindgen]
pub fn fraction_to_decimal(value: &str) -> Result<f64, JsValue> {
    Fraction::parse(value).map(|f| f.to_f64()).map_err(to_js_error)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_division_by_zero_message() {
        let err = fraction_evaluate("1", "/", "0").unwrap_err();
        assert_eq!(err.as_string().as_deref(), Some("Division by zero"));
    }

    #[wasm_bindgen_test]
    fn test_invalid_digit_is_error() {
        let mut calc = JsProgrammerCalculator::new();
        calc.set_radix(2);
        assert!(calc.input_digit("3").is_err());
    }

    #[wasm_bindgen_test]
    fn test_all_bases_object() {
        let mut calc = JsProgrammerCalculator::new();
        calc.input_digit("9").unwrap();
        let value = calc.all_bases().unwrap();
        let hex = js_sys::Reflect::get(&value, &JsValue::from_str("hexadecimal")).unwrap();
        assert_eq!(hex.as_string().as_deref(), Some("9"));
    }
}
