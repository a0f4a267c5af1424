//! Programmer calculator: arbitrary-precision integers in four bases.
//!
//! Division and remainder by zero yield 0 instead of failing.

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

use super::CalcError;

/// Largest shift distance, in bits, in either direction.
pub const MAX_SHIFT: i64 = 4096;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Base {
    Binary,
    Octal,
    #[default]
    Decimal,
    Hexadecimal,
}

impl Base {
    pub const ALL: [Base; 4] = [Base::Binary, Base::Octal, Base::Decimal, Base::Hexadecimal];

    pub fn radix(self) -> u32 {
        match self {
            Base::Binary => 2,
            Base::Octal => 8,
            Base::Decimal => 10,
            Base::Hexadecimal => 16,
        }
    }

    pub fn from_radix(radix: u32) -> Option<Self> {
        Base::ALL.into_iter().find(|b| b.radix() == radix)
    }

    /// Render `value` in this base; hexadecimal digits are upper case.
    pub fn format(self, value: &BigInt) -> String {
        value.to_str_radix(self.radix()).to_uppercase()
    }
}

/// Binary operators, applied as `operand op value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgrammerOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    And,
    Or,
    Xor,
    Shl,
    Shr,
}

impl ProgrammerOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "+" => ProgrammerOp::Add,
            "-" | "−" => ProgrammerOp::Sub,
            "*" | "×" => ProgrammerOp::Mul,
            "/" | "÷" => ProgrammerOp::Div,
            "%" | "mod" => ProgrammerOp::Mod,
            "&" | "and" => ProgrammerOp::And,
            "|" | "or" => ProgrammerOp::Or,
            "^" | "xor" => ProgrammerOp::Xor,
            "<<" => ProgrammerOp::Shl,
            ">>" => ProgrammerOp::Shr,
            _ => return None,
        };
        Some(op)
    }

    pub fn apply(self, lhs: &BigInt, rhs: &BigInt) -> BigInt {
        match self {
            ProgrammerOp::Add => lhs + rhs,
            ProgrammerOp::Sub => lhs - rhs,
            ProgrammerOp::Mul => lhs * rhs,
            ProgrammerOp::Div if rhs.is_zero() => BigInt::zero(),
            ProgrammerOp::Div => lhs / rhs,
            ProgrammerOp::Mod if rhs.is_zero() => BigInt::zero(),
            ProgrammerOp::Mod => lhs % rhs,
            ProgrammerOp::And => lhs & rhs,
            ProgrammerOp::Or => lhs | rhs,
            ProgrammerOp::Xor => lhs ^ rhs,
            ProgrammerOp::Shl => shift(lhs, shift_amount(rhs)),
            ProgrammerOp::Shr => shift(lhs, -shift_amount(rhs)),
        }
    }
}

/// Shift distance clamped to `-MAX_SHIFT..=MAX_SHIFT`.
fn shift_amount(rhs: &BigInt) -> i64 {
    match rhs.to_i64() {
        Some(n) => n.clamp(-MAX_SHIFT, MAX_SHIFT),
        None if rhs.is_negative() => -MAX_SHIFT,
        None => MAX_SHIFT,
    }
}

/// Shift left for positive `bits`, arithmetic shift right for negative.
fn shift(value: &BigInt, bits: i64) -> BigInt {
    let distance = bits.unsigned_abs() as usize;
    if bits >= 0 {
        value << distance
    } else {
        value >> distance
    }
}

/// The current value rendered in every base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseDisplays {
    pub binary: String,
    pub octal: String,
    pub decimal: String,
    pub hexadecimal: String,
}

/// Calculator state: the entry value plus a pending chained operation.
#[derive(Debug, Clone, Default)]
pub struct ProgrammerCalculator {
    value: BigInt,
    base: Base,
    operand: Option<BigInt>,
    pending: Option<ProgrammerOp>,
    /// The next digit starts a new number
    new_input: bool,
}

impl ProgrammerCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &BigInt {
        &self.value
    }

    pub fn set_value(&mut self, value: BigInt) {
        self.value = value;
        self.new_input = true;
    }

    pub fn base(&self) -> Base {
        self.base
    }

    /// Switch the display base. The value is unchanged.
    pub fn set_base(&mut self, base: Base) {
        self.base = base;
    }

    pub fn pending(&self) -> Option<ProgrammerOp> {
        self.pending
    }

    /// Append a digit in the current base.
    pub fn input_digit(&mut self, digit: char) -> Result<(), CalcError> {
        let radix = self.base.radix();
        let d = digit
            .to_digit(radix)
            .ok_or(CalcError::InvalidDigit { digit, radix })?;

        if self.new_input {
            self.value = BigInt::zero();
            self.new_input = false;
        }
        let scaled = &self.value * radix;
        self.value = if self.value.is_negative() {
            scaled - d
        } else {
            scaled + d
        };
        Ok(())
    }

    /// Drop the last digit of the entry.
    pub fn backspace(&mut self) {
        if self.new_input {
            return;
        }
        self.value = &self.value / self.base.radix();
    }

    /// Queue `op`, first resolving any operation already pending.
    pub fn apply_operator(&mut self, op: ProgrammerOp) {
        if !self.new_input {
            self.resolve();
        }
        self.operand = Some(self.value.clone());
        self.pending = Some(op);
        self.new_input = true;
    }

    /// Resolve the pending operation, if any.
    pub fn equals(&mut self) {
        self.resolve();
        self.new_input = true;
    }

    fn resolve(&mut self) {
        if let (Some(op), Some(lhs)) = (self.pending.take(), self.operand.take()) {
            self.value = op.apply(&lhs, &self.value);
        }
    }

    /// One's complement: `!x = -x - 1`.
    pub fn not(&mut self) {
        self.value = -&self.value - 1;
        self.new_input = true;
    }

    pub fn negate(&mut self) {
        self.value = -&self.value;
    }

    pub fn clear(&mut self) {
        *self = Self {
            base: self.base,
            ..Self::default()
        };
    }

    /// The value in the current base.
    pub fn display(&self) -> String {
        self.base.format(&self.value)
    }

    pub fn all_bases(&self) -> BaseDisplays {
        BaseDisplays {
            binary: Base::Binary.format(&self.value),
            octal: Base::Octal.format(&self.value),
            decimal: Base::Decimal.format(&self.value),
            hexadecimal: Base::Hexadecimal.format(&self.value),
        }
    }
}
