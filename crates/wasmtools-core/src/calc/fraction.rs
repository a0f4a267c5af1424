//! Exact rational arithmetic.
//!
//! A [`Fraction`] is always stored reduced with a positive denominator, so
//! structural equality is numeric equality.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FractionError {
    #[error("Division by zero")]
    DivisionByZero,

    #[error("Invalid fraction: {0}")]
    InvalidFormat(String),

    #[error("The fractional part of a mixed number cannot be negative: {0}")]
    NegativeFractionalPart(String),

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fraction {
    numer: BigInt,
    denom: BigInt,
}

impl Fraction {
    /// Build `numer / denom`, reduced.
    pub fn new(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Result<Self, FractionError> {
        let numer = numer.into();
        let denom = denom.into();
        if denom.is_zero() {
            return Err(FractionError::DivisionByZero);
        }
        Ok(Self::reduced(numer, denom))
    }

    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Self {
            numer: value.into(),
            denom: BigInt::one(),
        }
    }

    pub fn zero() -> Self {
        Self::from_integer(0)
    }

    /// Reduce by the gcd and move the sign onto the numerator. `denom` must be non-zero.
    fn reduced(numer: BigInt, denom: BigInt) -> Self {
        let gcd = numer.gcd(&denom);
        let (mut numer, mut denom) = if gcd.is_zero() || gcd.is_one() {
            (numer, denom)
        } else {
            (numer / &gcd, denom / &gcd)
        };
        if denom.is_negative() {
            numer = -numer;
            denom = -denom;
        }
        Self { numer, denom }
    }

    pub fn numer(&self) -> &BigInt {
        &self.numer
    }

    pub fn denom(&self) -> &BigInt {
        &self.denom
    }

    pub fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }

    pub fn is_integer(&self) -> bool {
        self.denom.is_one()
    }

    pub fn add(&self, other: &Fraction) -> Fraction {
        Self::reduced(
            &self.numer * &other.denom + &other.numer * &self.denom,
            &self.denom * &other.denom,
        )
    }

    pub fn sub(&self, other: &Fraction) -> Fraction {
        Self::reduced(
            &self.numer * &other.denom - &other.numer * &self.denom,
            &self.denom * &other.denom,
        )
    }

    pub fn mul(&self, other: &Fraction) -> Fraction {
        Self::reduced(&self.numer * &other.numer, &self.denom * &other.denom)
    }

    pub fn div(&self, other: &Fraction) -> Result<Fraction, FractionError> {
        if other.is_zero() {
            return Err(FractionError::DivisionByZero);
        }
        Ok(Self::reduced(
            &self.numer * &other.denom,
            &self.denom * &other.numer,
        ))
    }

    pub fn to_f64(&self) -> f64 {
        match (self.numer.to_f64(), self.denom.to_f64()) {
            (Some(n), Some(d)) => n / d,
            _ => f64::NAN,
        }
    }

    /// Split into a whole part and a proper fraction sharing one sign.
    pub fn to_mixed(&self) -> MixedNumber {
        let (whole, rem) = self.numer.abs().div_rem(&self.denom);
        MixedNumber {
            negative: self.numer.is_negative(),
            whole,
            numer: rem,
            denom: self.denom.clone(),
        }
    }

    /// Parse `a`, `a/b`, `w a/b` or a decimal such as `-0.75`.
    ///
    /// In a mixed number the sign of the whole part applies to the fraction
    /// too, so `-1 1/2` is `-3/2`. A signed fractional part is rejected.
    pub fn parse(input: &str) -> Result<Fraction, FractionError> {
        let text = input.trim();
        let invalid = || FractionError::InvalidFormat(input.to_string());
        let parts: Vec<&str> = text.split_whitespace().collect();

        match parts.as_slice() {
            [single] => parse_simple(single).ok_or_else(invalid)?,
            [whole, frac] => {
                if frac.starts_with('-') || frac.starts_with('+') {
                    return Err(FractionError::NegativeFractionalPart(input.to_string()));
                }
                let whole_value = parse_integer(whole).ok_or_else(invalid)?;
                let (n, d) = frac.split_once('/').ok_or_else(invalid)?;
                let n = parse_integer(n).ok_or_else(invalid)?;
                let d = parse_integer(d).ok_or_else(invalid)?;
                if d.is_negative() {
                    return Err(FractionError::NegativeFractionalPart(input.to_string()));
                }
                let magnitude =
                    Fraction::from_integer(whole_value.abs()).add(&Fraction::new(n, d)?);
                if whole.starts_with('-') {
                    Ok(-magnitude)
                } else {
                    Ok(magnitude)
                }
            }
            _ => Err(invalid()),
        }
    }
}

fn parse_integer(text: &str) -> Option<BigInt> {
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigInt::from_str(text).ok()
}

/// `a`, `a/b` or a decimal. The outer `None` means unparseable.
fn parse_simple(text: &str) -> Option<Result<Fraction, FractionError>> {
    if let Some((n, d)) = text.split_once('/') {
        return Some(Fraction::new(parse_integer(n)?, parse_integer(d)?));
    }
    if let Some((int_part, frac_part)) = text.split_once('.') {
        if frac_part.is_empty() || !frac_part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let negative = int_part.starts_with('-');
        let int_digits = int_part.strip_prefix(['-', '+']).unwrap_or(int_part);
        let whole = if int_digits.is_empty() {
            BigInt::zero()
        } else {
            parse_integer(int_digits)?
        };
        let scale = num_traits::pow(BigInt::from(10), frac_part.len());
        let frac = BigInt::from_str(frac_part).ok()?;
        let numer = whole * &scale + frac;
        let numer = if negative { -numer } else { numer };
        return Some(Fraction::new(numer, scale));
    }
    Some(Ok(Fraction::from_integer(parse_integer(text)?)))
}

impl FromStr for Fraction {
    type Err = FractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fraction::parse(s)
    }
}

impl std::ops::Neg for Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        Fraction {
            numer: -self.numer,
            denom: self.denom,
        }
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

impl Serialize for Fraction {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Fraction {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Fraction::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// A fraction written as `whole numer/denom` with a single leading sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixedNumber {
    pub negative: bool,
    pub whole: BigInt,
    pub numer: BigInt,
    pub denom: BigInt,
}

impl fmt::Display for MixedNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        match (self.whole.is_zero(), self.numer.is_zero()) {
            (_, true) => write!(f, "{}", self.whole),
            (true, false) => write!(f, "{}/{}", self.numer, self.denom),
            (false, false) => write!(f, "{} {}/{}", self.whole, self.numer, self.denom),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FractionOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl FractionOp {
    pub fn from_symbol(symbol: &str) -> Result<Self, FractionError> {
        match symbol.trim() {
            "+" => Ok(FractionOp::Add),
            "-" | "−" => Ok(FractionOp::Sub),
            "*" | "×" => Ok(FractionOp::Mul),
            "/" | "÷" => Ok(FractionOp::Div),
            other => Err(FractionError::UnknownOperator(other.to_string())),
        }
    }

    pub fn apply(self, lhs: &Fraction, rhs: &Fraction) -> Result<Fraction, FractionError> {
        match self {
            FractionOp::Add => Ok(lhs.add(rhs)),
            FractionOp::Sub => Ok(lhs.sub(rhs)),
            FractionOp::Mul => Ok(lhs.mul(rhs)),
            FractionOp::Div => lhs.div(rhs),
        }
    }
}

/// Parse both operands and apply the operator given by its symbol.
pub fn evaluate(lhs: &str, op: &str, rhs: &str) -> Result<Fraction, FractionError> {
    let op = FractionOp::from_symbol(op)?;
    op.apply(&Fraction::parse(lhs)?, &Fraction::parse(rhs)?)
}
