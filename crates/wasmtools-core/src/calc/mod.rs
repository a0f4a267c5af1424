//! Calculator family: expression evaluation, a programmer calculator over
//! arbitrary-precision integers, and exact fractions.
//!
//! Nothing here evaluates code dynamically. Expressions are parsed into an AST
//! and folded through fixed operator and function tables.

pub mod basic;
pub mod expr;
pub mod fraction;
pub mod programmer;

pub use basic::BasicCalculator;
pub use expr::{evaluate, evaluate_with, parse, AngleMode, Expr};
pub use fraction::{Fraction, FractionError, FractionOp, MixedNumber};
pub use programmer::{Base, BaseDisplays, ProgrammerCalculator, ProgrammerOp};

use thiserror::Error;

/// Errors from expression parsing and evaluation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("Empty expression")]
    Empty,

    #[error("Unexpected character '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: usize },

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Unexpected token: {0}")]
    UnexpectedToken(String),

    #[error("Unexpected end of expression")]
    UnexpectedEnd,

    #[error("Unknown identifier: {0}")]
    UnknownIdentifier(String),

    #[error("Function {0} needs an argument in parentheses")]
    MissingArgument(String),

    #[error("Expression is nested more than {0} levels deep")]
    TooDeep(usize),

    #[error("Result is not a finite number")]
    NonFinite,

    #[error("Digit '{digit}' is not valid in base {radix}")]
    InvalidDigit { digit: char, radix: u32 },
}
