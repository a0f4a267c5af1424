//! Arithmetic expression parser and evaluator.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := primary ('^' unary)?
//! primary := NUMBER | IDENT | IDENT '(' expr ')' | '(' expr ')'
//! ```
//!
//! `^` is right associative and binds tighter than unary minus, so `-2^2`
//! is `-4` and `2^-1` is `0.5`. The display glyphs `×`, `÷`, `−` and `π` are
//! accepted alongside their ASCII forms.

use std::f64::consts;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::CalcError;

/// Unit used by the trigonometric functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleMode {
    #[default]
    Radians,
    Degrees,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul => lhs * rhs,
            BinaryOp::Div => lhs / rhs,
            BinaryOp::Pow => lhs.powf(rhs),
        }
    }

    fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
            BinaryOp::Pow => '^',
        }
    }
}

/// How a function interacts with the angle mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AngleUse {
    None,
    /// Argument is an angle
    Input,
    /// Result is an angle
    Output,
}

/// A named single-argument function.
#[derive(Debug, Clone, Copy)]
pub struct Function {
    name: &'static str,
    eval: fn(f64) -> f64,
    angle: AngleUse,
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Function {
    const fn new(name: &'static str, eval: fn(f64) -> f64, angle: AngleUse) -> Self {
        Self { name, eval, angle }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn call(&self, arg: f64, mode: AngleMode) -> f64 {
        let degrees = mode == AngleMode::Degrees;
        match self.angle {
            AngleUse::Input if degrees => (self.eval)(arg.to_radians()),
            AngleUse::Output if degrees => (self.eval)(arg).to_degrees(),
            _ => (self.eval)(arg),
        }
    }
}

const FUNCTIONS: &[Function] = &[
    Function::new("sin", f64::sin, AngleUse::Input),
    Function::new("cos", f64::cos, AngleUse::Input),
    Function::new("tan", f64::tan, AngleUse::Input),
    Function::new("asin", f64::asin, AngleUse::Output),
    Function::new("acos", f64::acos, AngleUse::Output),
    Function::new("atan", f64::atan, AngleUse::Output),
    Function::new("sqrt", f64::sqrt, AngleUse::None),
    Function::new("cbrt", f64::cbrt, AngleUse::None),
    Function::new("ln", f64::ln, AngleUse::None),
    Function::new("log", f64::log10, AngleUse::None),
    Function::new("abs", f64::abs, AngleUse::None),
    Function::new("exp", f64::exp, AngleUse::None),
];

const CONSTANTS: &[(&str, f64)] = &[("pi", consts::PI), ("π", consts::PI), ("e", consts::E)];

fn lookup_function(name: &str) -> Option<Function> {
    FUNCTIONS.iter().find(|f| f.name == name).copied()
}

/// Whether `name` is a callable function.
pub fn is_function(name: &str) -> bool {
    lookup_function(name).is_some()
}

fn lookup_constant(name: &str) -> Option<f64> {
    CONSTANTS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, value)| value)
}

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Negate(Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Call(Function, Box<Expr>),
}

impl Expr {
    /// Evaluate the tree. Every intermediate result must be finite.
    pub fn eval(&self, mode: AngleMode) -> Result<f64, CalcError> {
        let value = match self {
            Expr::Number(v) => *v,
            Expr::Negate(inner) => -inner.eval(mode)?,
            Expr::Binary(op, lhs, rhs) => op.apply(lhs.eval(mode)?, rhs.eval(mode)?),
            Expr::Call(func, arg) => func.call(arg.eval(mode)?, mode),
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(CalcError::NonFinite)
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(v) => write!(f, "{}", v),
            Expr::Negate(inner) => write!(f, "(-{})", inner),
            Expr::Binary(op, lhs, rhs) => write!(f, "({} {} {})", lhs, op.symbol(), rhs),
            Expr::Call(func, arg) => write!(f, "{}({})", func.name, arg),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Op(BinaryOp),
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(v) => write!(f, "{}", v),
            Token::Ident(name) => f.write_str(name),
            Token::Op(op) => write!(f, "{}", op.symbol()),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, CalcError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        let token = match ch {
            c if c.is_whitespace() => {
                i += 1;
                continue;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                let value = text
                    .parse::<f64>()
                    .map_err(|_| CalcError::InvalidNumber(text.clone()))?;
                tokens.push(Token::Number(value));
                continue;
            }
            'π' => Token::Ident("π".to_string()),
            c if c.is_ascii_alphabetic() => {
                let start = i;
                while i < chars.len() && chars[i].is_ascii_alphanumeric() {
                    i += 1;
                }
                tokens.push(Token::Ident(chars[start..i].iter().collect()));
                continue;
            }
            '+' => Token::Op(BinaryOp::Add),
            '-' | '−' => Token::Op(BinaryOp::Sub),
            '*' | '×' => Token::Op(BinaryOp::Mul),
            '/' | '÷' => Token::Op(BinaryOp::Div),
            '^' => Token::Op(BinaryOp::Pow),
            '(' => Token::LParen,
            ')' => Token::RParen,
            _ => return Err(CalcError::UnexpectedChar { ch, position: i }),
        };
        tokens.push(token);
        i += 1;
    }

    Ok(tokens)
}

/// Deepest nesting of parentheses, unary signs, powers and operator chains.
const MAX_DEPTH: usize = 256;

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat_op(&mut self, ops: &[BinaryOp]) -> Option<BinaryOp> {
        match self.peek() {
            Some(Token::Op(op)) if ops.contains(op) => {
                let op = *op;
                self.pos += 1;
                Some(op)
            }
            _ => None,
        }
    }

    fn descend(&mut self) -> Result<(), CalcError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(CalcError::TooDeep(MAX_DEPTH));
        }
        Ok(())
    }

    fn ascend(&mut self, levels: usize) {
        self.depth -= levels;
    }

    fn expect_rparen(&mut self) -> Result<(), CalcError> {
        match self.advance() {
            Some(Token::RParen) => Ok(()),
            Some(other) => Err(CalcError::UnexpectedToken(other.to_string())),
            None => Err(CalcError::UnexpectedEnd),
        }
    }

    fn expr(&mut self) -> Result<Expr, CalcError> {
        let mut lhs = self.term()?;
        let mut chain = 0;
        while let Some(op) = self.eat_op(&[BinaryOp::Add, BinaryOp::Sub]) {
            self.descend()?;
            chain += 1;
            let rhs = self.term()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        self.ascend(chain);
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, CalcError> {
        let mut lhs = self.unary()?;
        let mut chain = 0;
        while let Some(op) = self.eat_op(&[BinaryOp::Mul, BinaryOp::Div]) {
            self.descend()?;
            chain += 1;
            let rhs = self.unary()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        self.ascend(chain);
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, CalcError> {
        let Some(op) = self.eat_op(&[BinaryOp::Add, BinaryOp::Sub]) else {
            return self.power();
        };
        self.descend()?;
        let operand = self.unary()?;
        self.ascend(1);
        if op == BinaryOp::Sub {
            Ok(Expr::Negate(Box::new(operand)))
        } else {
            Ok(operand)
        }
    }

    fn power(&mut self) -> Result<Expr, CalcError> {
        let base = self.primary()?;
        if self.eat_op(&[BinaryOp::Pow]).is_some() {
            self.descend()?;
            let exponent = self.unary()?;
            self.ascend(1);
            return Ok(Expr::Binary(BinaryOp::Pow, Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, CalcError> {
        match self.advance() {
            Some(Token::Number(v)) => Ok(Expr::Number(v)),
            Some(Token::LParen) => {
                self.descend()?;
                let inner = self.expr()?;
                self.expect_rparen()?;
                self.ascend(1);
                Ok(inner)
            }
            Some(Token::Ident(name)) => {
                if let Some(func) = lookup_function(&name) {
                    if self.peek() != Some(&Token::LParen) {
                        return Err(CalcError::MissingArgument(name));
                    }
                    self.pos += 1;
                    self.descend()?;
                    let arg = self.expr()?;
                    self.expect_rparen()?;
                    self.ascend(1);
                    Ok(Expr::Call(func, Box::new(arg)))
                } else if let Some(value) = lookup_constant(&name) {
                    Ok(Expr::Number(value))
                } else {
                    Err(CalcError::UnknownIdentifier(name))
                }
            }
            Some(other) => Err(CalcError::UnexpectedToken(other.to_string())),
            None => Err(CalcError::UnexpectedEnd),
        }
    }
}

/// Parse an expression into a tree.
pub fn parse(input: &str) -> Result<Expr, CalcError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(CalcError::Empty);
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.expr()?;
    match parser.advance() {
        None => Ok(expr),
        Some(extra) => Err(CalcError::UnexpectedToken(extra.to_string())),
    }
}

/// Evaluate with trigonometry in radians.
pub fn evaluate(input: &str) -> Result<f64, CalcError> {
    evaluate_with(input, AngleMode::Radians)
}

pub fn evaluate_with(input: &str, mode: AngleMode) -> Result<f64, CalcError> {
    parse(input)?.eval(mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(input: &str) -> f64 {
        evaluate(input).unwrap_or_else(|e| panic!("{} failed: {}", input, e))
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("1 + 2 * 3"), 7.0);
        assert_eq!(eval("(1 + 2) * 3"), 9.0);
        assert_eq!(eval("10 - 4 - 3"), 3.0);
        assert_eq!(eval("100 / 10 / 5"), 2.0);
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(eval("2^3^2"), 512.0);
        assert_eq!(eval("-2^2"), -4.0);
        assert_eq!(eval("2^-1"), 0.5);
        assert_eq!(eval("(-2)^2"), 4.0);
    }

    #[test]
    fn test_nesting_limit() {
        let deep_parens = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
        assert_eq!(evaluate(&deep_parens), Err(CalcError::TooDeep(MAX_DEPTH)));

        let deep_signs = format!("{}1", "-".repeat(10_000));
        assert_eq!(evaluate(&deep_signs), Err(CalcError::TooDeep(MAX_DEPTH)));

        let long_sum = vec!["1"; 10_000].join("+");
        assert_eq!(evaluate(&long_sum), Err(CalcError::TooDeep(MAX_DEPTH)));

        let nested_calls = format!("{}0{}", "abs(".repeat(10_000), ")".repeat(10_000));
        assert_eq!(evaluate(&nested_calls), Err(CalcError::TooDeep(MAX_DEPTH)));
    }

    #[test]
    fn test_nesting_within_limit() {
        let parens = format!("{}2{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(eval(&parens), 2.0);
        assert_eq!(eval(&vec!["1"; 200].join("+")), 200.0);
        assert_eq!(eval(&format!("{}5", "-".repeat(100))), 5.0);
    }

    #[test]
    fn test_unary() {
        assert_eq!(eval("--3"), 3.0);
        assert_eq!(eval("+4"), 4.0);
        assert_eq!(eval("2*-3"), -6.0);
    }

    #[test]
    fn test_display_glyphs() {
        assert_eq!(eval("6 × 7"), 42.0);
        assert_eq!(eval("9 ÷ 3"), 3.0);
        assert_eq!(eval("5 − 8"), -3.0);
        // No implicit multiplication
        assert!(evaluate("2π").is_err());
        assert!(approx(eval("2 × π"), 2.0 * consts::PI));
    }

    #[test]
    fn test_constants_and_functions() {
        assert!(approx(eval("pi"), consts::PI));
        assert!(approx(eval("e"), consts::E));
        assert!(approx(eval("sqrt(16)"), 4.0));
        assert!(approx(eval("cbrt(27)"), 3.0));
        assert!(approx(eval("log(1000)"), 3.0));
        assert!(approx(eval("ln(e)"), 1.0));
        assert!(approx(eval("abs(-2.5)"), 2.5));
        assert!(approx(eval("exp(0)"), 1.0));
        assert!(approx(eval("sin(pi / 2)"), 1.0));
    }

    #[test]
    fn test_degrees_mode() {
        let sin = evaluate_with("sin(30)", AngleMode::Degrees).unwrap_or_default();
        assert!(approx(sin, 0.5));
        let atan = evaluate_with("atan(1)", AngleMode::Degrees).unwrap_or_default();
        assert!(approx(atan, 45.0));
        // Non-trig functions ignore the mode
        let root = evaluate_with("sqrt(9)", AngleMode::Degrees).unwrap_or_default();
        assert!(approx(root, 3.0));
    }

    #[test]
    fn test_non_finite_is_error() {
        assert_eq!(evaluate("1 / 0"), Err(CalcError::NonFinite));
        assert_eq!(evaluate("0 / 0"), Err(CalcError::NonFinite));
        assert_eq!(evaluate("sqrt(-1)"), Err(CalcError::NonFinite));
        assert_eq!(evaluate("1 / (1 / 0)"), Err(CalcError::NonFinite));
    }

    #[test]
    fn test_syntax_errors() {
        assert_eq!(evaluate(""), Err(CalcError::Empty));
        assert_eq!(evaluate("   "), Err(CalcError::Empty));
        assert_eq!(evaluate("1 +"), Err(CalcError::UnexpectedEnd));
        assert_eq!(evaluate("(1 + 2"), Err(CalcError::UnexpectedEnd));
        assert_eq!(
            evaluate("1 + 2)"),
            Err(CalcError::UnexpectedToken(")".to_string()))
        );
        assert_eq!(
            evaluate("1.2.3"),
            Err(CalcError::InvalidNumber("1.2.3".to_string()))
        );
        assert_eq!(
            evaluate("foo(1)"),
            Err(CalcError::UnknownIdentifier("foo".to_string()))
        );
        assert_eq!(
            evaluate("sqrt 4"),
            Err(CalcError::MissingArgument("sqrt".to_string()))
        );
        assert_eq!(
            evaluate("2 $ 3"),
            Err(CalcError::UnexpectedChar { ch: '$', position: 2 })
        );
    }

    #[test]
    fn test_parse_tree_display() {
        let tree = parse("1 + 2 * -x").map(|e| e.to_string());
        assert_eq!(tree, Err(CalcError::UnknownIdentifier("x".to_string())));
        let tree = parse("1 + 2 * -3").map(|e| e.to_string());
        assert_eq!(tree, Ok("(1 + (2 * (-3)))".to_string()));
    }
}
