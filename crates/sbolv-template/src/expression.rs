//! The restricted arithmetic language used inside template `{...}` regions.
//!
//! Grammar (whitespace-insensitive):
//!
//! ```text
//! expression := additive
//! additive   := multiplicative (('+' | '-') multiplicative)*
//! multiplicative := unary (('*' | '/') unary)*
//! unary      := ('-' | '+') unary | atom
//! atom       := identifier | number | '(' additive ')'
//! ```
//!
//! Identifiers resolve against a [`Parameters`] map and nothing else. There
//! are no function calls, no strings and no control flow.

use std::fmt;

use indexmap::IndexMap;
use winnow::{
    Parser as _,
    ascii::{float, multispace0},
    combinator::{alt, cut_err, delimited, preceded, repeat},
    error::{ContextError, ErrMode, ModalResult},
    token::{one_of, take_while},
};

use crate::error::ExpressionError;

/// Variable bindings for template evaluation, name to value.
pub type Parameters = IndexMap<String, f64>;

/// Most operators and opening parentheses one expression may contain.
///
/// Parsing, evaluation and dropping all recurse over the syntax tree, whose
/// depth is bounded by this count.
pub const MAX_OPERATORS: usize = 256;

type Input<'a> = &'a str;
type IResult<O> = ModalResult<O, ContextError>;

/// A binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    fn from_symbol(symbol: char) -> Self {
        match symbol {
            '+' => Self::Add,
            '-' => Self::Sub,
            '*' => Self::Mul,
            _ => Self::Div,
        }
    }

    fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }
}

/// Expression syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable(String),
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    fn eval(&self, params: &Parameters, source: &str) -> Result<f64, ExpressionError> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Variable(name) => {
                params
                    .get(name)
                    .copied()
                    .ok_or_else(|| ExpressionError::UnknownVariable {
                        name: name.clone(),
                        expression: source.to_string(),
                    })
            }
            Self::Neg(inner) => Ok(-inner.eval(params, source)?),
            Self::Binary { op, lhs, rhs } => {
                let lhs = lhs.eval(params, source)?;
                let rhs = rhs.eval(params, source)?;
                match op {
                    BinaryOp::Add => Ok(lhs + rhs),
                    BinaryOp::Sub => Ok(lhs - rhs),
                    BinaryOp::Mul => Ok(lhs * rhs),
                    BinaryOp::Div if rhs == 0.0 => Err(ExpressionError::DivisionByZero {
                        expression: source.to_string(),
                    }),
                    BinaryOp::Div => Ok(lhs / rhs),
                }
            }
        }
    }

    fn collect_variables<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Number(_) => {}
            Self::Variable(name) => {
                if !out.contains(&name.as_str()) {
                    out.push(name);
                }
            }
            Self::Neg(inner) => inner.collect_variables(out),
            Self::Binary { lhs, rhs, .. } => {
                lhs.collect_variables(out);
                rhs.collect_variables(out);
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Variable(name) => f.write_str(name),
            Self::Neg(inner) => write!(f, "(-{inner})"),
            Self::Binary { op, lhs, rhs } => write!(f, "({lhs} {} {rhs})", op.symbol()),
        }
    }
}

/// A parsed expression together with its source text.
///
/// # Examples
///
/// ```
/// use sbolv_template::{Expression, Parameters};
///
/// let expr = Expression::parse("baseline_y - (height + 2) / 2").unwrap();
///
/// let mut params = Parameters::new();
/// params.insert("baseline_y".to_string(), 0.0);
/// params.insert("height".to_string(), 8.0);
/// assert_eq!(expr.eval(&params).unwrap(), -5.0);
/// assert_eq!(expr.variables(), vec!["baseline_y", "height"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    root: Expr,
}

impl Expression {
    /// Parses an expression. The whole input must be consumed.
    ///
    /// Inputs with more than [`MAX_OPERATORS`] operators and parentheses
    /// are rejected before parsing.
    pub fn parse(source: &str) -> Result<Self, ExpressionError> {
        if operator_count(source) > MAX_OPERATORS {
            return Err(ExpressionError::TooComplex {
                limit: MAX_OPERATORS,
            });
        }
        let root = expression
            .parse(source)
            .map_err(|err| ExpressionError::Syntax {
                expression: source.to_string(),
                offset: err.offset(),
            })?;
        Ok(Self {
            source: source.to_string(),
            root,
        })
    }

    /// The text the expression was parsed from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The syntax tree
    pub fn root(&self) -> &Expr {
        &self.root
    }

    /// Evaluates the expression against `params`.
    ///
    /// Fails on unknown names, division by zero and non-finite results.
    pub fn eval(&self, params: &Parameters) -> Result<f64, ExpressionError> {
        let value = self.root.eval(params, &self.source)?;
        if !value.is_finite() {
            return Err(ExpressionError::NonFinite {
                expression: self.source.clone(),
            });
        }
        Ok(value)
    }

    /// Distinct parameter names referenced, in first-use order
    pub fn variables(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.root.collect_variables(&mut out);
        out
    }
}

/// Counts the characters that add a level to the syntax tree.
fn operator_count(source: &str) -> usize {
    source
        .chars()
        .filter(|c| matches!(c, '(' | '+' | '-' | '*' | '/'))
        .count()
}

/// Skip whitespace around a parser
fn ws<'a, O, P>(parser: P) -> impl winnow::Parser<Input<'a>, O, ErrMode<ContextError>>
where
    P: winnow::Parser<Input<'a>, O, ErrMode<ContextError>>,
{
    delimited(multispace0, parser, multispace0)
}

fn expression(input: &mut Input<'_>) -> IResult<Expr> {
    ws(additive).parse_next(input)
}

fn additive(input: &mut Input<'_>) -> IResult<Expr> {
    let first = multiplicative(input)?;
    let rest: Vec<(char, Expr)> =
        repeat(0.., (ws(one_of(['+', '-'])), multiplicative)).parse_next(input)?;
    Ok(rest.into_iter().fold(first, |lhs, (symbol, rhs)| {
        Expr::binary(BinaryOp::from_symbol(symbol), lhs, rhs)
    }))
}

fn multiplicative(input: &mut Input<'_>) -> IResult<Expr> {
    let first = unary(input)?;
    let rest: Vec<(char, Expr)> = repeat(0.., (ws(one_of(['*', '/'])), unary)).parse_next(input)?;
    Ok(rest.into_iter().fold(first, |lhs, (symbol, rhs)| {
        Expr::binary(BinaryOp::from_symbol(symbol), lhs, rhs)
    }))
}

fn unary(input: &mut Input<'_>) -> IResult<Expr> {
    alt((
        preceded(ws('-'), unary).map(|inner| Expr::Neg(Box::new(inner))),
        preceded(ws('+'), unary),
        atom,
    ))
    .parse_next(input)
}

fn atom(input: &mut Input<'_>) -> IResult<Expr> {
    ws(alt((
        identifier.map(|name: &str| Expr::Variable(name.to_string())),
        float.map(Expr::Number),
        delimited('(', additive, cut_err(ws(')'))),
    )))
    .parse_next(input)
}

/// Parameter name: a letter or underscore followed by letters, digits or
/// underscores. Tried before numbers so that `inf` or `nan` are names, not
/// floats.
fn identifier<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_')
        .verify(|s: &str| s.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_'))
        .parse_next(input)
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    /// A printed number parses back to the same value.
    fn check_number_roundtrip(value: f64) -> Result<(), TestCaseError> {
        let parsed = Expression::parse(&value.to_string()).unwrap();
        prop_assert_eq!(parsed.eval(&Parameters::new()).unwrap(), value);
        Ok(())
    }

    /// Binary expressions agree with native arithmetic.
    fn check_matches_native(a: f64, b: f64, op: char) -> Result<(), TestCaseError> {
        let mut params = Parameters::new();
        params.insert("a".to_string(), a);
        params.insert("b".to_string(), b);
        let expected = match op {
            '+' => a + b,
            '-' => a - b,
            '*' => a * b,
            _ => a / b,
        };
        let actual = Expression::parse(&format!("a {op} b"))
            .unwrap()
            .eval(&params)
            .unwrap();
        prop_assert!(approx_eq!(f64, actual, expected, ulps = 2));
        Ok(())
    }

    proptest! {
        #[test]
        fn number_roundtrip(value in -1.0e6f64..1.0e6) {
            check_number_roundtrip(value)?;
        }

        #[test]
        fn matches_native(
            a in -1000.0f64..1000.0,
            b in prop_oneof![-1000.0f64..-0.5, 0.5f64..1000.0],
            op in prop::sample::select(vec!['+', '-', '*', '/']),
        ) {
            check_matches_native(a, b, op)?;
        }
    }
}
