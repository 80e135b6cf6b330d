//! parser.rs
//! Grammar for branch-gain expressions.
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := factor (('*' | '/') factor)*
//! factor     := '-' factor | power
//! power      := atom ('^' uint)?
//! atom       := number | ident | '(' expression ')'
//! ```
//!
//! Identifiers admit Unicode letters, digits and `_`, so node and gain
//! names like `φ_ref` or `K_d` work as-is. Numeric literals are integers
//! or decimals, converted exactly (`2.5` becomes `5/2`). There is no
//! implicit multiplication; `2a` is a parse error.

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, digit1, multispace0},
    combinator::{all_consuming, map, opt, recognize},
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};
use num_bigint::BigInt;
use num_rational::BigRational;
use thiserror::Error;

use super::expr::Expr;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed gain expression `{input}`: {reason}")]
pub struct ParseError {
    pub input: String,
    pub reason: String,
}

/// Parses a gain expression into an [`Expr`].
///
/// The whole input must be consumed; trailing garbage is an error.
pub fn parse_expr(input: &str) -> Result<Expr, ParseError> {
    match all_consuming(terminated(expression, multispace0))(input) {
        Ok((_, expr)) => Ok(expr),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(ParseError {
            input: input.to_string(),
            reason: if e.input.is_empty() {
                "unexpected end of input".to_string()
            } else {
                let near: String = e.input.chars().take(16).collect();
                format!("unexpected token near `{}`", near)
            },
        }),
        Err(nom::Err::Incomplete(_)) => Err(ParseError {
            input: input.to_string(),
            reason: "incomplete expression".to_string(),
        }),
    }
}

/// Matches a single punctuation character, skipping leading whitespace.
fn symbol<'a>(c: char) -> impl FnMut(&'a str) -> IResult<&'a str, char> {
    move |input| preceded(multispace0, char(c))(input)
}

fn expression(input: &str) -> IResult<&str, Expr> {
    let (mut input, mut acc) = term(input)?;
    loop {
        let (rest, op) = opt(alt((symbol('+'), symbol('-'))))(input)?;
        match op {
            None => return Ok((input, acc)),
            Some(op) => {
                let (rest, rhs) = term(rest)?;
                acc = if op == '+' { acc + rhs } else { acc - rhs };
                input = rest;
            }
        }
    }
}

fn term(input: &str) -> IResult<&str, Expr> {
    let (mut input, mut acc) = factor(input)?;
    loop {
        let (rest, op) = opt(alt((symbol('*'), symbol('/'))))(input)?;
        match op {
            None => return Ok((input, acc)),
            Some(op) => {
                let (rest, rhs) = factor(rest)?;
                if op == '*' {
                    acc = acc * rhs;
                } else {
                    acc = match acc.try_div(&rhs) {
                        Ok(quotient) => quotient,
                        // Division by a literal zero is malformed input,
                        // not a recoverable alternative.
                        Err(_) => {
                            return Err(nom::Err::Failure(nom::error::Error::new(
                                rest,
                                nom::error::ErrorKind::Verify,
                            )))
                        }
                    };
                }
                input = rest;
            }
        }
    }
}

fn factor(input: &str) -> IResult<&str, Expr> {
    let (input, minus) = opt(symbol('-'))(input)?;
    match minus {
        Some(_) => {
            let (input, value) = factor(input)?;
            Ok((input, -value))
        }
        None => power(input),
    }
}

fn power(input: &str) -> IResult<&str, Expr> {
    let (input, base) = atom(input)?;
    let (input, exponent) = opt(preceded(symbol('^'), preceded(multispace0, digit1)))(input)?;
    match exponent {
        None => Ok((input, base)),
        Some(digits) => match digits.parse::<u32>() {
            Ok(exp) => Ok((input, base.pow(exp))),
            Err(_) => Err(nom::Err::Failure(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Digit,
            ))),
        },
    }
}

fn atom(input: &str) -> IResult<&str, Expr> {
    preceded(multispace0, alt((parens, number, variable)))(input)
}

fn parens(input: &str) -> IResult<&str, Expr> {
    delimited(char('('), expression, symbol(')'))(input)
}

/// Identifier: starts with a letter or underscore, continues with
/// letters, digits, or underscores.
fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_alphabetic() || c == '_'),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    ))(input)
}

fn variable(input: &str) -> IResult<&str, Expr> {
    map(identifier, Expr::var)(input)
}

/// Integer or decimal literal, converted exactly to a rational.
fn number(input: &str) -> IResult<&str, Expr> {
    let (rest, literal) = recognize(pair(digit1, opt(pair(char('.'), digit1))))(input)?;
    let value = match literal.split_once('.') {
        None => BigRational::from_integer(digits_to_bigint(literal)),
        Some((int_part, frac_part)) => {
            let scale = (0..frac_part.len()).fold(BigInt::from(1), |acc, _| acc * 10);
            let mut digits = String::with_capacity(int_part.len() + frac_part.len());
            digits.push_str(int_part);
            digits.push_str(frac_part);
            BigRational::new(digits_to_bigint(&digits), scale)
        }
    };
    Ok((rest, Expr::constant(value)))
}

fn digits_to_bigint(digits: &str) -> BigInt {
    digits
        .bytes()
        .fold(BigInt::from(0), |acc, b| acc * 10 + i32::from(b - b'0'))
}
