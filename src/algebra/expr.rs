//! expr.rs
//! The opaque symbolic value the gain engine computes with: an exact
//! rational function in named variables.
//!
//! Fractions are never reduced to lowest terms — reduction would need
//! multivariate GCDs and buys nothing, because equality compares by
//! cross-multiplication, which is exact on unreduced representatives.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_rational::BigRational;
use thiserror::Error;

use super::poly::Poly;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlgebraError {
    #[error("division by the zero expression")]
    DivisionByZero,
}

/// A rational function `num / den`.
///
/// Invariant: `den` is never the zero polynomial. Every constructor
/// starts from a denominator of one, and the arithmetic below only ever
/// multiplies denominators (the product of nonzero polynomials over the
/// rationals is nonzero).
#[derive(Debug, Clone)]
pub struct Expr {
    num: Poly,
    den: Poly,
}

impl Expr {
    pub fn zero() -> Self {
        Self { num: Poly::zero(), den: Poly::one() }
    }

    pub fn one() -> Self {
        Self { num: Poly::one(), den: Poly::one() }
    }

    pub fn from_int(value: i64) -> Self {
        Self::constant(BigRational::from_integer(BigInt::from(value)))
    }

    pub fn constant(value: BigRational) -> Self {
        Self { num: Poly::constant(value), den: Poly::one() }
    }

    pub fn var(name: &str) -> Self {
        Self { num: Poly::var(name), den: Poly::one() }
    }

    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    pub fn pow(&self, exp: u32) -> Self {
        Self { num: self.num.pow(exp), den: self.den.pow(exp) }
    }

    /// Exact division. Fails when the divisor is the zero expression;
    /// callers decide whether that is a caller error or a degenerate
    /// input (a graph with determinant zero, for instance).
    pub fn try_div(&self, divisor: &Expr) -> Result<Expr, AlgebraError> {
        if divisor.num.is_zero() {
            return Err(AlgebraError::DivisionByZero);
        }
        Ok(Expr {
            num: self.num.mul(&divisor.den),
            den: self.den.mul(&divisor.num),
        })
    }
}

impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        // Structurally identical denominators keep the common denominator
        // instead of squaring it; sums of cofactor terms hit this a lot.
        if self.den == rhs.den {
            return Expr { num: self.num.add(&rhs.num), den: self.den };
        }
        Expr {
            num: self.num.mul(&rhs.den).add(&rhs.num.mul(&self.den)),
            den: self.den.mul(&rhs.den),
        }
    }
}

impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        self + (-rhs)
    }
}

impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        Expr {
            num: self.num.mul(&rhs.num),
            den: self.den.mul(&rhs.den),
        }
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr { num: self.num.neg(), den: self.den }
    }
}

/// Semantic equality: `a/b == c/d` iff `a*d == c*b` as canonical
/// polynomials. Holds across unreduced representatives of the same
/// rational function.
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.num.mul(&other.den) == other.num.mul(&self.den)
    }
}

impl Eq for Expr {}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den.is_one() {
            write!(f, "{}", self.num)
        } else {
            write!(f, "({}) / ({})", self.num, self.den)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_identities() {
        let a = Expr::var("a");
        assert_eq!(a.clone() + Expr::zero(), a);
        assert_eq!(a.clone() * Expr::one(), a);
        assert_eq!(a.clone() - a.clone(), Expr::zero());
        assert!((a.clone() - a).is_zero());
    }

    #[test]
    fn test_equality_ignores_common_factors() {
        // (a*b)/b and a are the same rational function even though the
        // left side is not reduced.
        let ab_over_b = (Expr::var("a") * Expr::var("b"))
            .try_div(&Expr::var("b"))
            .unwrap();
        assert_eq!(ab_over_b, Expr::var("a"));
    }

    #[test]
    fn test_sum_of_fractions() {
        // 1/a + 1/b == (a + b)/(a*b)
        let lhs = Expr::one().try_div(&Expr::var("a")).unwrap()
            + Expr::one().try_div(&Expr::var("b")).unwrap();
        let rhs = (Expr::var("a") + Expr::var("b"))
            .try_div(&(Expr::var("a") * Expr::var("b")))
            .unwrap();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_division_by_zero_expression() {
        let zero = Expr::var("a") - Expr::var("a");
        assert_eq!(
            Expr::one().try_div(&zero),
            Err(AlgebraError::DivisionByZero)
        );
    }

    #[test]
    fn test_pow() {
        let a = Expr::var("a");
        assert_eq!(a.pow(0), Expr::one());
        assert_eq!(a.pow(3), a.clone() * a.clone() * a);
    }

    #[test]
    fn test_zero_over_anything_is_zero() {
        let q = Expr::zero().try_div(&(Expr::one() - Expr::var("g"))).unwrap();
        assert_eq!(q, Expr::zero());
        assert!(q.is_zero());
    }
}
