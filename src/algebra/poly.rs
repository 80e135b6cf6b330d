//! poly.rs
//! Exact multivariate polynomials over arbitrary-precision rationals.
//!
//! Both maps are ordered, so every polynomial has exactly one
//! representation and structural equality is semantic equality. All of
//! the rational-function machinery in [`super::expr`] reduces to the ring
//! operations defined here.

use std::collections::BTreeMap;
use std::fmt;

use num_rational::BigRational;
use num_traits::{One, Zero};

/// A power product of named variables, e.g. `a*b^2`.
///
/// Canonical: variables sorted by name, exponents strictly positive. The
/// empty product is the unit monomial (the constant term's key).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Monomial {
    vars: BTreeMap<String, u32>,
}

impl Monomial {
    pub fn unit() -> Self {
        Self::default()
    }

    pub fn var(name: &str) -> Self {
        let mut vars = BTreeMap::new();
        vars.insert(name.to_string(), 1);
        Self { vars }
    }

    pub fn is_unit(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn mul(&self, other: &Self) -> Self {
        let mut vars = self.vars.clone();
        for (name, exp) in &other.vars {
            *vars.entry(name.clone()).or_insert(0) += exp;
        }
        Self { vars }
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, exp) in &self.vars {
            if !first {
                write!(f, "*")?;
            }
            first = false;
            if *exp == 1 {
                write!(f, "{}", name)?;
            } else {
                write!(f, "{}^{}", name, exp)?;
            }
        }
        Ok(())
    }
}

/// A polynomial in named variables with `BigRational` coefficients.
///
/// Zero coefficients are never stored; the zero polynomial is the empty
/// term map.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Poly {
    terms: BTreeMap<Monomial, BigRational>,
}

impl Poly {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn one() -> Self {
        Self::constant(BigRational::one())
    }

    pub fn constant(value: BigRational) -> Self {
        let mut terms = BTreeMap::new();
        if !value.is_zero() {
            terms.insert(Monomial::unit(), value);
        }
        Self { terms }
    }

    pub fn var(name: &str) -> Self {
        let mut terms = BTreeMap::new();
        terms.insert(Monomial::var(name), BigRational::one());
        Self { terms }
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.terms.len() == 1
            && self
                .terms
                .get(&Monomial::unit())
                .map(|c| c.is_one())
                .unwrap_or(false)
    }

    pub fn add(&self, other: &Self) -> Self {
        let mut terms = self.terms.clone();
        for (monomial, coeff) in &other.terms {
            let entry = terms
                .entry(monomial.clone())
                .or_insert_with(BigRational::zero);
            *entry += coeff;
        }
        terms.retain(|_, coeff| !coeff.is_zero());
        Self { terms }
    }

    pub fn neg(&self) -> Self {
        let terms = self
            .terms
            .iter()
            .map(|(monomial, coeff)| (monomial.clone(), -coeff))
            .collect();
        Self { terms }
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let mut terms: BTreeMap<Monomial, BigRational> = BTreeMap::new();
        for (ma, ca) in &self.terms {
            for (mb, cb) in &other.terms {
                let entry = terms.entry(ma.mul(mb)).or_insert_with(BigRational::zero);
                *entry += ca * cb;
            }
        }
        terms.retain(|_, coeff| !coeff.is_zero());
        Self { terms }
    }

    pub fn pow(&self, exp: u32) -> Self {
        let mut result = Self::one();
        for _ in 0..exp {
            result = result.mul(self);
        }
        result
    }
}

impl fmt::Display for Poly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        let mut first = true;
        for (monomial, coeff) in &self.terms {
            if !first {
                write!(f, " + ")?;
            }
            first = false;
            if monomial.is_unit() {
                write!(f, "{}", coeff)?;
            } else if coeff.is_one() {
                write!(f, "{}", monomial)?;
            } else if (-coeff).is_one() {
                write!(f, "-{}", monomial)?;
            } else {
                write!(f, "{}*{}", coeff, monomial)?;
            }
        }
        Ok(())
    }
}
