// src/polynomial/polynomial.rs
//
// Dense coefficient-vector representation (coefficients[i] is the
// coefficient of x^i), rather than the teacher's sparse Term list: GNFS
// polynomials are low-degree (2-6) and fully dense once constructed, so a
// Vec<BigInt> indexed by exponent is the simpler and equally idiomatic fit.

use num::{BigInt, BigRational, One, Zero};
use std::ops::{Index, IndexMut};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polynomial {
    coefficients: Vec<BigInt>,
}

impl Polynomial {
    pub fn new(coefficients: Vec<BigInt>) -> Self {
        let mut poly = Polynomial { coefficients };
        poly.trim();
        poly
    }

    pub fn zero() -> Self {
        Polynomial { coefficients: vec![BigInt::zero()] }
    }

    fn trim(&mut self) {
        while self.coefficients.len() > 1 && self.coefficients.last() == Some(&BigInt::zero()) {
            self.coefficients.pop();
        }
        if self.coefficients.is_empty() {
            self.coefficients.push(BigInt::zero());
        }
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    pub fn coefficients(&self) -> &[BigInt] {
        &self.coefficients
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients.len() == 1 && self.coefficients[0].is_zero()
    }

    /// Horner evaluation over the integers.
    pub fn evaluate(&self, x: &BigInt) -> BigInt {
        let mut result = BigInt::zero();
        for coefficient in self.coefficients.iter().rev() {
            result = result * x + coefficient;
        }
        result
    }

    /// Horner evaluation over the rationals, used for algebraic norms where
    /// the indeterminate is a fraction -a/b.
    pub fn evaluate_rational(&self, x: &BigRational) -> BigRational {
        let mut result = BigRational::zero();
        for coefficient in self.coefficients.iter().rev() {
            result = result * x + BigRational::from(coefficient.clone());
        }
        result
    }

    pub fn derivative(&self) -> Polynomial {
        if self.degree() == 0 {
            return Polynomial::zero();
        }
        let coefficients = self.coefficients[1..]
            .iter()
            .enumerate()
            .map(|(i, c)| c * BigInt::from(i as u64 + 1))
            .collect();
        Polynomial::new(coefficients)
    }

    pub fn leading_coefficient(&self) -> &BigInt {
        self.coefficients.last().expect("at least one coefficient")
    }

    /// f(m) == n, the defining property of a base-m polynomial construction.
    pub fn base_matches(&self, m: &BigInt, n: &BigInt) -> bool {
        &self.evaluate(m) == n
    }
}

impl Index<usize> for Polynomial {
    type Output = BigInt;

    fn index(&self, exponent: usize) -> &BigInt {
        self.coefficients.get(exponent).unwrap_or_else(|| {
            panic!("exponent {} out of range for degree {} polynomial", exponent, self.degree())
        })
    }
}

impl IndexMut<usize> for Polynomial {
    fn index_mut(&mut self, exponent: usize) -> &mut BigInt {
        if exponent >= self.coefficients.len() {
            self.coefficients.resize(exponent + 1, BigInt::zero());
        }
        &mut self.coefficients[exponent]
    }
}

impl std::fmt::Display for Polynomial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (exponent, coefficient) in self.coefficients.iter().enumerate().rev() {
            if coefficient.is_zero() {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            match exponent {
                0 => write!(f, "{}", coefficient)?,
                1 => write!(f, "{}*X", coefficient)?,
                _ => write!(f, "{}*X^{}", coefficient, exponent)?,
            }
            first = false;
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}

impl Default for Polynomial {
    fn default() -> Self {
        Self::zero()
    }
}
