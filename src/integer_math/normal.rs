// src/integer_math/normal.rs

use crate::error::{GnfsError, GnfsResult};
use crate::polynomial::polynomial::Polynomial;
use num::{BigInt, BigRational, Zero};

pub struct Normal;

impl Normal {
    /// a + b*m
    pub fn rational(a: &BigInt, b: &BigInt, polynomial_base: &BigInt) -> BigInt {
        a + b * polynomial_base
    }

    /// a - b*m
    pub fn rational_subtract(a: &BigInt, b: &BigInt, polynomial_base: &BigInt) -> BigInt {
        a - b * polynomial_base
    }

    /// The algebraic norm of (a, b) against `poly`: f(-a/b) * (-b)^deg,
    /// which is always an integer when f has integer coefficients. Returns
    /// `InternalInvariantViolation` if the evaluated value is not integral,
    /// since that means the caller passed a malformed polynomial or pair.
    pub fn algebraic(a: &BigInt, b: &BigInt, poly: &Polynomial) -> GnfsResult<BigInt> {
        if b.is_zero() {
            return Err(GnfsError::InvalidInput("algebraic norm requires b != 0".to_string()));
        }

        let indeterminate = -BigRational::from(a.clone()) / BigRational::from(b.clone());
        let evaluated = poly.evaluate_rational(&indeterminate);
        let scale = BigRational::from((-b).pow(poly.degree() as u32));
        let product = scale * evaluated;

        if !product.is_integer() {
            return Err(GnfsError::InternalInvariantViolation(format!(
                "algebraic norm for a={}, b={} did not evaluate to an integer: {}",
                a, b, product
            )));
        }
        Ok(product.to_integer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(coeffs: &[i64]) -> Polynomial {
        Polynomial::new(coeffs.iter().map(|&c| BigInt::from(c)).collect())
    }

    #[test]
    fn rational_norm_matches_definition() {
        let (a, b, m) = (BigInt::from(3), BigInt::from(2), BigInt::from(7));
        assert_eq!(Normal::rational(&a, &b, &m), BigInt::from(17));
        assert_eq!(Normal::rational_subtract(&a, &b, &m), BigInt::from(-11));
    }

    #[test]
    fn algebraic_norm_is_integral_for_a_simple_polynomial() {
        // f(x) = x^2 + 1
        let f = poly(&[1, 0, 1]);
        let norm = Normal::algebraic(&BigInt::from(3), &BigInt::from(1), &f).unwrap();
        // f(-3/1) * (-1)^2 = (9 + 1) * 1 = 10
        assert_eq!(norm, BigInt::from(10));
    }

    #[test]
    fn algebraic_norm_rejects_zero_b() {
        let f = poly(&[1, 0, 1]);
        assert!(matches!(
            Normal::algebraic(&BigInt::from(3), &BigInt::from(0), &f),
            Err(GnfsError::InvalidInput(_))
        ));
    }
}
