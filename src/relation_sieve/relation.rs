// src/relation_sieve/relation.rs

use crate::core::count_dictionary::CountDictionary;
use crate::error::{GnfsError, GnfsResult};
use crate::integer_math::normal::Normal;
use crate::polynomial::polynomial::Polynomial;
use num::{BigInt, One, Signed, Zero};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relation {
    #[serde(rename = "A")]
    pub a: BigInt,
    #[serde(rename = "B")]
    pub b: BigInt,
    #[serde(rename = "AlgebraicNorm")]
    pub algebraic_norm: BigInt,
    #[serde(rename = "RationalNorm")]
    pub rational_norm: BigInt,
    #[serde(rename = "AlgebraicQuotient")]
    pub algebraic_quotient: BigInt,
    #[serde(rename = "RationalQuotient")]
    pub rational_quotient: BigInt,
    #[serde(rename = "AlgebraicFactorization")]
    pub algebraic_factorization: CountDictionary,
    #[serde(rename = "RationalFactorization")]
    pub rational_factorization: CountDictionary,
}

impl Relation {
    /// Computes both norms for (a, b) against the polynomial/base pair.
    /// Quotients start at |norm| with the sign recorded as a synthetic -1
    /// factor; `sieve` then trial-divides the quotients down.
    pub fn new(a: &BigInt, b: &BigInt, poly: &Polynomial, m: &BigInt) -> GnfsResult<Self> {
        if b.is_zero() {
            return Err(GnfsError::InvalidInput("relation requires b != 0".to_string()));
        }

        let rational_norm = Normal::rational(a, b, m);
        let algebraic_norm = crate::integer_math::normal::Normal::algebraic(a, b, poly)?;

        let mut rational_factorization = CountDictionary::new();
        let mut algebraic_factorization = CountDictionary::new();

        let rational_quotient = rational_norm.abs();
        if rational_norm.is_negative() {
            rational_factorization.add(&BigInt::from(-1));
        }

        let algebraic_quotient = algebraic_norm.abs();
        if algebraic_norm.is_negative() {
            algebraic_factorization.add(&BigInt::from(-1));
        }

        Ok(Relation {
            a: a.clone(),
            b: b.clone(),
            algebraic_norm,
            rational_norm,
            algebraic_quotient,
            rational_quotient,
            algebraic_factorization,
            rational_factorization,
        })
    }

    /// Trial-divides the quotients against the rational and (short-circuit)
    /// algebraic factor bases, per the trial-division primitive.
    pub fn sieve(&mut self, rational_base: &[BigInt], algebraic_base: &[BigInt]) -> GnfsResult<()> {
        trial_divide(&mut self.rational_quotient, rational_base, &mut self.rational_factorization)?;
        if self.rational_quotient == BigInt::one() {
            trial_divide(&mut self.algebraic_quotient, algebraic_base, &mut self.algebraic_factorization)?;
        }
        Ok(())
    }

    pub fn is_smooth(&self) -> bool {
        self.is_rational_quotient_smooth() && self.is_algebraic_quotient_smooth()
    }

    pub fn is_rational_quotient_smooth(&self) -> bool {
        self.rational_quotient == BigInt::one() || self.rational_quotient.is_zero()
    }

    pub fn is_algebraic_quotient_smooth(&self) -> bool {
        self.algebraic_quotient == BigInt::one() || self.algebraic_quotient.is_zero()
    }
}

/// Given an ordered sequence of primes and a nonnegative quotient, strikes
/// factors from `q` into `factorization` until q=1 or no more primes in the
/// base can divide it.
pub fn trial_divide(q: &mut BigInt, primes: &[BigInt], factorization: &mut CountDictionary) -> GnfsResult<()> {
    if q.is_negative() {
        return Err(GnfsError::InternalInvariantViolation(format!(
            "trial division requires a nonnegative quotient, got {}",
            q
        )));
    }

    for p in primes {
        if p.is_negative() {
            return Err(GnfsError::InternalInvariantViolation(format!(
                "trial division requires nonnegative primes, got {}",
                p
            )));
        }
        if q.is_one() {
            break;
        }
        if &(p * p) > q {
            if q != &BigInt::zero() && primes.binary_search(q).is_ok() {
                factorization.add(q);
                *q = BigInt::one();
            }
            break;
        }
        while (&*q % p).is_zero() {
            factorization.add(p);
            *q /= p;
        }
    }
    Ok(())
}

impl PartialEq for Relation {
    fn eq(&self, other: &Self) -> bool {
        self.a == other.a && self.b == other.b
    }
}

impl Eq for Relation {}

impl Hash for Relation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.a.hash(state);
        self.b.hash(state);
    }
}

impl PartialOrd for Relation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Relation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.a.cmp(&other.a).then(self.b.cmp(&other.b))
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Relation {{ a: {}, b: {}, algebraic_norm: {}, rational_norm: {} }}",
            self.a, self.b, self.algebraic_norm, self.rational_norm
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(coeffs: &[i64]) -> Polynomial {
        Polynomial::new(coeffs.iter().map(|&c| BigInt::from(c)).collect())
    }

    #[test]
    fn trial_divide_reduces_fully_smooth_quotient() {
        let mut q = BigInt::from(60);
        let primes: Vec<BigInt> = vec![2, 3, 5].into_iter().map(BigInt::from).collect();
        let mut factorization = CountDictionary::new();
        trial_divide(&mut q, &primes, &mut factorization).unwrap();
        assert_eq!(q, BigInt::one());
        assert_eq!(factorization.get(&BigInt::from(2)), Some(&BigInt::from(2)));
        assert_eq!(factorization.get(&BigInt::from(3)), Some(&BigInt::from(1)));
        assert_eq!(factorization.get(&BigInt::from(5)), Some(&BigInt::from(1)));
    }

    #[test]
    fn trial_divide_accepts_the_leftover_prime_itself() {
        // 14 = 2 * 7, base is [2,3,5,7]; once p^2 > q (9 > 7) and q==7 is in the base.
        let mut q = BigInt::from(14);
        let primes: Vec<BigInt> = vec![2, 3, 5, 7].into_iter().map(BigInt::from).collect();
        let mut factorization = CountDictionary::new();
        trial_divide(&mut q, &primes, &mut factorization).unwrap();
        assert_eq!(q, BigInt::one());
        assert_eq!(factorization.get(&BigInt::from(7)), Some(&BigInt::from(1)));
    }

    #[test]
    fn trial_divide_leaves_rough_quotient_when_above_base() {
        // 221 = 13 * 17, neither in [2,3,5,7]; p^2 > q happens at p=7, q stays 221.
        let mut q = BigInt::from(221);
        let primes: Vec<BigInt> = vec![2, 3, 5, 7].into_iter().map(BigInt::from).collect();
        let mut factorization = CountDictionary::new();
        trial_divide(&mut q, &primes, &mut factorization).unwrap();
        assert_eq!(q, BigInt::from(221));
    }

    #[test]
    fn negative_quotient_is_an_internal_invariant_violation() {
        let mut q = BigInt::from(-5);
        let primes: Vec<BigInt> = vec![2, 3].into_iter().map(BigInt::from).collect();
        let mut factorization = CountDictionary::new();
        assert!(matches!(
            trial_divide(&mut q, &primes, &mut factorization),
            Err(GnfsError::InternalInvariantViolation(_))
        ));
    }

    #[test]
    fn relation_norms_match_definitions() {
        // f(x) = x^2 + 1, m = 3, a = 2, b = 1
        let f = poly(&[1, 0, 1]);
        let rel = Relation::new(&BigInt::from(2), &BigInt::from(1), &f, &BigInt::from(3)).unwrap();
        assert_eq!(rel.rational_norm, BigInt::from(5)); // 2 + 1*3
        assert_eq!(rel.algebraic_norm, BigInt::from(5)); // f(-2/1) * (-1)^2 = 4+1
    }

    #[test]
    fn fully_sieved_relation_can_be_smooth() {
        let f = poly(&[1, 0, 1]);
        let mut rel = Relation::new(&BigInt::from(2), &BigInt::from(1), &f, &BigInt::from(3)).unwrap();
        let rational_base: Vec<BigInt> = vec![5].into_iter().map(BigInt::from).collect();
        let algebraic_base: Vec<BigInt> = vec![5].into_iter().map(BigInt::from).collect();
        rel.sieve(&rational_base, &algebraic_base).unwrap();
        assert!(rel.is_smooth());
    }
}
