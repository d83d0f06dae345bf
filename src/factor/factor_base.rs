// src/factor/factor_base.rs

use crate::core::cancellation_token::CancellationToken;
use crate::error::GnfsResult;
use crate::factor::factor_pair::FactorPair;
use crate::polynomial::polynomial::Polynomial;
use num::{BigInt, Zero};

/// Bounds and built pairs for the three factor bases, grounded on the
/// teacher's `FactorBase` aggregate.
#[derive(Debug, Clone, Default)]
pub struct FactorBase {
    pub rational_factor_base_max: BigInt,
    pub algebraic_factor_base_max: BigInt,
    pub quadratic_factor_base_min: BigInt,
    pub quadratic_factor_base_max: BigInt,
    pub quadratic_base_count: usize,

    pub rational_factor_base: Vec<BigInt>,
    pub algebraic_factor_base: Vec<BigInt>,
    pub quadratic_factor_base: Vec<BigInt>,
}

pub struct Factory;

impl Factory {
    /// (p, m mod p) for each prime p in the rational factor base.
    pub fn build_rational_factor_pair_collection(primes: &[BigInt], m: &BigInt) -> Vec<FactorPair> {
        primes.iter().map(|p| FactorPair::new(p.clone(), m.mod_floor_nonneg(p))).collect()
    }

    /// (p, r) with p in the algebraic factor base and f(r) == 0 (mod p),
    /// 0 <= r < p. Polled against `cancel` between primes.
    pub fn build_algebraic_factor_pair_collection(
        poly: &Polynomial,
        primes: &[BigInt],
        cancel: &CancellationToken,
    ) -> GnfsResult<Vec<FactorPair>> {
        let mut result = Vec::new();
        for p in primes {
            if cancel.is_cancelled() {
                break;
            }
            for r in Self::roots_mod(poly, p) {
                result.push(FactorPair::new(p.clone(), r));
            }
        }
        Ok(result)
    }

    /// Ascending from Q_min, collecting all roots per prime until the
    /// running total reaches `quadratic_base_count`.
    pub fn build_quadratic_factor_pair_collection(
        poly: &Polynomial,
        ascending_primes_from_min: &[BigInt],
        quadratic_base_count: usize,
        cancel: &CancellationToken,
    ) -> GnfsResult<Vec<FactorPair>> {
        let mut result = Vec::new();
        for p in ascending_primes_from_min {
            if cancel.is_cancelled() || result.len() >= quadratic_base_count {
                break;
            }
            for r in Self::roots_mod(poly, p) {
                result.push(FactorPair::new(p.clone(), r));
                if result.len() >= quadratic_base_count {
                    break;
                }
            }
        }
        Ok(result)
    }

    /// All r in [0, p) with f(r) == 0 (mod p).
    fn roots_mod(poly: &Polynomial, p: &BigInt) -> Vec<BigInt> {
        let mut roots = Vec::new();
        let mut r = BigInt::zero();
        while &r < p {
            if (poly.evaluate(&r) % p) == BigInt::zero() {
                roots.push(r.clone());
            }
            r += 1;
        }
        roots
    }
}

trait NonNegativeMod {
    fn mod_floor_nonneg(&self, modulus: &BigInt) -> BigInt;
}

impl NonNegativeMod for BigInt {
    fn mod_floor_nonneg(&self, modulus: &BigInt) -> BigInt {
        let r = self % modulus;
        if r < BigInt::zero() { r + modulus } else { r }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(coeffs: &[i64]) -> Polynomial {
        Polynomial::new(coeffs.iter().map(|&c| BigInt::from(c)).collect())
    }

    #[test]
    fn rational_pairs_hold_m_mod_p() {
        let primes = vec![BigInt::from(2), BigInt::from(3), BigInt::from(5)];
        let pairs = Factory::build_rational_factor_pair_collection(&primes, &BigInt::from(7));
        assert_eq!(pairs[0].r, BigInt::from(1)); // 7 mod 2
        assert_eq!(pairs[1].r, BigInt::from(1)); // 7 mod 3
        assert_eq!(pairs[2].r, BigInt::from(2)); // 7 mod 5
    }

    #[test]
    fn algebraic_pairs_satisfy_f_of_r_congruence() {
        // f(x) = x^2 + 1
        let f = poly(&[1, 0, 1]);
        let primes = vec![BigInt::from(2), BigInt::from(5)];
        let cancel = CancellationToken::new();
        let pairs = Factory::build_algebraic_factor_pair_collection(&f, &primes, &cancel).unwrap();
        for pair in &pairs {
            let evaluated = f.evaluate(&pair.r);
            assert_eq!(&evaluated % &pair.p, BigInt::zero());
        }
        // 5 has roots r=2 (4+1=5) and r=3 (9+1=10)
        assert!(pairs.iter().any(|p| p.p == BigInt::from(5) && p.r == BigInt::from(2)));
        assert!(pairs.iter().any(|p| p.p == BigInt::from(5) && p.r == BigInt::from(3)));
    }

    #[test]
    fn quadratic_collection_stops_at_requested_count() {
        let f = poly(&[1, 0, 1]);
        let primes: Vec<BigInt> = (2..50).map(BigInt::from).collect();
        let cancel = CancellationToken::new();
        let pairs = Factory::build_quadratic_factor_pair_collection(&f, &primes, 3, &cancel).unwrap();
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    fn cancellation_stops_algebraic_construction_early() {
        let f = poly(&[1, 0, 1]);
        let primes: Vec<BigInt> = (2..5000).map(BigInt::from).collect();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let pairs = Factory::build_algebraic_factor_pair_collection(&f, &primes, &cancel).unwrap();
        assert!(pairs.is_empty());
    }
}
