// src/integer_math/miller_rabin.rs

use num::{BigInt, One, Zero};

/// Deterministic Miller-Rabin primality test with a fixed witness set,
/// correct for all n < 3,317,044,064,679,887,385,961,981 (roughly 3*10^30),
/// comfortably covering the spec's 3*10^10 requirement.
pub struct MillerRabin;

const WITNESSES: [i64; 15] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47];

impl MillerRabin {
    pub fn is_probable_prime(n: &BigInt) -> bool {
        if n == &BigInt::from(2) || n == &BigInt::from(3) {
            return true;
        }
        if n < &BigInt::from(2) || (n % 2) == BigInt::zero() {
            return false;
        }

        let (s, d) = Self::factor_out_twos(n - 1);

        for &a in WITNESSES.iter() {
            let base = BigInt::from(a);
            if &base >= n {
                continue;
            }
            if !Self::passes_witness(&base, &d, s, n) {
                return false;
            }
        }
        true
    }

    fn factor_out_twos(mut value: BigInt) -> (u32, BigInt) {
        let mut s = 0u32;
        while (&value % 2) == BigInt::zero() {
            value /= 2;
            s += 1;
        }
        (s, value)
    }

    fn passes_witness(a: &BigInt, d: &BigInt, s: u32, n: &BigInt) -> bool {
        let n_minus_one = n - 1;
        let mut x = a.modpow(d, n);
        if x == BigInt::one() || x == n_minus_one {
            return true;
        }

        for _ in 1..s {
            x = x.modpow(&BigInt::from(2), n);
            if x == BigInt::one() {
                return false;
            }
            if x == n_minus_one {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carmichael_number_is_rejected() {
        assert!(!MillerRabin::is_probable_prime(&BigInt::from(561)));
    }

    #[test]
    fn mersenne_prime_is_accepted() {
        let p = BigInt::from(2).pow(61) - 1;
        assert!(MillerRabin::is_probable_prime(&p));
    }

    #[test]
    fn spot_values_around_a_billion() {
        assert!(MillerRabin::is_probable_prime(&(BigInt::from(1_000_000_000i64) + 7)));
        assert!(MillerRabin::is_probable_prime(&(BigInt::from(1_000_000_000i64) + 9)));
        assert!(!MillerRabin::is_probable_prime(&(BigInt::from(1_000_000_000i64) + 8)));
    }

    #[test]
    fn even_numbers_above_two_are_composite() {
        for n in (4..40).step_by(2) {
            assert!(!MillerRabin::is_probable_prime(&BigInt::from(n)));
        }
    }

    #[test]
    fn small_primes_and_composites() {
        let primes = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29];
        let composites = [4, 6, 8, 9, 10, 12, 15, 21, 25, 27];
        for p in primes {
            assert!(MillerRabin::is_probable_prime(&BigInt::from(p)), "{} should be prime", p);
        }
        for c in composites {
            assert!(!MillerRabin::is_probable_prime(&BigInt::from(c)), "{} should be composite", c);
        }
    }
}
