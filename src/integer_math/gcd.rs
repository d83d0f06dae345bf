// src/integer_math/gcd.rs

use num::{BigInt, Integer, Signed};

pub struct GCD;

impl GCD {
    pub fn find_lcm(numbers: &[BigInt]) -> BigInt {
        numbers
            .iter()
            .fold(BigInt::from(1), |acc, x| Self::find_lcm_pair(&acc, x))
    }

    pub fn find_lcm_pair(left: &BigInt, right: &BigInt) -> BigInt {
        let abs_left = left.abs();
        let abs_right = right.abs();
        if abs_left.is_zero() || abs_right.is_zero() {
            return BigInt::from(0);
        }
        &(&abs_left * &abs_right) / Self::find_gcd_pair(&abs_left, &abs_right)
    }

    pub fn find_gcd(numbers: &[BigInt]) -> BigInt {
        numbers
            .iter()
            .fold(BigInt::from(0), |acc, x| Self::find_gcd_pair(&acc, x))
    }

    pub fn find_gcd_pair(left: &BigInt, right: &BigInt) -> BigInt {
        left.gcd(right)
    }

    pub fn are_coprime(numbers: &[BigInt]) -> bool {
        Self::find_gcd(numbers) == BigInt::from(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcd_of_coprime_pair_is_one() {
        assert!(GCD::are_coprime(&[BigInt::from(8), BigInt::from(15)]));
    }

    #[test]
    fn gcd_pair_matches_euclid() {
        assert_eq!(
            GCD::find_gcd_pair(&BigInt::from(54), &BigInt::from(24)),
            BigInt::from(6)
        );
    }

    #[test]
    fn lcm_pair_matches_definition() {
        assert_eq!(
            GCD::find_lcm_pair(&BigInt::from(4), &BigInt::from(6)),
            BigInt::from(12)
        );
    }

    #[test]
    fn negative_inputs_are_handled_via_absolute_value() {
        assert_eq!(
            GCD::find_gcd_pair(&BigInt::from(-12), &BigInt::from(18)),
            BigInt::from(6)
        );
    }
}
