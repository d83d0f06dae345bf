// src/integer_math/legendre.rs

use crate::error::{GnfsError, GnfsResult};
use num::{BigInt, Integer, ToPrimitive, Zero};

pub struct Legendre;

impl Legendre {
    /// Legendre symbol (a|p): 1 if a is a nonzero quadratic residue mod p,
    /// -1 if a is a non-residue, 0 if p | a. Recursive definition via
    /// quadratic reciprocity, exactly as specified.
    pub fn symbol(a: &BigInt, p: &BigInt) -> GnfsResult<i32> {
        if p < &BigInt::from(2) {
            return Err(GnfsError::OutOfRange(format!(
                "Legendre modulus 'p' must not be < 2, got {}",
                p
            )));
        }
        Ok(Self::symbol_unchecked(a, p))
    }

    fn symbol_unchecked(a: &BigInt, p: &BigInt) -> i32 {
        if a.is_zero() {
            return 0;
        }
        if a == &BigInt::from(1) {
            return 1;
        }

        if a.mod_floor(&BigInt::from(2)) == BigInt::zero() {
            let result = Self::symbol_unchecked(&(a >> 1), p);
            if ((p * p - 1) & BigInt::from(8)) != BigInt::zero() {
                -result
            } else {
                result
            }
        } else {
            let result = Self::symbol_unchecked(&p.mod_floor(a), a);
            if ((a - 1) * (p - 1) & BigInt::from(4)) != BigInt::zero() {
                -result
            } else {
                result
            }
        }
    }

    /// Smallest r >= start with Symbol(r, modulus) == goal, searched up to
    /// start + modulus + 1.
    pub fn symbol_search(start: &BigInt, modulus: &BigInt, goal: &BigInt) -> GnfsResult<BigInt> {
        if goal != &BigInt::from(-1) && goal != &BigInt::zero() && goal != &BigInt::from(1) {
            return Err(GnfsError::OutOfRange(format!(
                "SymbolSearch goal must be -1, 0 or 1, got {}",
                goal
            )));
        }

        let goal_i32 = goal.to_i32().expect("goal is within i32 range by construction");
        let max = start + modulus + 1;
        let mut counter = start.clone();

        while counter <= max {
            if Self::symbol(&counter, modulus)? == goal_i32 {
                return Ok(counter);
            }
            counter += 1;
        }

        Err(GnfsError::NotFound(format!(
            "no r in [{}, {}] with Legendre(r, {}) == {}",
            start, max, modulus, goal
        )))
    }
}
