// src/integer_math/prime_factory.rs

use crate::error::{GnfsError, GnfsResult};
use crate::integer_math::miller_rabin::MillerRabin;
use crate::integer_math::prime_sieve;
use log::debug;
use num::{BigInt, BigUint, FromPrimitive, Signed, ToPrimitive};

/// Upper bound on any cached or requested prime value, matching the
/// i32 range the sieve and factor-base construction are specified against.
const MAX_CACHEABLE_VALUE: i64 = (i32::MAX - 1) as i64;

/// Monotonically growing cache of primes backed by `prime_sieve`. Queries
/// that exceed the current cache trigger a one-shot re-sieve up to a new,
/// larger bound; the cache never shrinks.
pub struct PrimeFactory {
    max_value: BigInt,
    primes: Vec<BigInt>,
    primes_last: BigInt,
}

impl PrimeFactory {
    pub fn new() -> Self {
        let mut factory = PrimeFactory {
            max_value: BigInt::from(449),
            primes: Vec::new(),
            primes_last: BigInt::from(0),
        };
        factory.set_common_primes();
        factory
    }

    fn set_common_primes(&mut self) {
        self.primes = prime_sieve::primes_to(450).map(BigInt::from).collect();
        self.primes_last = self.primes.last().cloned().unwrap_or_else(|| BigInt::from(0));
    }

    fn set_primes(&mut self) -> GnfsResult<()> {
        let bound = self
            .max_value
            .to_u64()
            .ok_or_else(|| GnfsError::OverflowBound(self.max_value.clone()))?;
        self.primes = prime_sieve::primes_to(bound).map(BigInt::from).collect();
        self.primes_last = self.primes.last().cloned().unwrap_or_else(|| BigInt::from(0));
        Ok(())
    }

    /// Grows the cache so it covers at least `new_max_value`, clamped at the
    /// i32 range ceiling.
    pub fn increase_max_value(&mut self, new_max_value: &BigInt) -> GnfsResult<()> {
        if new_max_value > &BigInt::from(MAX_CACHEABLE_VALUE) {
            return Err(GnfsError::OverflowBound(new_max_value.clone()));
        }
        let grown_by_request = new_max_value + 1000;
        let grown_by_step = &self.max_value + 100_000;
        let candidate = grown_by_request.max(grown_by_step);
        self.max_value = candidate.min(BigInt::from(MAX_CACHEABLE_VALUE));
        self.set_primes()
    }

    pub fn get_index_from_value(&mut self, value: &BigInt) -> GnfsResult<i64> {
        if value < &BigInt::from(0) {
            return Ok(-1);
        }
        if &self.primes_last < value {
            self.increase_max_value(value)?;
        }
        match self.primes.iter().position(|p| p >= value) {
            Some(idx) => Ok(idx as i64 + 1),
            None => Err(GnfsError::NotFound(format!(
                "no cached prime >= {} after growing cache to {}",
                value, self.max_value
            ))),
        }
    }

    /// Dusart-bound estimate of the n-th prime, used to size factor bases
    /// before the exact primes are materialized.
    pub fn get_approximate_value_from_index(n: u64) -> GnfsResult<BigUint> {
        if n < 6 {
            return Ok(BigUint::from_u64(n).unwrap());
        }
        let fn_ = n as f64;
        let flogn = fn_.ln();
        let flog2n = flogn.ln();
        let upper = if n >= 688_383 {
            fn_ * (flogn + flog2n - 1.0 + ((flog2n - 2.00) / flogn))
        } else if n >= 178_974 {
            fn_ * (flogn + flog2n - 1.0 + ((flog2n - 1.95) / flogn))
        } else if n >= 39_017 {
            fn_ * (flogn + flog2n - 0.9484)
        } else {
            fn_ * (flogn + 0.6000 * flog2n)
        };
        if !upper.is_finite() || upper >= u64::MAX as f64 {
            return Err(GnfsError::OverflowBound(BigInt::from(n)));
        }
        Ok(BigUint::from_f64(upper.ceil()).expect("finite, non-negative upper bound"))
    }

    pub fn get_primes_to(&mut self, max_value: &BigInt) -> GnfsResult<impl Iterator<Item = BigInt> + '_> {
        debug!("get_primes_to max_value={}", max_value);
        if &self.primes_last < max_value {
            self.increase_max_value(max_value)?;
        }
        let max_value = max_value.clone();
        Ok(self.primes.iter().take_while(move |p| *p < &max_value).cloned())
    }

    pub fn get_primes_from(&mut self, min_value: &BigInt) -> GnfsResult<impl Iterator<Item = BigInt> + '_> {
        let start = self.get_index_from_value(min_value)?;
        let start = if start < 0 { 0usize } else { (start - 1) as usize };
        Ok(self.primes[start.min(self.primes.len())..].iter().cloned())
    }

    pub fn is_prime(&self, value: &BigInt) -> bool {
        let abs_value = value.abs();
        self.primes.binary_search(&abs_value).is_ok()
    }

    pub fn get_next_prime(from_value: &BigInt) -> BigInt {
        let mut candidate = from_value + 1;
        if (&candidate % 2) == BigInt::from(0) {
            candidate += 1;
        }
        while !MillerRabin::is_probable_prime(&candidate) {
            candidate += 2;
        }
        candidate
    }
}

impl Default for PrimeFactory {
    fn default() -> Self {
        Self::new()
    }
}
