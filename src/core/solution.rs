// src/core/solution.rs

use num::BigInt;
use serde::{Deserialize, Serialize};

/// A verified factorization N = p*q, recorded once `GNFS::set_factorization`
/// accepts a candidate pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    pub p: BigInt,
    pub q: BigInt,
}

impl Solution {
    pub fn new(p: &BigInt, q: &BigInt) -> Self {
        Solution { p: p.clone(), q: q.clone() }
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} * {}", self.p, self.q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_both_factors() {
        let solution = Solution::new(&BigInt::from(3), &BigInt::from(5));
        assert_eq!(solution.to_string(), "3 * 5");
    }
}
