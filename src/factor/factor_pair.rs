// src/factor/factor_pair.rs

use num::BigInt;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorPair {
    pub p: BigInt,
    pub r: BigInt,
}

impl FactorPair {
    pub fn new(p: BigInt, r: BigInt) -> Self {
        FactorPair { p, r }
    }
}

impl Hash for FactorPair {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.p.hash(state);
        self.r.hash(state);
    }
}

impl PartialEq for FactorPair {
    fn eq(&self, other: &FactorPair) -> bool {
        self.p == other.p && self.r == other.r
    }
}

impl Eq for FactorPair {}

impl std::fmt::Display for FactorPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.p, self.r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_pairs_hash_the_same() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(FactorPair::new(BigInt::from(7), BigInt::from(3)));
        assert!(!set.insert(FactorPair::new(BigInt::from(7), BigInt::from(3))));
    }

    #[test]
    fn display_matches_pair_notation() {
        let pair = FactorPair::new(BigInt::from(7), BigInt::from(3));
        assert_eq!(pair.to_string(), "(7,3)");
    }
}
