// src/core/count_dictionary.rs

use num::{BigInt, One, Zero};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Prime -> exponent multiset. Ordered (`BTreeMap`) so iteration order is
/// deterministic when building GF(2) rows; the synthetic `-1` sign key
/// sorts before every positive prime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountDictionary(BTreeMap<BigInt, BigInt>);

impl CountDictionary {
    pub fn new() -> Self {
        CountDictionary(BTreeMap::new())
    }

    pub fn add(&mut self, key: &BigInt) {
        self.add_count(key, BigInt::one());
    }

    pub fn add_count(&mut self, key: &BigInt, value: BigInt) {
        let entry = self.0.entry(key.clone()).or_insert_with(BigInt::zero);
        *entry += value;
    }

    pub fn combine(&mut self, other: &CountDictionary) {
        for (key, value) in &other.0 {
            self.add_count(key, value.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BigInt, &BigInt)> {
        self.0.iter()
    }

    pub fn get(&self, key: &BigInt) -> Option<&BigInt> {
        self.0.get(key)
    }

    pub fn retain<F>(&mut self, predicate: F)
    where
        F: FnMut(&BigInt, &mut BigInt) -> bool,
    {
        self.0.retain(predicate);
    }

    pub fn format_as_factorization(&self) -> String {
        let factors: Vec<String> = self.0.iter().map(|(key, value)| format!("{}^{}", key, value)).collect();
        format!("{{ {} }}", factors.join(" * "))
    }
}

impl fmt::Display for CountDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{")?;
        for (key, value) in &self.0 {
            writeln!(f, "\t{}: {}", key, value)?;
        }
        write!(f, "}}")
    }
}
