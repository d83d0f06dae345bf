// src/matrix/gaussian_row.rs

use crate::core::count_dictionary::CountDictionary;
use crate::factor::factor_pair::FactorPair;
use crate::integer_math::legendre::Legendre;
use crate::relation_sieve::relation::Relation;
use bitvec::prelude::*;
use num::{BigInt, Signed, Zero};

/// One smooth relation encoded as a GF(2) row: sign bit, rational-base
/// exponent parities, algebraic-base exponent parities, quadratic
/// characters.
#[derive(Clone)]
pub struct GaussianRow {
    pub sign: bool,
    pub rational_part: BitVec,
    pub algebraic_part: BitVec,
    pub quadratic_part: BitVec,
    pub source_relation: Relation,
}

impl GaussianRow {
    pub fn new(
        relation: &Relation,
        rational_factor_base: &[BigInt],
        algebraic_factor_base: &[BigInt],
        quadratic_factor_pairs: &[FactorPair],
    ) -> Self {
        let sign = relation.rational_norm.is_negative();
        let rational_part = Self::exponent_parities(&relation.rational_factorization, rational_factor_base);
        let algebraic_part = Self::exponent_parities(&relation.algebraic_factorization, algebraic_factor_base);
        let quadratic_part = quadratic_factor_pairs
            .iter()
            .map(|qf| quadratic_character(relation, qf))
            .collect();

        GaussianRow {
            sign,
            rational_part,
            algebraic_part,
            quadratic_part,
            source_relation: relation.clone(),
        }
    }

    /// bit[i] = (exponent of factor_base[i] in `factorization`) mod 2.
    fn exponent_parities(factorization: &CountDictionary, factor_base: &[BigInt]) -> BitVec {
        let mut bits = bitvec![0; factor_base.len()];
        for (index, p) in factor_base.iter().enumerate() {
            if let Some(exponent) = factorization.get(p) {
                bits.set(index, !(exponent % 2).is_zero());
            }
        }
        bits
    }

    pub fn last_index_of_rational(&self) -> Option<usize> {
        self.rational_part.last_one()
    }

    pub fn last_index_of_algebraic(&self) -> Option<usize> {
        self.algebraic_part.last_one()
    }

    pub fn last_index_of_quadratic(&self) -> Option<usize> {
        self.quadratic_part.last_one()
    }

    pub fn bits(&self) -> BitVec {
        let mut result = bitvec![0; 0];
        result.push(self.sign);
        result.extend_from_bitslice(&self.rational_part);
        result.extend_from_bitslice(&self.algebraic_part);
        result.extend_from_bitslice(&self.quadratic_part);
        result
    }

    pub fn truncate_rational(&mut self, new_len: usize) {
        self.rational_part.truncate(new_len);
    }

    pub fn truncate_algebraic(&mut self, new_len: usize) {
        self.algebraic_part.truncate(new_len);
    }

    pub fn truncate_quadratic(&mut self, new_len: usize) {
        self.quadratic_part.truncate(new_len);
    }
}

/// Canonical GNFS quadratic character: Legendre(a + b*r, p), accepted
/// (bit=1) iff the symbol is -1. Resolves the quadratic-character Open
/// Question in favor of the mathematically standard form.
pub fn quadratic_character(relation: &Relation, quadratic_pair: &FactorPair) -> bool {
    let value = &relation.a + &relation.b * &quadratic_pair.r;
    matches!(Legendre::symbol(&value, &quadratic_pair.p), Ok(-1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polynomial::polynomial::Polynomial;

    fn poly(coeffs: &[i64]) -> Polynomial {
        Polynomial::new(coeffs.iter().map(|&c| BigInt::from(c)).collect())
    }

    #[test]
    fn exponent_parity_is_mod_two_of_the_exponent() {
        let mut factorization = CountDictionary::new();
        factorization.add_count(&BigInt::from(2), BigInt::from(3));
        factorization.add_count(&BigInt::from(3), BigInt::from(2));
        let base = vec![BigInt::from(2), BigInt::from(3), BigInt::from(5)];
        let bits = GaussianRow::exponent_parities(&factorization, &base);
        assert!(bits[0]); // 3 is odd
        assert!(!bits[1]); // 2 is even
        assert!(!bits[2]); // absent -> 0
    }

    #[test]
    fn bits_concatenates_all_blocks_with_sign_first() {
        let f = poly(&[1, 0, 1]);
        let relation = Relation::new(&BigInt::from(2), &BigInt::from(1), &f, &BigInt::from(3)).unwrap();
        let row = GaussianRow::new(&relation, &[], &[], &[]);
        assert_eq!(row.bits().len(), 1);
    }
}
