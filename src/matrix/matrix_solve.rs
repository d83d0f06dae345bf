// src/matrix/matrix_solve.rs
//
// The matrix stage driver: draws a random subset of the current smooth
// relations, builds and eliminates a GF(2) matrix, and keeps every
// null-space solution whose rational and algebraic norm products are both
// perfect squares (spec.md 4.8, 8 property 7).
//
// Design note: the teacher's `matrix_solve.rs` wraps this in an outer while
// loop that resamples the *entire, unchanged* smooth-relation set on every
// iteration with no real new randomness and no break condition besides
// cancellation -- effectively an infinite loop. `solve` here performs
// exactly one randomized sample/eliminate/extract pass per call; `GNFS`
// calls it again (optionally after more sieving) for additional passes.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::cancellation_token::CancellationToken;
use crate::error::GnfsResult;
use crate::factor::factor_pair::FactorPair;
use crate::integer_math::perfect_square::is_perfect_square;
use crate::matrix::gaussian_matrix::GaussianMatrix;
use crate::relation_sieve::relation::Relation;
use num::BigInt;

pub struct MatrixSolver;

impl MatrixSolver {
    /// Samples `min(required_count, relations.len())` relations at random,
    /// eliminates the resulting matrix, and returns the accepted
    /// congruence-of-squares solutions (each a subset of `relations`).
    #[allow(clippy::too_many_arguments)]
    pub fn solve<R: Rng + ?Sized>(
        relations: &[Relation],
        rational_factor_base: &[BigInt],
        algebraic_factor_base: &[BigInt],
        quadratic_factor_pairs: &[FactorPair],
        required_count: usize,
        rng: &mut R,
        cancel: &CancellationToken,
    ) -> GnfsResult<Vec<Vec<Relation>>> {
        if relations.is_empty() || cancel.is_cancelled() {
            return Ok(Vec::new());
        }

        let sample_size = even_sample_size(required_count.min(relations.len()), relations.len());
        let mut sample: Vec<Relation> = relations.choose_multiple(rng, sample_size).cloned().collect();
        sample.sort();

        let mut matrix = GaussianMatrix::new(&sample, rational_factor_base, algebraic_factor_base, quadratic_factor_pairs)?;
        matrix.eliminate();

        // The trailing bookkeeping column (always free, since it's all-zero)
        // never maps to a relation subset: iterate free columns 1..|F|-1,
        // per spec.md 4.8's driver loop, skipping the last one.
        let mut accepted = Vec::new();
        let free_count = matrix.free_column_count();
        for k in 1..free_count {
            if cancel.is_cancelled() {
                break;
            }
            let candidate = matrix.get_solution(k)?;
            if is_valid_congruence(&candidate) {
                accepted.push(candidate);
            }
        }

        Ok(accepted)
    }
}

/// Rounds `size` up to even (down, if rounding up would exceed what's
/// available), per spec.md 4.8's "required + parity-adjusted to even".
fn even_sample_size(size: usize, available: usize) -> usize {
    if size % 2 == 0 {
        return size;
    }
    if size + 1 <= available {
        size + 1
    } else {
        size.saturating_sub(1)
    }
}

/// A free-column solution is a valid congruence of squares iff both the
/// rational and algebraic norm products across the selected relations are
/// perfect squares.
fn is_valid_congruence(relations: &[Relation]) -> bool {
    if relations.is_empty() {
        return false;
    }
    let rational_product = relations.iter().fold(BigInt::from(1), |acc, r| acc * &r.rational_norm);
    let algebraic_product = relations.iter().fold(BigInt::from(1), |acc, r| acc * &r.algebraic_norm);
    is_perfect_square(&rational_product) && is_perfect_square(&algebraic_product)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polynomial::polynomial::Polynomial;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn relation(a: i64, b: i64) -> Relation {
        let f = Polynomial::new(vec![BigInt::from(1), BigInt::from(0), BigInt::from(1)]);
        Relation::new(&BigInt::from(a), &BigInt::from(b), &f, &BigInt::from(3)).unwrap()
    }

    #[test]
    fn solving_an_empty_relation_set_yields_no_solutions() {
        let mut rng = StdRng::seed_from_u64(1);
        let cancel = CancellationToken::new();
        let result = MatrixSolver::solve(&[], &[], &[], &[], 5, &mut rng, &cancel).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn cancellation_before_sampling_yields_no_solutions() {
        let relations = vec![relation(1, 1), relation(2, 1)];
        let mut rng = StdRng::seed_from_u64(1);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = MatrixSolver::solve(&relations, &[BigInt::from(2)], &[BigInt::from(2)], &[], 2, &mut rng, &cancel).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn solve_on_a_rank_deficient_sample_returns_only_valid_congruences() {
        let relations: Vec<Relation> = (1..=6).map(|k| relation(k, 1)).collect();
        let rational_base = vec![BigInt::from(2), BigInt::from(5)];
        let algebraic_base = vec![BigInt::from(2), BigInt::from(5)];
        let mut rng = StdRng::seed_from_u64(7);
        let cancel = CancellationToken::new();

        let solutions =
            MatrixSolver::solve(&relations, &rational_base, &algebraic_base, &[], 6, &mut rng, &cancel).unwrap();

        for solution in &solutions {
            let rational_product = solution.iter().fold(BigInt::from(1), |acc, r| acc * &r.rational_norm);
            let algebraic_product = solution.iter().fold(BigInt::from(1), |acc, r| acc * &r.algebraic_norm);
            assert!(is_perfect_square(&rational_product));
            assert!(is_perfect_square(&algebraic_product));
        }
    }
}
