// src/matrix/gaussian_matrix.rs
//
// GF(2) matrix build, Gauss-Jordan elimination with free-column tracking,
// and null-space solution extraction, per spec.md 4.8. Rows are
// `bitvec::vec::BitVec` (teacher dependency) rather than `Vec<bool>`.

use bitvec::prelude::*;

use crate::error::{GnfsError, GnfsResult};
use crate::factor::factor_pair::FactorPair;
use crate::matrix::gaussian_row::GaussianRow;
use crate::relation_sieve::relation::Relation;
use num::BigInt;

pub struct GaussianMatrix {
    /// One row per encoded bit position (length L); each row has
    /// `num_cols` = L+2 columns: L+1 relation columns plus one bookkeeping
    /// column that is always zero.
    rows: Vec<BitVec>,
    num_cols: usize,
    free_columns: Vec<bool>,
    eliminated: bool,
    /// Column index -> the relation that column represents. Shorter than
    /// `num_cols` by one: the trailing bookkeeping column has no relation.
    column_relations: Vec<Relation>,
}

impl GaussianMatrix {
    /// Builds the matrix from `relations`: encodes each as a `GaussianRow`,
    /// truncates every block to the highest bit actually set across the
    /// selected rows, takes the first L+1 relations (L = bits per row after
    /// truncation, ensuring a nontrivial nullspace), and transposes.
    pub fn new(
        relations: &[Relation],
        rational_factor_base: &[BigInt],
        algebraic_factor_base: &[BigInt],
        quadratic_factor_pairs: &[FactorPair],
    ) -> GnfsResult<Self> {
        if relations.is_empty() {
            return Err(GnfsError::InternalInvariantViolation(
                "cannot build a GF(2) matrix from zero relations".to_string(),
            ));
        }

        let mut rows: Vec<GaussianRow> = relations
            .iter()
            .map(|r| GaussianRow::new(r, rational_factor_base, algebraic_factor_base, quadratic_factor_pairs))
            .collect();

        let max_rational = rows.iter().filter_map(|r| r.last_index_of_rational()).max().map_or(0, |i| i + 1);
        let max_algebraic = rows.iter().filter_map(|r| r.last_index_of_algebraic()).max().map_or(0, |i| i + 1);
        let max_quadratic = rows.iter().filter_map(|r| r.last_index_of_quadratic()).max().map_or(0, |i| i + 1);

        for row in &mut rows {
            row.truncate_rational(max_rational);
            row.truncate_algebraic(max_algebraic);
            row.truncate_quadratic(max_quadratic);
        }

        let bit_length = rows[0].bits().len();
        let take_count = bit_length + 1;
        if rows.len() < take_count {
            return Err(GnfsError::InternalInvariantViolation(format!(
                "need at least {} relations (row length + 1) to build a nontrivial matrix, got {}",
                take_count,
                rows.len()
            )));
        }
        rows.truncate(take_count);

        let column_relations: Vec<Relation> = rows.iter().map(|r| r.source_relation.clone()).collect();
        let bit_rows: Vec<BitVec> = rows.iter().map(|r| r.bits()).collect();

        let num_cols = take_count + 1;
        let mut transposed = Vec::with_capacity(bit_length);
        for bit_index in 0..bit_length {
            let mut transposed_row = bitvec![0; num_cols];
            for (col, row_bits) in bit_rows.iter().enumerate() {
                transposed_row.set(col, row_bits[bit_index]);
            }
            transposed.push(transposed_row);
        }

        Ok(GaussianMatrix {
            rows: transposed,
            num_cols,
            free_columns: Vec::new(),
            eliminated: false,
            column_relations,
        })
    }

    /// Standard GF(2) Gauss-Jordan: for pivot column `h`, search rows from
    /// the current row index `i` for the first set bit; if found, swap it
    /// to row `i` and XOR it into every other row with a 1 in column `h`
    /// (both above and below, i.e. full reduction). If no pivot is found,
    /// mark `h` free and move to the next column WITHOUT advancing `i`.
    pub fn eliminate(&mut self) {
        if self.eliminated {
            return;
        }

        let num_rows = self.rows.len();
        let mut free_columns = vec![false; self.num_cols];
        let mut i = 0usize;
        let mut h = 0usize;

        while h < self.num_cols && i < num_rows {
            let pivot_row = (i..num_rows).find(|&t| self.rows[t][h]);
            match pivot_row {
                Some(t) => {
                    self.rows.swap(i, t);
                    let pivot = self.rows[i].clone();
                    for (j, row) in self.rows.iter_mut().enumerate() {
                        if j != i && row[h] {
                            *row ^= &pivot;
                        }
                    }
                    i += 1;
                }
                None => {
                    free_columns[h] = true;
                }
            }
            h += 1;
        }
        while h < self.num_cols {
            free_columns[h] = true;
            h += 1;
        }

        self.free_columns = free_columns;
        self.eliminated = true;
    }

    pub fn free_column_count(&self) -> usize {
        self.free_columns.iter().filter(|&&f| f).count()
    }

    /// GetSolution(k): the k-th (1-indexed) free column's null-space mask,
    /// translated into the relation subset it selects.
    pub fn get_solution(&self, k: usize) -> GnfsResult<Vec<Relation>> {
        let mask = self.get_solution_mask(k)?;
        Ok(mask.iter_ones().filter_map(|idx| self.column_relations.get(idx).cloned()).collect())
    }

    /// The raw column-index mask for the k-th free column, before
    /// translation to relations. Exposed at crate visibility so tests can
    /// verify the null-vector property (spec.md 8 property 6) directly
    /// against the pre-elimination matrix.
    pub(crate) fn get_solution_mask(&self, k: usize) -> GnfsResult<BitVec> {
        if !self.eliminated {
            return Err(GnfsError::InternalInvariantViolation(
                "solve requested before elimination".to_string(),
            ));
        }
        let free_indices: Vec<usize> = self.free_columns.iter().enumerate().filter(|(_, &f)| f).map(|(i, _)| i).collect();
        if k == 0 || k > free_indices.len() {
            return Err(GnfsError::InternalInvariantViolation(format!(
                "requested solution index {} out of range (1..={} free columns)",
                k,
                free_indices.len()
            )));
        }
        let pivot_free_col = free_indices[k - 1];

        let mut mask = bitvec![0; self.num_cols];
        mask.set(pivot_free_col, true);
        for row in &self.rows {
            if row[pivot_free_col] {
                if let Some(h) = (0..=pivot_free_col).find(|&c| row[c]) {
                    mask.set(h, true);
                }
            }
        }

        Ok(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polynomial::polynomial::Polynomial;

    fn relation(a: i64, b: i64) -> Relation {
        let f = Polynomial::new(vec![BigInt::from(1), BigInt::from(0), BigInt::from(1)]);
        Relation::new(&BigInt::from(a), &BigInt::from(b), &f, &BigInt::from(3)).unwrap()
    }

    #[test]
    fn solve_before_eliminate_is_an_invariant_violation() {
        let relations = vec![relation(1, 1), relation(2, 1)];
        let matrix = GaussianMatrix::new(&relations, &[BigInt::from(2)], &[BigInt::from(2)], &[]).unwrap();
        assert!(matches!(matrix.get_solution(1), Err(GnfsError::InternalInvariantViolation(_))));
    }

    #[test]
    fn empty_relation_list_is_rejected() {
        let result = GaussianMatrix::new(&[], &[], &[], &[]);
        assert!(matches!(result, Err(GnfsError::InternalInvariantViolation(_))));
    }

    #[test]
    fn elimination_of_a_known_rank_deficient_matrix_reports_free_columns_and_null_vectors() {
        // Six relations over a one-prime rational base and a one-prime
        // algebraic base (plus sign bit) gives row bit-length <= 3, so
        // take_count <= 4; build with enough relations that the matrix is
        // guaranteed rank-deficient (more columns than independent rows).
        let relations: Vec<Relation> = (1..=6).map(|k| relation(k, 1)).collect();
        let rational_base = vec![BigInt::from(2), BigInt::from(5)];
        let algebraic_base = vec![BigInt::from(2), BigInt::from(5)];

        let mut matrix = GaussianMatrix::new(&relations, &rational_base, &algebraic_base, &[]).unwrap();
        matrix.eliminate();

        // At least one free column must exist: L rows can pivot at most L
        // of the L+2 columns.
        assert!(matrix.free_column_count() >= 1);

        for k in 1..=matrix.free_column_count() {
            let solution = matrix.get_solution(k).unwrap();
            assert!(!solution.is_empty());
        }
    }

    #[test]
    fn elimination_of_a_6x7_matrix_with_a_known_2d_nullspace_finds_exactly_two_free_columns() {
        // Columns 5 and 6 are defined as linear combinations of earlier
        // columns (c5 = c0 xor c1, c6 = c2 xor c3) for every row, and row 5
        // is itself row0 xor row1 -- a matrix engineered to have rank 5 over
        // a 7-column space, i.e. exactly two free columns (spec.md 8).
        let rows: Vec<BitVec> = vec![
            bitvec![1, 0, 0, 0, 0, 1, 0],
            bitvec![0, 1, 0, 0, 0, 1, 0],
            bitvec![0, 0, 1, 0, 0, 0, 1],
            bitvec![0, 0, 0, 1, 0, 0, 1],
            bitvec![0, 0, 0, 0, 1, 0, 0],
            bitvec![1, 1, 0, 0, 0, 0, 0],
        ];
        let original_rows = rows.clone();

        let mut matrix = GaussianMatrix {
            rows,
            num_cols: 7,
            free_columns: Vec::new(),
            eliminated: false,
            column_relations: Vec::new(),
        };
        matrix.eliminate();

        assert_eq!(matrix.free_column_count(), 2);

        let mask1 = matrix.get_solution_mask(1).unwrap();
        let mask2 = matrix.get_solution_mask(2).unwrap();
        assert_ne!(mask1, mask2);
        assert_null_vector(&original_rows, &mask1);
        assert_null_vector(&original_rows, &mask2);
    }

    /// XOR of every original (pre-elimination) column selected by `mask`
    /// must be the zero vector -- spec.md 8 property 6.
    fn assert_null_vector(original_rows: &[BitVec], mask: &BitVec) {
        for row in original_rows {
            let parity = mask.iter_ones().filter(|&col| row[col]).count() % 2;
            assert_eq!(parity, 0, "row {:?} is not annihilated by mask {:?}", row, mask);
        }
    }

    #[test]
    fn requesting_an_out_of_range_solution_index_is_an_invariant_violation() {
        let relations: Vec<Relation> = (1..=6).map(|k| relation(k, 1)).collect();
        let rational_base = vec![BigInt::from(2), BigInt::from(5)];
        let algebraic_base = vec![BigInt::from(2), BigInt::from(5)];
        let mut matrix = GaussianMatrix::new(&relations, &rational_base, &algebraic_base, &[]).unwrap();
        matrix.eliminate();
        let out_of_range = matrix.free_column_count() + 1;
        assert!(matches!(
            matrix.get_solution(out_of_range),
            Err(GnfsError::InternalInvariantViolation(_))
        ));
    }
}
