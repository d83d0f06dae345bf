// src/core/gnfs.rs
//
// The orchestrator: owns N, the polynomial, the three factor bases, and
// sieve progress, and drives the pipeline setup -> sieve -> matrix. Does
// not hold a reference to the matrix module (breaking the sieve<->matrix
// cycle per the design notes): `solve_matrix` borrows the sieve's smooth
// relations as a read-only slice and hands them to the matrix module.

use std::path::Path;

use log::info;
use num::{BigInt, BigUint, ToPrimitive, Zero};
use rand::Rng;

use crate::core::cancellation_token::CancellationToken;
use crate::core::directory_location::DirectoryLocations;
use crate::core::solution::Solution;
use crate::error::{GnfsError, GnfsResult};
use crate::factor::factor_base::{Factory as FactorBaseFactory, FactorBase};
use crate::factor::factor_pair::FactorPair;
use crate::integer_math::prime_factory::PrimeFactory;
use crate::matrix::matrix_solve::MatrixSolver;
use crate::polynomial::construction;
use crate::polynomial::polynomial::Polynomial;
use crate::relation_sieve::relation::Relation;
use crate::relation_sieve::sieve_progress::SieveProgress;

/// Degree table is 3 for the quadratic-base-size table (spec.md 3.): d<=3:10, 4:20, 5-6:40, 7:80, >=8:100.
fn quadratic_base_count_for_degree(degree: usize) -> usize {
    match degree {
        d if d <= 3 => 10,
        4 => 20,
        5 | 6 => 40,
        7 => 80,
        _ => 100,
    }
}

pub struct GNFS {
    pub n: BigInt,
    pub polynomial_base: BigInt,
    pub polynomial_degree: usize,
    pub current_polynomial: Polynomial,
    pub prime_factor_base: FactorBase,
    pub rational_factor_pair_collection: Vec<FactorPair>,
    pub algebraic_factor_pair_collection: Vec<FactorPair>,
    pub quadratic_factor_pair_collection: Vec<FactorPair>,
    pub current_relations_progress: SieveProgress,
    pub factorization: Option<Solution>,
    pub save_locations: DirectoryLocations,
    prime_factory: PrimeFactory,
}

impl GNFS {
    /// Initializes a new factorization job: validates N/m/degree, builds the
    /// polynomial, derives the three factor bases, and prepares sieve
    /// progress. Fails with `AlreadyExists` if the job directory for this N
    /// is already present and `overwrite` was not requested.
    #[allow(clippy::too_many_arguments)]
    pub fn create_job(
        n: &BigInt,
        m: &BigInt,
        degree_override: Option<usize>,
        rational_factor_base_max: &BigInt,
        target_smooth_count: usize,
        relation_value_range: &BigInt,
        overwrite: bool,
        cancel: &CancellationToken,
    ) -> GnfsResult<Self> {
        if n < &BigInt::from(2) {
            return Err(GnfsError::InvalidInput(format!("N must be >= 2, got {}", n)));
        }
        if m <= &BigInt::from(1) {
            return Err(GnfsError::InvalidInput(format!("polynomial base m must be > 1, got {}", m)));
        }

        let degree = degree_override.unwrap_or_else(|| construction::calculate_degree(n));
        if degree < 2 {
            return Err(GnfsError::InvalidInput(format!("polynomial degree must be >= 2, got {}", degree)));
        }

        let current_polynomial = construction::construct_for_base(n, m, degree);
        if !current_polynomial.base_matches(m, n) {
            return Err(GnfsError::InvalidInput(format!(
                "constructed polynomial does not satisfy f(m) = N for m={}, N={}",
                m, n
            )));
        }

        if cancel.is_cancelled() {
            return Err(GnfsError::Cancelled);
        }

        let unique_name = DirectoryLocations::unique_name_from_n(n);
        let save_locations = DirectoryLocations::new(".", &unique_name);
        let directory_exists = Path::new(&save_locations.save_directory).exists();
        if directory_exists && !overwrite {
            return Err(GnfsError::AlreadyExists(unique_name));
        }
        if directory_exists && overwrite {
            std::fs::remove_dir_all(&save_locations.save_directory)
                .map_err(|e| GnfsError::Persistence(e.to_string()))?;
        }
        std::fs::create_dir_all(&save_locations.save_directory).map_err(|e| GnfsError::Persistence(e.to_string()))?;

        if cancel.is_cancelled() {
            return Err(GnfsError::Cancelled);
        }

        let mut prime_factory = PrimeFactory::new();
        let prime_factor_base = Self::calculate_factor_base_bounds(&mut prime_factory, degree, rational_factor_base_max)?;

        if cancel.is_cancelled() {
            return Err(GnfsError::Cancelled);
        }

        let rational_primes: Vec<BigInt> = prime_factory
            .get_primes_to(&(&prime_factor_base.rational_factor_base_max + 1))?
            .collect();
        let algebraic_primes: Vec<BigInt> = prime_factory
            .get_primes_to(&(&prime_factor_base.algebraic_factor_base_max + 1))?
            .collect();
        let quadratic_candidate_primes: Vec<BigInt> = prime_factory
            .get_primes_from(&prime_factor_base.quadratic_factor_base_min)?
            .collect();

        let rational_factor_pair_collection =
            FactorBaseFactory::build_rational_factor_pair_collection(&rational_primes, m);
        let algebraic_factor_pair_collection = FactorBaseFactory::build_algebraic_factor_pair_collection(
            &current_polynomial,
            &algebraic_primes,
            cancel,
        )?;
        let quadratic_factor_pair_collection = FactorBaseFactory::build_quadratic_factor_pair_collection(
            &current_polynomial,
            &quadratic_candidate_primes,
            prime_factor_base.quadratic_base_count,
            cancel,
        )?;

        info!(
            "factor bases built: rational={}, algebraic={}, quadratic={}",
            rational_factor_pair_collection.len(),
            algebraic_factor_pair_collection.len(),
            quadratic_factor_pair_collection.len()
        );

        let mut gnfs = GNFS {
            n: n.clone(),
            polynomial_base: m.clone(),
            polynomial_degree: degree,
            current_polynomial,
            prime_factor_base: FactorBase {
                rational_factor_base: rational_primes,
                algebraic_factor_base: algebraic_primes,
                ..prime_factor_base
            },
            rational_factor_pair_collection,
            algebraic_factor_pair_collection,
            quadratic_factor_pair_collection,
            current_relations_progress: SieveProgress::new(
                relation_value_range.clone(),
                BigInt::zero(),
                target_smooth_count,
            ),
            factorization: None,
            save_locations,
            prime_factory,
        };

        let required = gnfs.smooth_relations_required_for_matrix_step()?;
        gnfs.current_relations_progress.max_b = gnfs.prime_factor_base.algebraic_factor_base_max.clone();
        gnfs.current_relations_progress.smooth_relations_target_quantity =
            gnfs.current_relations_progress.smooth_relations_target_quantity.max(required);

        Ok(gnfs)
    }

    fn calculate_factor_base_bounds(
        prime_factory: &mut PrimeFactory,
        degree: usize,
        rational_factor_base_max: &BigInt,
    ) -> GnfsResult<FactorBase> {
        let algebraic_factor_base_max = rational_factor_base_max * 3;
        let quadratic_base_count = quadratic_base_count_for_degree(degree);
        let quadratic_factor_base_min = &algebraic_factor_base_max + 20;

        let min_index = prime_factory.get_index_from_value(&quadratic_factor_base_min)?;
        let target_index = min_index as u64 + quadratic_base_count as u64;
        let approx: BigUint = PrimeFactory::get_approximate_value_from_index(target_index)?;
        let quadratic_factor_base_max = BigInt::from(approx);

        Ok(FactorBase {
            rational_factor_base_max: rational_factor_base_max.clone(),
            algebraic_factor_base_max,
            quadratic_factor_base_min,
            quadratic_factor_base_max,
            quadratic_base_count,
            rational_factor_base: Vec::new(),
            algebraic_factor_base: Vec::new(),
            quadratic_factor_base: Vec::new(),
        })
    }

    /// targetSmoothCount floor, per spec.md 4.7: indices of the rational and
    /// algebraic bounds in the global prime ordering, plus the quadratic
    /// factor base size, plus 3.
    pub fn smooth_relations_required_for_matrix_step(&mut self) -> GnfsResult<usize> {
        let rational_index = self
            .prime_factory
            .get_index_from_value(&self.prime_factor_base.rational_factor_base_max)?;
        let algebraic_index = self
            .prime_factory
            .get_index_from_value(&self.prime_factor_base.algebraic_factor_base_max)?;
        Ok(rational_index as usize + algebraic_index as usize + self.quadratic_factor_pair_collection.len() + 3)
    }

    /// Advances sieving until the (possibly just-grown) target is met, MaxB
    /// is exceeded without growth room, or cancellation is requested.
    pub fn generate_relations(&mut self, cancel: &CancellationToken) -> GnfsResult<()> {
        let required_min_target = self.smooth_relations_required_for_matrix_step()?;
        self.current_relations_progress.generate_relations(
            &self.current_polynomial,
            &self.polynomial_base,
            &self.prime_factor_base.rational_factor_base,
            &self.prime_factor_base.algebraic_factor_base,
            required_min_target,
            cancel,
        )
    }

    /// Runs one randomized sample/eliminate/extract pass of the matrix
    /// stage: draws a fresh random subset of the current smooth relations,
    /// performs GF(2) elimination, and accepts every free-column solution
    /// whose rational and algebraic norm products are both perfect squares.
    /// Accepted solutions are appended to `current_relations_progress`.
    /// Returns the number of solutions accepted this pass. Call again
    /// (optionally after more sieving) for additional randomized passes.
    pub fn solve_matrix<R: Rng + ?Sized>(&mut self, rng: &mut R, cancel: &CancellationToken) -> GnfsResult<usize> {
        let required = self.smooth_relations_required_for_matrix_step()?;
        let accepted = MatrixSolver::solve(
            self.current_relations_progress.relations.smooth_relations(),
            &self.prime_factor_base.rational_factor_base,
            &self.prime_factor_base.algebraic_factor_base,
            &self.quadratic_factor_pair_collection,
            required,
            rng,
            cancel,
        )?;
        let count = accepted.len();
        for solution in accepted {
            self.current_relations_progress.relations.push_free_solution(solution);
        }
        Ok(count)
    }

    pub fn is_factored(&self) -> bool {
        self.factorization.is_some()
    }

    pub fn is_factor(&self, candidate: &BigInt) -> bool {
        !candidate.is_zero() && (&self.n % candidate).is_zero()
    }

    /// Records a verified factorization iff p*q = N.
    pub fn set_factorization(&mut self, p: &BigInt, q: &BigInt) -> bool {
        if p * q == self.n {
            self.factorization = Some(Solution::new(p, q));
            true
        } else {
            false
        }
    }
}

impl std::fmt::Display for GNFS {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "N = {}", self.n)?;
        writeln!(f, "Polynomial(degree: {}, base: {})", self.polynomial_degree, self.polynomial_base)?;
        writeln!(f, "f(x) = {}", self.current_polynomial)?;
        writeln!(
            f,
            "RFB count: {}  AFB count: {}  QFB count: {}",
            self.rational_factor_pair_collection.len(),
            self.algebraic_factor_pair_collection.len(),
            self.quadratic_factor_pair_collection.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleanup(gnfs: &GNFS) {
        let _ = std::fs::remove_dir_all(&gnfs.save_locations.save_directory);
    }

    #[test]
    fn create_job_builds_a_consistent_polynomial() {
        let cancel = CancellationToken::new();
        let n = BigInt::from(45113);
        let m = BigInt::from(31);
        let gnfs = GNFS::create_job(&n, &m, Some(3), &BigInt::from(29), 5, &BigInt::from(50), true, &cancel).unwrap();
        assert!(gnfs.current_polynomial.base_matches(&m, &n));
        cleanup(&gnfs);
    }

    #[test]
    fn create_job_rejects_n_below_two() {
        let cancel = CancellationToken::new();
        let result = GNFS::create_job(&BigInt::from(1), &BigInt::from(31), Some(3), &BigInt::from(29), 5, &BigInt::from(50), true, &cancel);
        assert!(matches!(result, Err(GnfsError::InvalidInput(_))));
    }

    #[test]
    fn set_factorization_accepts_only_matching_product() {
        let cancel = CancellationToken::new();
        let n = BigInt::from(45113);
        let mut gnfs = GNFS::create_job(&n, &BigInt::from(31), Some(3), &BigInt::from(29), 5, &BigInt::from(50), true, &cancel).unwrap();
        assert!(!gnfs.set_factorization(&BigInt::from(2), &BigInt::from(3)));
        assert!(!gnfs.is_factored());
        cleanup(&gnfs);
    }

    #[test]
    fn directory_already_exists_without_overwrite_is_rejected() {
        let cancel = CancellationToken::new();
        let n = BigInt::from(991991);
        let first = GNFS::create_job(&n, &BigInt::from(99), Some(3), &BigInt::from(29), 5, &BigInt::from(50), true, &cancel).unwrap();
        let second = GNFS::create_job(&n, &BigInt::from(99), Some(3), &BigInt::from(29), 5, &BigInt::from(50), false, &cancel);
        assert!(matches!(second, Err(GnfsError::AlreadyExists(_))));
        cleanup(&first);
    }
}
