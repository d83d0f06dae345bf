// src/relation_sieve/sieve_progress.rs
//
// The sieve coordinator state machine. Does not hold a back-reference to
// the orchestrator (breaking the sieve<->matrix cycle per the design
// notes): callers pass in the polynomial, base m, and factor-base prime
// lists it needs for each `generate_relations` call.

use crate::core::cancellation_token::CancellationToken;
use crate::error::GnfsResult;
use crate::integer_math::gcd::GCD;
use crate::polynomial::polynomial::Polynomial;
use crate::relation_sieve::relation::Relation;
use crate::relation_sieve::relation_container::RelationContainer;
use log::debug;
use num::{BigInt, Integer, Signed};
use rayon::prelude::*;
use std::sync::Mutex;

const MAX_B_GROWTH_STEP: i64 = 100;
const VALUE_RANGE_GROWTH_STEP: i64 = 200;

pub struct SieveProgress {
    pub a: BigInt,
    pub b: BigInt,
    pub max_b: BigInt,
    pub value_range: BigInt,
    pub smooth_relations_target_quantity: usize,
    pub smooth_relations_counter: usize,
    pub relations: RelationContainer,
}

impl SieveProgress {
    pub fn new(value_range: BigInt, initial_max_b: BigInt, target_quantity: usize) -> Self {
        SieveProgress {
            a: BigInt::from(0),
            b: BigInt::from(3),
            max_b: initial_max_b,
            value_range,
            smooth_relations_target_quantity: target_quantity,
            smooth_relations_counter: 0,
            relations: RelationContainer::new(),
        }
    }

    pub fn increase_target_quantity(&mut self, amount: usize) {
        self.smooth_relations_target_quantity += amount;
    }

    /// Advances sieving until the target is met, MaxB is exceeded without
    /// growth room, or cancellation is requested.
    pub fn generate_relations(
        &mut self,
        poly: &Polynomial,
        m: &BigInt,
        rational_base: &[BigInt],
        algebraic_base: &[BigInt],
        required_min_target: usize,
        cancel: &CancellationToken,
    ) -> GnfsResult<()> {
        self.smooth_relations_target_quantity = self.smooth_relations_target_quantity.max(required_min_target);

        if self.a >= self.value_range {
            self.value_range += VALUE_RANGE_GROWTH_STEP;
        }
        if self.value_range.is_even() {
            self.value_range += 1;
        }
        if self.a.is_even() {
            self.a += 1;
        }

        let start_a = self.a.clone();

        while self.smooth_relations_counter < self.smooth_relations_target_quantity {
            if cancel.is_cancelled() {
                break;
            }
            if self.b > self.max_b {
                break;
            }

            let a_candidates = a_sequence(&self.a, &self.value_range);
            let coprime_candidates: Vec<BigInt> = a_candidates
                .into_iter()
                .filter(|a| GCD::are_coprime(&[a.clone(), self.b.clone()]))
                .collect();

            if let Some(last) = coprime_candidates.last() {
                self.a = last.clone();
            }

            let sieved: Mutex<Vec<Relation>> = Mutex::new(Vec::new());
            coprime_candidates
                .par_iter()
                .try_for_each(|a| -> GnfsResult<()> {
                    if cancel.is_cancelled() {
                        return Ok(());
                    }
                    let mut relation = Relation::new(a, &self.b, poly, m)?;
                    relation.sieve(rational_base, algebraic_base)?;
                    sieved.lock().unwrap().push(relation);
                    Ok(())
                })?;

            for relation in sieved.into_inner().unwrap() {
                if relation.is_smooth() {
                    self.relations.push_smooth(relation);
                    self.smooth_relations_counter += 1;
                } else {
                    self.relations.push_rough(relation);
                }
            }

            if cancel.is_cancelled() {
                break;
            }

            self.b += 1;
            self.a = start_a.clone();
            if self.b > self.max_b {
                self.max_b += MAX_B_GROWTH_STEP;
            }

            debug!(
                "sieve advance: b={}, max_b={}, smooth={}/{}",
                self.b, self.max_b, self.smooth_relations_counter, self.smooth_relations_target_quantity
            );
        }

        Ok(())
    }

    /// Discards rough relations whose leftover quotient is itself a probable
    /// prime larger than the corresponding base: such a relation can never
    /// become smooth.
    pub fn purge_prime_rough_relations(&mut self) {
        use crate::integer_math::miller_rabin::MillerRabin;
        self.relations.retain_rough(|r| {
            let alg_is_prime_leftover = r.algebraic_quotient != BigInt::from(1) && MillerRabin::is_probable_prime(&r.algebraic_quotient);
            let rat_is_prime_leftover = r.rational_quotient != BigInt::from(1) && MillerRabin::is_probable_prime(&r.rational_quotient);
            !(alg_is_prime_leftover || rat_is_prime_leftover)
        });
    }
}

/// Interleaved +1,-1,+2,-2,... sequence centered symmetrically, continuing
/// from `start` up to `value_range` in absolute value.
pub fn a_sequence(start: &BigInt, value_range: &BigInt) -> Vec<BigInt> {
    let mut result = Vec::new();
    let mut counter = start.abs();
    let mut positive_turn = !start.is_negative();

    while &counter <= value_range {
        if positive_turn {
            result.push(counter.clone());
        } else {
            result.push(-&counter);
            counter += 1;
        }
        positive_turn = !positive_turn;
    }
    result
}
