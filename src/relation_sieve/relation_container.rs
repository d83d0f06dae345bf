// src/relation_sieve/relation_container.rs

use super::relation::Relation;
use serde::{Deserialize, Serialize};

/// Three append-only collections: smooth relations (ready for the matrix
/// stage), rough relations (retained for optional post-processing), and
/// free-relation solutions (one per accepted GF(2) null-space vector).
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct RelationContainer {
    smooth_relations: Vec<Relation>,
    rough_relations: Vec<Relation>,
    free_relations: Vec<Vec<Relation>>,
}

impl RelationContainer {
    pub fn new() -> Self {
        RelationContainer::default()
    }

    pub fn push_smooth(&mut self, relation: Relation) {
        self.smooth_relations.push(relation);
    }

    pub fn push_rough(&mut self, relation: Relation) {
        self.rough_relations.push(relation);
    }

    pub fn push_free_solution(&mut self, solution: Vec<Relation>) {
        self.free_relations.push(solution);
    }

    pub fn retain_rough<F>(&mut self, predicate: F)
    where
        F: FnMut(&Relation) -> bool,
    {
        self.rough_relations.retain(predicate);
    }

    pub fn smooth_relations(&self) -> &[Relation] {
        &self.smooth_relations
    }

    pub fn rough_relations(&self) -> &[Relation] {
        &self.rough_relations
    }

    pub fn free_relations(&self) -> &[Vec<Relation>] {
        &self.free_relations
    }

    pub fn smooth_count(&self) -> usize {
        self.smooth_relations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::BigInt;

    fn dummy_relation(a: i64, b: i64) -> Relation {
        let f = crate::polynomial::polynomial::Polynomial::new(vec![BigInt::from(1), BigInt::from(0), BigInt::from(1)]);
        Relation::new(&BigInt::from(a), &BigInt::from(b), &f, &BigInt::from(3)).unwrap()
    }

    #[test]
    fn push_and_read_back_smooth_relations() {
        let mut container = RelationContainer::new();
        container.push_smooth(dummy_relation(2, 1));
        assert_eq!(container.smooth_count(), 1);
        assert_eq!(container.smooth_relations().len(), 1);
    }

    #[test]
    fn rough_relations_can_be_pruned() {
        let mut container = RelationContainer::new();
        container.push_rough(dummy_relation(2, 1));
        container.push_rough(dummy_relation(4, 1));
        container.retain_rough(|r| r.a != BigInt::from(2));
        assert_eq!(container.rough_relations().len(), 1);
    }
}
