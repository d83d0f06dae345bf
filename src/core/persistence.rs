// src/core/persistence.rs
//
// The external persistence/log-sink interfaces the core consumes (spec.md
// section 6): concrete disk encoding is a host concern, but a JSON
// reference adapter is provided here (grounded on the teacher's
// `core/serialization` module) so the crate is independently testable
// without a host.

use std::fs;
use std::path::Path;

use log::info;
use num::BigInt;
use serde::{Deserialize, Serialize};

use crate::core::directory_location::DirectoryLocations;
use crate::core::gnfs::GNFS;
use crate::core::solution::Solution;
use crate::error::{GnfsError, GnfsResult};
use crate::factor::factor_base::FactorBase;
use crate::factor::factor_pair::FactorPair;
use crate::relation_sieve::relation::Relation;

/// Host collaborator: save/load hooks for a factorization job, keyed by an
/// opaque job id. `GNFS` itself does not implement `Serialize` (it owns a
/// `PrimeFactory` cache that is not meaningfully persisted), so adapters
/// work from the snapshot types below.
pub trait PersistenceAdapter {
    fn save_all(&self, gnfs: &GNFS) -> GnfsResult<()>;
    fn append_smooth(&self, job_id: &str, relation: &Relation) -> GnfsResult<()>;
    fn load_all(&self, job_id: &str) -> GnfsResult<GnfsSnapshot>;
    fn load_smooth_relations(&self, job_id: &str) -> GnfsResult<Vec<Relation>>;
    fn save_free_solution(&self, job_id: &str, index: usize, relations: &[Relation]) -> GnfsResult<()>;
}

/// A single function taking a message string, per spec.md section 6's "Log
/// sink" interface.
pub trait LogSink {
    fn log(&self, message: &str);
}

/// `log`-crate-backed `LogSink`, matching the teacher's `env_logger` wiring.
pub struct DefaultLogSink;

impl LogSink for DefaultLogSink {
    fn log(&self, message: &str) {
        info!("{}", message);
    }
}

/// Everything `saveAll` persists: orchestrator scalars, sieve progress, and
/// factor-pair collections. Smooth relations stream separately via
/// `appendSmooth`/`loadSmoothRelations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GnfsSnapshot {
    pub n: BigInt,
    pub polynomial_base: BigInt,
    pub polynomial_degree: usize,
    pub polynomial_coefficients: Vec<BigInt>,
    pub prime_factor_base_bounds: FactorBaseBounds,
    pub rational_factor_pair_collection: Vec<FactorPair>,
    pub algebraic_factor_pair_collection: Vec<FactorPair>,
    pub quadratic_factor_pair_collection: Vec<FactorPair>,
    pub sieve_a: BigInt,
    pub sieve_b: BigInt,
    pub sieve_max_b: BigInt,
    pub sieve_value_range: BigInt,
    pub smooth_relations_target_quantity: usize,
    pub smooth_relations_counter: usize,
    pub factorization: Option<Solution>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorBaseBounds {
    pub rational_factor_base_max: BigInt,
    pub algebraic_factor_base_max: BigInt,
    pub quadratic_factor_base_min: BigInt,
    pub quadratic_factor_base_max: BigInt,
    pub quadratic_base_count: usize,
}

impl From<&FactorBase> for FactorBaseBounds {
    fn from(base: &FactorBase) -> Self {
        FactorBaseBounds {
            rational_factor_base_max: base.rational_factor_base_max.clone(),
            algebraic_factor_base_max: base.algebraic_factor_base_max.clone(),
            quadratic_factor_base_min: base.quadratic_factor_base_min.clone(),
            quadratic_factor_base_max: base.quadratic_factor_base_max.clone(),
            quadratic_base_count: base.quadratic_base_count,
        }
    }
}

impl GnfsSnapshot {
    pub fn from_gnfs(gnfs: &GNFS) -> Self {
        GnfsSnapshot {
            n: gnfs.n.clone(),
            polynomial_base: gnfs.polynomial_base.clone(),
            polynomial_degree: gnfs.polynomial_degree,
            polynomial_coefficients: gnfs.current_polynomial.coefficients().to_vec(),
            prime_factor_base_bounds: FactorBaseBounds::from(&gnfs.prime_factor_base),
            rational_factor_pair_collection: gnfs.rational_factor_pair_collection.clone(),
            algebraic_factor_pair_collection: gnfs.algebraic_factor_pair_collection.clone(),
            quadratic_factor_pair_collection: gnfs.quadratic_factor_pair_collection.clone(),
            sieve_a: gnfs.current_relations_progress.a.clone(),
            sieve_b: gnfs.current_relations_progress.b.clone(),
            sieve_max_b: gnfs.current_relations_progress.max_b.clone(),
            sieve_value_range: gnfs.current_relations_progress.value_range.clone(),
            smooth_relations_target_quantity: gnfs.current_relations_progress.smooth_relations_target_quantity,
            smooth_relations_counter: gnfs.current_relations_progress.smooth_relations_counter,
            factorization: gnfs.factorization.clone(),
        }
    }
}

/// Reference `PersistenceAdapter`: one directory per N (via
/// `DirectoryLocations`), one JSON file per artifact, smooth relations
/// appended as a JSON-lines stream.
pub struct JsonFileAdapter {
    base_directory: String,
}

impl JsonFileAdapter {
    pub fn new(base_directory: impl Into<String>) -> Self {
        JsonFileAdapter { base_directory: base_directory.into() }
    }

    fn locations(&self, job_id: &str) -> DirectoryLocations {
        DirectoryLocations::new(&self.base_directory, job_id)
    }

    fn write_json<T: Serialize>(path: &str, value: &T) -> GnfsResult<()> {
        let json = serde_json::to_string_pretty(value).map_err(|e| GnfsError::Persistence(e.to_string()))?;
        fs::write(path, json).map_err(|e| GnfsError::Persistence(e.to_string()))
    }

    fn read_json<T: for<'de> Deserialize<'de>>(path: &str) -> GnfsResult<T> {
        let text = fs::read_to_string(path).map_err(|e| GnfsError::Persistence(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| GnfsError::Persistence(e.to_string()))
    }
}

impl PersistenceAdapter for JsonFileAdapter {
    fn save_all(&self, gnfs: &GNFS) -> GnfsResult<()> {
        let locations = &gnfs.save_locations;
        if !Path::new(&locations.save_directory).exists() {
            fs::create_dir_all(&locations.save_directory).map_err(|e| GnfsError::Persistence(e.to_string()))?;
        }
        let snapshot = GnfsSnapshot::from_gnfs(gnfs);
        Self::write_json(&locations.parameters_filepath, &snapshot)?;
        Self::write_json(&locations.rational_factor_pair_filepath, &gnfs.rational_factor_pair_collection)?;
        Self::write_json(&locations.algebraic_factor_pair_filepath, &gnfs.algebraic_factor_pair_collection)?;
        Self::write_json(&locations.quadratic_factor_pair_filepath, &gnfs.quadratic_factor_pair_collection)
    }

    fn append_smooth(&self, job_id: &str, relation: &Relation) -> GnfsResult<()> {
        use std::io::Write;
        let locations = self.locations(job_id);
        if !Path::new(&locations.save_directory).exists() {
            fs::create_dir_all(&locations.save_directory).map_err(|e| GnfsError::Persistence(e.to_string()))?;
        }
        let line = serde_json::to_string(relation).map_err(|e| GnfsError::Persistence(e.to_string()))?;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&locations.smooth_relations_filepath)
            .map_err(|e| GnfsError::Persistence(e.to_string()))?;
        writeln!(file, "{}", line).map_err(|e| GnfsError::Persistence(e.to_string()))
    }

    fn load_all(&self, job_id: &str) -> GnfsResult<GnfsSnapshot> {
        let locations = self.locations(job_id);
        Self::read_json(&locations.parameters_filepath)
    }

    fn load_smooth_relations(&self, job_id: &str) -> GnfsResult<Vec<Relation>> {
        let locations = self.locations(job_id);
        if !Path::new(&locations.smooth_relations_filepath).exists() {
            return Ok(Vec::new());
        }
        let text =
            fs::read_to_string(&locations.smooth_relations_filepath).map_err(|e| GnfsError::Persistence(e.to_string()))?;
        text.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(|e| GnfsError::Persistence(e.to_string())))
            .collect()
    }

    fn save_free_solution(&self, job_id: &str, index: usize, relations: &[Relation]) -> GnfsResult<()> {
        let locations = self.locations(job_id);
        Self::write_json(&locations.free_relation_filepath(index), &relations.to_vec())
    }
}
