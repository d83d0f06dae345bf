// src/core/directory_location.rs
//
// Opaque-to-the-core file layout used by the `JsonFileAdapter` reference
// persistence implementation: one directory per N, one file per logical
// artifact, per spec.md section 6 ("Persisted state layout").

use num::BigInt;
use serde::{Deserialize, Serialize};

const SHOW_DIGITS: usize = 22;
const ELLIPSIS: &str = "[...]";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryLocations {
    pub save_directory: String,
    pub parameters_filepath: String,
    pub progress_filepath: String,
    pub rational_factor_pair_filepath: String,
    pub algebraic_factor_pair_filepath: String,
    pub quadratic_factor_pair_filepath: String,
    pub smooth_relations_filepath: String,
    pub rough_relations_filepath: String,
}

impl DirectoryLocations {
    pub fn new(base_dir: &str, save_location: &str) -> Self {
        let save_directory = if base_dir.is_empty() || base_dir == "." {
            save_location.to_string()
        } else {
            format!("{}/{}", base_dir.trim_end_matches('/'), save_location)
        };

        DirectoryLocations {
            parameters_filepath: format!("{}/parameters.json", save_directory),
            progress_filepath: format!("{}/progress.json", save_directory),
            rational_factor_pair_filepath: format!("{}/rational_factor_pairs.json", save_directory),
            algebraic_factor_pair_filepath: format!("{}/algebraic_factor_pairs.json", save_directory),
            quadratic_factor_pair_filepath: format!("{}/quadratic_factor_pairs.json", save_directory),
            smooth_relations_filepath: format!("{}/smooth_relations.json", save_directory),
            rough_relations_filepath: format!("{}/rough_relations.json", save_directory),
            save_directory,
        }
    }

    /// One file per free-relation solution, numbered from 1.
    pub fn free_relation_filepath(&self, solution_index: usize) -> String {
        format!("{}/free_relation_{}.json", self.save_directory, solution_index)
    }

    /// Job directories are keyed by N, eliding the middle of very long
    /// numbers so the directory name stays filesystem-friendly.
    pub fn unique_name_from_n(n: &BigInt) -> String {
        let full = n.to_string();
        if full.len() >= (SHOW_DIGITS * 2) + ELLIPSIS.len() {
            format!("{}{}{}", &full[..SHOW_DIGITS], ELLIPSIS, &full[full.len() - SHOW_DIGITS..])
        } else {
            full
        }
    }
}
