// src/config/gnfs_config.rs

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level runtime configuration: where job state lives, how much
/// parallelism to use, and the tuning knobs for the sieve/matrix stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GnfsConfig {
    /// Base directory under which each job's save directory is created.
    pub output_dir: String,

    /// Remove a job's save directory after a solution is accepted.
    pub cleanup: bool,

    /// Rayon thread pool size; `None` uses Rayon's default (num CPUs).
    pub threads: Option<usize>,

    /// Logging level (error, warn, info, debug, trace).
    pub log_level: String,

    pub buffer: BufferConfig,
    pub performance: PerformanceConfig,
}

/// Batching knobs for relation persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BufferConfig {
    /// Flush smooth relations to disk once buffered memory crosses this.
    pub max_memory_bytes: usize,
    /// Don't flush before at least this many relations are buffered.
    pub min_relations: usize,
    /// Flush regardless of memory once this many relations are buffered.
    pub max_relations: usize,
}

/// Multipliers applied on top of the spec's fixed bound formulas, for
/// operators who need to trade runtime against smooth-relation yield.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    pub prime_bound_multiplier: f64,
    pub relation_quantity_multiplier: f64,
}

impl Default for GnfsConfig {
    fn default() -> Self {
        GnfsConfig {
            output_dir: ".".to_string(),
            cleanup: false,
            threads: None,
            log_level: "info".to_string(),
            buffer: BufferConfig::default(),
            performance: PerformanceConfig::default(),
        }
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        BufferConfig {
            max_memory_bytes: 100 * 1024 * 1024,
            min_relations: 25,
            max_relations: 1000,
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        PerformanceConfig {
            prime_bound_multiplier: 1.0,
            relation_quantity_multiplier: 1.0,
        }
    }
}

impl GnfsConfig {
    /// Precedence: `gnfs.toml`/`gnfs.yaml` in the working directory, then
    /// `GNFS_`-prefixed environment variables, then the defaults above.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Self::defaults_builder()?;

        if Path::new("gnfs.toml").exists() {
            builder = builder.add_source(File::with_name("gnfs.toml"));
        } else if Path::new("gnfs.yaml").exists() {
            builder = builder.add_source(File::with_name("gnfs.yaml"));
        }

        builder = builder.add_source(Environment::with_prefix("GNFS").separator("_").try_parsing(true));

        builder.build()?.try_deserialize()
    }

    /// Same precedence as `load`, but reads from `path` instead of probing
    /// the working directory for `gnfs.toml`/`gnfs.yaml`.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut builder = Self::defaults_builder()?;

        if path.as_ref().exists() {
            builder = builder.add_source(File::from(path.as_ref()));
        }

        builder = builder.add_source(Environment::with_prefix("GNFS").separator("_").try_parsing(true));

        builder.build()?.try_deserialize()
    }

    fn defaults_builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Ok(Config::builder()
            .set_default("output_dir", ".")?
            .set_default("cleanup", false)?
            .set_default("log_level", "info")?
            .set_default("buffer.max_memory_bytes", 100 * 1024 * 1024)?
            .set_default("buffer.min_relations", 25)?
            .set_default("buffer.max_relations", 1000)?
            .set_default("performance.prime_bound_multiplier", 1.0)?
            .set_default("performance.relation_quantity_multiplier", 1.0)?)
    }
}
