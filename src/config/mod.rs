// src/config/mod.rs

pub mod gnfs_config;

pub use gnfs_config::{BufferConfig, GnfsConfig, PerformanceConfig};
