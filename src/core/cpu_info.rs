// src/core/cpu_info.rs

use cache_size::l1_cache_size;

/// L1 data-cache-size probe, the CPU cache-size probe external interface
/// from spec.md section 6 ("returns L1 data-cache size in bytes or 0").
pub fn l1_data_cache_size() -> usize {
    l1_cache_size().unwrap_or(0)
}
