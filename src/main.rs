// src/main.rs
//
// Thin host: wires up logging/config and runs one factorization job to
// completion against small inputs as a smoke-test entry point. A real host
// (distributed workers, a web frontend, a CLI with resumption) is out of
// scope per spec.md's Non-goals; this binary exists so the crate is
// runnable end-to-end the way the teacher's own main.rs is.

use env_logger::Env;
use log::info;
use num::BigInt;
use rand::rngs::StdRng;
use rand::SeedableRng;

use gnfs::config::GnfsConfig;
use gnfs::core::cancellation_token::CancellationToken;
use gnfs::core::gnfs::GNFS;
use gnfs::core::persistence::{JsonFileAdapter, PersistenceAdapter};

fn main() {
    let env = Env::default().filter_or("GNFS_LOG_LEVEL", "info").write_style_or("GNFS_LOG_STYLE", "always");
    env_logger::Builder::from_env(env).init();

    let config = GnfsConfig::load().unwrap_or_else(|e| {
        log::warn!("falling back to default configuration: {}", e);
        GnfsConfig::default()
    });

    if let Some(threads) = config.threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(threads).build_global() {
            log::warn!("could not apply configured thread count: {}", e);
        }
    }

    let n = BigInt::from(45113);
    let m = BigInt::from(31);
    let cancel = CancellationToken::new();

    let mut gnfs = match GNFS::create_job(&n, &m, Some(3), &BigInt::from(29), 5, &BigInt::from(200), true, &cancel) {
        Ok(gnfs) => gnfs,
        Err(e) => {
            log::error!("failed to create job: {}", e);
            return;
        }
    };

    info!("{}", gnfs);

    if let Err(e) = gnfs.generate_relations(&cancel) {
        log::error!("sieving failed: {}", e);
        return;
    }
    info!("sieved {} smooth relations", gnfs.current_relations_progress.smooth_relations_counter);

    let mut rng = StdRng::seed_from_u64(0);
    match gnfs.solve_matrix(&mut rng, &cancel) {
        Ok(count) => info!("matrix step accepted {} congruence(s) of squares", count),
        Err(e) => log::error!("matrix step failed: {}", e),
    }

    let adapter = JsonFileAdapter::new(&config.output_dir);
    if let Err(e) = adapter.save_all(&gnfs) {
        log::error!("failed to persist job state: {}", e);
    }

    if config.cleanup {
        let _ = std::fs::remove_dir_all(&gnfs.save_locations.save_directory);
    }
}
