// tests/end_to_end.rs
//
// End-to-end exercise of the full setup -> sieve -> matrix pipeline against
// the small-N scenario from spec.md 8 ("Sieve of small N").

use gnfs::core::cancellation_token::CancellationToken;
use gnfs::core::gnfs::GNFS;
use num::BigInt;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn cleanup(gnfs: &GNFS) {
    let _ = std::fs::remove_dir_all(&gnfs.save_locations.save_directory);
}

#[test]
fn small_n_sieves_enough_relations_and_yields_a_valid_congruence() {
    // N=1649, m=7, d=2, B_rat=29, per spec.md 8's concrete scenario.
    let n = BigInt::from(1649);
    let m = BigInt::from(7);
    let cancel = CancellationToken::new();

    let mut gnfs = GNFS::create_job(&n, &m, Some(2), &BigInt::from(29), 5, &BigInt::from(400), true, &cancel)
        .expect("job creation should succeed for a small N");

    gnfs.generate_relations(&cancel).expect("sieving should not fail");
    let required = gnfs.smooth_relations_required_for_matrix_step().unwrap();
    assert!(
        gnfs.current_relations_progress.smooth_relations_counter >= required
            || gnfs.current_relations_progress.b > gnfs.current_relations_progress.max_b,
        "sieving should either reach the required count or exhaust MaxB"
    );

    let mut rng = StdRng::seed_from_u64(42);
    let accepted = gnfs.solve_matrix(&mut rng, &cancel).expect("matrix step should not fail");

    for solution in gnfs.current_relations_progress.relations.free_relations() {
        let rational_product = solution.iter().fold(BigInt::from(1), |acc, r| acc * &r.rational_norm);
        assert!(
            gnfs::integer_math::perfect_square::is_perfect_square(&rational_product),
            "every accepted free relation must have a perfect-square rational norm product"
        );
    }

    let _ = accepted;
    cleanup(&gnfs);
}

#[test]
fn polynomial_round_trips_for_the_documented_seed() {
    // N=45113, m=31, d=3 -> coefficients [29, 6, 6, 1], per spec.md 8.
    let n = BigInt::from(45113);
    let m = BigInt::from(31);
    let cancel = CancellationToken::new();

    let gnfs = GNFS::create_job(&n, &m, Some(3), &BigInt::from(29), 5, &BigInt::from(50), true, &cancel).unwrap();
    assert_eq!(
        gnfs.current_polynomial.coefficients(),
        &[BigInt::from(29), BigInt::from(6), BigInt::from(6), BigInt::from(1)]
    );
    assert_eq!(gnfs.current_polynomial.evaluate(&m), n);
    cleanup(&gnfs);
}
