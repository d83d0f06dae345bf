// src/polynomial/construction.rs
//
// Degree selection and base-m expansion. Deliberately does not search a
// window of candidate bases for the best quality score: base-m + the
// degree table below is the only selection strategy in scope.

use crate::polynomial::polynomial::Polynomial;
use num::{BigInt, One, Signed, Zero};

/// Degree table keyed on N's decimal digit count, exactly the teacher's
/// thresholds.
pub fn calculate_degree(n: &BigInt) -> usize {
    let digits = n.to_string().len();
    if digits < 65 {
        3
    } else if digits < 125 {
        4
    } else if digits < 225 {
        5
    } else if digits < 315 {
        6
    } else {
        7
    }
}

/// Integer nth root via Newton's method, floor(input^(1/n)).
pub fn nth_root(input: &BigInt, n: u32) -> BigInt {
    if input.is_zero() {
        return BigInt::zero();
    }
    if input.is_one() {
        return BigInt::one();
    }
    if n == 0 {
        return BigInt::one();
    }
    if n == 1 {
        return input.clone();
    }

    let input_bits = input.bits();
    let root_bits = (input_bits / n as u64).max(1);
    let mut x = BigInt::one() << root_bits;
    if x.is_zero() {
        x = BigInt::one();
    }

    let n_bigint = BigInt::from(n);
    let n_minus_1 = BigInt::from(n - 1);

    for _ in 0..1000 {
        let x_pow_n_minus_1 = x.pow(n - 1);
        if x_pow_n_minus_1.is_zero() {
            x = BigInt::one();
            continue;
        }

        let numerator = &n_minus_1 * &x + input / &x_pow_n_minus_1;
        let x_next = numerator / &n_bigint;

        if x_next == x {
            return finish_nth_root(x, input, n);
        }

        let diff = (&x_next - &x).abs();
        if diff == BigInt::one() {
            let smaller = if x < x_next { x.clone() } else { x_next.clone() };
            let larger = if x >= x_next { x } else { x_next };
            let larger_pow = larger.pow(n);
            if larger_pow == *input {
                return larger;
            }
            let smaller_pow = smaller.pow(n);
            if smaller_pow <= *input && larger_pow > *input {
                return smaller;
            }
            return smaller;
        }

        x = x_next;
    }
    x
}

fn finish_nth_root(x: BigInt, input: &BigInt, n: u32) -> BigInt {
    let x_pow_n = x.pow(n);
    if x_pow_n <= *input {
        let x_plus_one = &x + 1;
        let x_plus_one_pow_n = x_plus_one.pow(n);
        if x_plus_one_pow_n <= *input {
            return x_plus_one;
        }
    }
    x
}

/// Base-m expansion: writes n in base m, using the digits as coefficients,
/// so that f(m) = n exactly. Overflow past `degree` digits is folded into
/// the leading coefficient, matching the teacher's handling.
pub fn construct_for_base(n: &BigInt, m: &BigInt, degree: usize) -> Polynomial {
    let mut coefficients = Vec::with_capacity(degree + 1);
    let mut remainder = n.clone();

    for _ in 0..=degree {
        let coefficient = &remainder % m;
        coefficients.push(coefficient);
        remainder /= m;
    }

    if remainder > BigInt::zero() {
        if let Some(last) = coefficients.last_mut() {
            *last += remainder;
        }
    }

    Polynomial::new(coefficients)
}

/// Selects (polynomial, base) for N at the given degree: m = floor(N^(1/d)),
/// f built via base-m expansion so that f(m) = N.
pub fn select_polynomial_base(n: &BigInt, degree: usize) -> (Polynomial, BigInt) {
    let m = nth_root(n, degree as u32);
    let poly = construct_for_base(n, &m, degree);
    (poly, m)
}
