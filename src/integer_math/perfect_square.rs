// src/integer_math/perfect_square.rs
//
// A perfect-square predicate for the matrix stage's congruence-of-squares
// validity check (spec.md 4.8: "S_k is accepted... iff the product of
// rational norms is a perfect square AND the product of algebraic norms is
// a perfect square"). This is a numeric predicate only, not the square-root
// extraction stage itself (out of scope per spec.md 1).

use num::{BigInt, Signed, Zero};

/// True iff `n` is a nonzero perfect square. Negative numbers and zero are
/// never accepted: a negative product cannot be a real square, and the
/// all-zero relation subset is degenerate.
pub fn is_perfect_square(n: &BigInt) -> bool {
    if n.is_zero() || n.is_negative() {
        return false;
    }
    let root = n.sqrt();
    &root * &root == *n
}
