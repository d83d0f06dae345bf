// src/error.rs

use num::BigInt;
use std::fmt;

/// Every error kind the GNFS core can surface to its host, per the error
/// handling design: recoverable conditions are not represented here (they
/// are silently discarded at the call site), only the kinds that must
/// propagate.
#[derive(Debug, Clone)]
pub enum GnfsError {
    /// N < 2, m <= 1, d < 2, or f(m) != N.
    InvalidInput(String),

    /// Legendre called with p < 2, or SymbolSearch goal not in {-1,0,1}.
    OutOfRange(String),

    /// Negative trial-division inputs, non-integral algebraic norm,
    /// row/column size mismatch in matrix XOR, solve requested before
    /// elimination, or a requested solution index >= free-column count.
    InternalInvariantViolation(String),

    /// SymbolSearch exhausted its range without finding a match.
    NotFound(String),

    /// Cancellation token tripped at a suspension point.
    Cancelled,

    /// Prime-cache expansion would exceed i32::MAX.
    OverflowBound(BigInt),

    /// A job directory for this N already exists and overwrite was not requested.
    AlreadyExists(String),

    /// The persistence adapter failed to read or write state.
    Persistence(String),
}

impl fmt::Display for GnfsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GnfsError::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            GnfsError::OutOfRange(msg) => write!(f, "argument out of range: {}", msg),
            GnfsError::InternalInvariantViolation(msg) => {
                write!(f, "internal invariant violated: {}", msg)
            }
            GnfsError::NotFound(msg) => write!(f, "not found: {}", msg),
            GnfsError::Cancelled => write!(f, "operation cancelled"),
            GnfsError::OverflowBound(v) => {
                write!(f, "prime cache bound overflow: requested {}", v)
            }
            GnfsError::AlreadyExists(name) => write!(f, "job already exists: {}", name),
            GnfsError::Persistence(msg) => write!(f, "persistence error: {}", msg),
        }
    }
}

impl std::error::Error for GnfsError {}

pub type GnfsResult<T> = Result<T, GnfsError>;
