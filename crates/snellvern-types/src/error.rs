// ─────────────────────────────────────────────────────────────────────
// Snell-Vern Drive Matrix — Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all drive-matrix failures.
///
/// Every variant carries the offending input so the caller can report it
/// without keeping its own copy.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    /// Negative or otherwise out-of-domain index.
    #[error("invalid index {index}: {reason}")]
    InvalidIndex { index: i64, reason: String },

    /// Closed-form evaluation cannot guarantee exact rounding at this index.
    #[error("precision exceeded at index {index}: error bound {error_bound:e} >= 0.5")]
    PrecisionExceeded { index: u64, error_bound: f64 },

    /// Symbolic input failed recognition.
    #[error("rejected input {input:?}: {reason}")]
    RejectedInput { input: String, reason: String },

    /// Delta magnitude drove the phase machine into `Error`.
    #[error("divergent delta {delta}")]
    DivergentDelta { delta: f64 },

    /// The phase machine is in its sticky `Error` state.
    #[error("phase machine locked in error state; reset required")]
    PhaseLocked,

    /// Field scale must be finite and strictly positive.
    #[error("invalid field scale {0}")]
    InvalidScale(f64),

    /// Sequence name not recognized.
    #[error("unknown sequence {0:?} (expected \"fibonacci\" or \"lucas\")")]
    UnknownSequence(String),

    /// Generating function evaluated at a root of 1 - x - x².
    #[error("singularity at x = {x}: 1 - x - x^2 = 0")]
    Singularity { x: f64 },

    /// Frobenius number is only defined for coprime arguments.
    #[error("frobenius number undefined: gcd({a}, {b}) != 1")]
    NotCoprime { a: u64, b: u64 },

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Numerical invariant violated (NaN/Inf, bound breach).
    #[error("numerical error: {0}")]
    Numerical(String),
}

impl MatrixError {
    pub fn invalid_index(index: i64, reason: impl Into<String>) -> Self {
        Self::InvalidIndex {
            index,
            reason: reason.into(),
        }
    }
}

pub type MatrixResult<T> = Result<T, MatrixError>;
