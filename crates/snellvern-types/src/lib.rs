// ─────────────────────────────────────────────────────────────────────
// Snell-Vern Drive Matrix — Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Type definitions, configuration, golden constants and error hierarchy
//! shared by the sequence, field and phase components of the drive matrix.

pub mod config;
pub mod error;
pub mod golden;
pub mod values;

pub use config::{MatrixConfig, SequenceStrategy};
pub use error::{MatrixError, MatrixResult};
pub use golden::GoldenConstants;
pub use values::{FieldPoint, PolarPoint, RatioEstimate, SequenceKind};

/// Validate a caller-supplied index against `[0, max_index]`.
pub fn check_index(n: i64, max_index: u64) -> MatrixResult<u64> {
    if n < 0 {
        return Err(MatrixError::invalid_index(n, "index must be >= 0"));
    }
    let n = n as u64;
    if n > max_index {
        return Err(MatrixError::invalid_index(
            n as i64,
            format!("index exceeds max_index {max_index}"),
        ));
    }
    Ok(n)
}
