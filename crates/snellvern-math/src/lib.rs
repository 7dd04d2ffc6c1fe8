// ─────────────────────────────────────────────────────────────────────
// Snell-Vern Drive Matrix — Sequence & Field Mathematics
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Exact Fibonacci/Lucas arithmetic, ratio-to-φ convergence bounds,
//! generating functions, continued fractions, the 4-7-11 signature and
//! golden-angle field geometry.
//!
//! # Numerical Invariants
//!
//! 1. **No silent rounding**: a closed-form value is only rounded to an
//!    integer when its forward error bound is below 0.5 and the observed
//!    drift agrees with the bound. Otherwise the result comes from integer
//!    recurrence or the call fails with `PrecisionExceeded`.
//!
//! 2. **Ratio bounds are checked, not assumed**: every `RatioEstimate`
//!    satisfies `deviation <= bound`; a breach is a `Numerical` error.
//!
//! 3. **Field angles stay in [0°, 360°)** for every non-negative index.

pub mod binet;
pub mod continued_fraction;
pub mod field;
pub mod generating;
pub mod ratio;
pub mod recurrence;
pub mod sequence;
pub mod signature;

#[cfg(test)]
mod tests_proptest;

pub use binet::{closed_form_limit, ClosedForm};
pub use continued_fraction::LucasContinuedFraction;
pub use field::FieldCore;
pub use generating::{gf_fibonacci, gf_lucas, RationalSeries};
pub use recurrence::SequenceIter;
pub use sequence::SequenceCore;
pub use signature::{
    egyptian_fraction_4_7_11, egyptian_sum, frobenius_number, SignatureSummary,
};
