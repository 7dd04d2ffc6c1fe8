// ─────────────────────────────────────────────────────────────────────
// Snell-Vern Drive Matrix — Core Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Phase-state tracking, glyph recognition, the shared sequence cache
//! and the `DriveMatrix` facade over the sequence and field cores.
//!
//! # Phase Invariants
//!
//! 1. **Error is sticky**: once the phase machine enters `Error`, delta
//!    input returns `PhaseOutcome::Locked` and symbolic input fails with
//!    `PhaseLocked`. Only `reset()` returns the machine to `Idle`.
//!
//! 2. **Fixed thresholds**: |δ| < 0.1 converges, |δ| > 1.0 diverges and a
//!    non-finite δ always diverges. Neither threshold is configurable.
//!
//! 3. **Deltas are memoryless**: the machine records every applied delta,
//!    but a transition depends only on the current state and the new input.

pub mod cache;
pub mod glyph;
pub mod matrix;
pub mod phase;

#[cfg(test)]
mod tests_proptest;

pub use cache::SequenceCache;
pub use glyph::{
    ExternalRecognizer, GlyphRecognizer, LengthHeuristic, Recognition, TokenSetRecognizer,
};
pub use matrix::{
    DriveMatrix, GoldenFieldAnalysis, LucasAnalysis, MatrixState, MatrixStatus, SequenceTable,
};
pub use phase::{
    transition, PhaseInfo, PhaseInput, PhaseMachine, PhaseOutcome, PhaseState, PhaseTransition,
    CONVERGENCE_THRESHOLD, DIVERGENCE_THRESHOLD,
};
