// ─────────────────────────────────────────────────────────────────────
// Snell-Vern Drive Matrix — Phase State Machine
// ─────────────────────────────────────────────────────────────────────
//! Discrete phase tracker driven by symbolic input and a scalar delta.
//!
//! ```text
//!            symbol                 accepted
//!   Idle ───────────▶ Processing ─────────────▶ Stabilized
//!                        │    │
//!          needs refine  │    │ rejected
//!                        ▼    ▼
//!              DeltaAdjustment  Error (sticky until reset)
//!
//!   delta, from any non-Error state:
//!     |δ| < 0.1  → Stabilized     |δ| > 1.0 or non-finite → Error
//!     otherwise  → DeltaAdjustment
//! ```
//!
//! [`transition`] is the pure rule table; [`PhaseMachine`] owns a state,
//! applies the table and keeps the history.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use snellvern_types::{MatrixConfig, MatrixError, MatrixResult};

use crate::glyph::{GlyphRecognizer, LengthHeuristic, Recognition};

/// |δ| strictly below this converges.
pub const CONVERGENCE_THRESHOLD: f64 = 0.1;
/// |δ| strictly above this diverges.
pub const DIVERGENCE_THRESHOLD: f64 = 1.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseState {
    #[default]
    Idle,
    Processing,
    DeltaAdjustment,
    Stabilized,
    Error,
}

impl PhaseState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Processing => "processing",
            Self::DeltaAdjustment => "delta_adjustment",
            Self::Stabilized => "stabilized",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for PhaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PhaseInput {
    Symbol(Recognition),
    Delta(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseOutcome {
    /// Symbolic input entered processing.
    Received,
    Accepted,
    NeedsRefinement,
    Rejected,
    Converged,
    Refining,
    Divergent,
    /// Input arrived while in `Error`; nothing changed.
    Locked,
}

/// Pure transition rule. `Error` absorbs every input.
pub fn transition(state: PhaseState, input: &PhaseInput) -> (PhaseState, PhaseOutcome) {
    if state == PhaseState::Error {
        return (PhaseState::Error, PhaseOutcome::Locked);
    }
    match input {
        PhaseInput::Symbol(Recognition::Accepted) => {
            (PhaseState::Stabilized, PhaseOutcome::Accepted)
        }
        PhaseInput::Symbol(Recognition::NeedsRefinement) => {
            (PhaseState::DeltaAdjustment, PhaseOutcome::NeedsRefinement)
        }
        PhaseInput::Symbol(Recognition::Rejected(_)) => (PhaseState::Error, PhaseOutcome::Rejected),
        PhaseInput::Delta(delta) => classify_delta(*delta),
    }
}

fn classify_delta(delta: f64) -> (PhaseState, PhaseOutcome) {
    if !delta.is_finite() {
        return (PhaseState::Error, PhaseOutcome::Divergent);
    }
    let magnitude = delta.abs();
    if magnitude < CONVERGENCE_THRESHOLD {
        (PhaseState::Stabilized, PhaseOutcome::Converged)
    } else if magnitude > DIVERGENCE_THRESHOLD {
        (PhaseState::Error, PhaseOutcome::Divergent)
    } else {
        (PhaseState::DeltaAdjustment, PhaseOutcome::Refining)
    }
}

/// One applied transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseTransition {
    pub from: PhaseState,
    pub to: PhaseState,
    pub outcome: PhaseOutcome,
    /// The delta that drove it, for delta transitions.
    pub delta: Option<f64>,
}

impl PhaseTransition {
    /// `Divergent` → `DivergentDelta`, `Locked` → `PhaseLocked`.
    pub fn into_result(self) -> MatrixResult<PhaseTransition> {
        match self.outcome {
            PhaseOutcome::Divergent => Err(MatrixError::DivergentDelta {
                delta: self.delta.unwrap_or(f64::NAN),
            }),
            PhaseOutcome::Locked => Err(MatrixError::PhaseLocked),
            _ => Ok(self),
        }
    }
}

/// Serializable snapshot of a [`PhaseMachine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseInfo {
    pub current_phase: PhaseState,
    pub delta_values: Vec<f64>,
    pub symbolic_input: Option<String>,
    pub transitions: Vec<PhaseTransition>,
    pub metadata: BTreeMap<String, String>,
}

/// Single-writer phase tracker. All mutation goes through `&mut self`.
pub struct PhaseMachine {
    state: PhaseState,
    recognizer: Arc<dyn GlyphRecognizer>,
    delta_values: Vec<f64>,
    symbolic_input: Option<String>,
    transitions: Vec<PhaseTransition>,
    metadata: BTreeMap<String, String>,
}

impl PhaseMachine {
    pub fn new(recognizer: Arc<dyn GlyphRecognizer>) -> Self {
        Self {
            state: PhaseState::Idle,
            recognizer,
            delta_values: Vec::new(),
            symbolic_input: None,
            transitions: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn from_config(config: &MatrixConfig) -> Self {
        Self::new(Arc::new(LengthHeuristic::new(config.refinement_length)))
    }

    /// Start in an arbitrary state instead of `Idle`.
    pub fn starting_in(mut self, state: PhaseState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> PhaseState {
        self.state
    }

    pub fn delta_values(&self) -> &[f64] {
        &self.delta_values
    }

    pub fn transitions(&self) -> &[PhaseTransition] {
        &self.transitions
    }

    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }

    fn record(
        &mut self,
        to: PhaseState,
        outcome: PhaseOutcome,
        delta: Option<f64>,
    ) -> PhaseTransition {
        let from = self.state;
        self.state = to;
        let t = PhaseTransition {
            from,
            to,
            outcome,
            delta,
        };
        self.transitions.push(t);
        log::debug!("phase {from} -> {to} ({outcome:?})");
        t
    }

    fn apply(&mut self, input: &PhaseInput, delta: Option<f64>) -> PhaseTransition {
        let (to, outcome) = transition(self.state, input);
        self.record(to, outcome, delta)
    }

    /// Run `input` through the recognizer and settle the phase.
    ///
    /// Returns the resulting state; a rejected input leaves the machine
    /// in `Error` and is reported as `RejectedInput`.
    pub fn process_symbolic_input(&mut self, input: &str) -> MatrixResult<PhaseState> {
        if self.state == PhaseState::Error {
            log::warn!("symbolic input refused: phase machine is locked in error");
            return Err(MatrixError::PhaseLocked);
        }
        self.symbolic_input = Some(input.to_string());
        self.record(PhaseState::Processing, PhaseOutcome::Received, None);

        let recognition = self.recognizer.recognize(input);
        let t = self.apply(&PhaseInput::Symbol(recognition.clone()), None);

        match recognition {
            Recognition::Rejected(reason) => {
                log::warn!("symbolic input rejected: {reason}");
                Err(MatrixError::RejectedInput {
                    input: input.to_string(),
                    reason,
                })
            }
            _ => Ok(t.to),
        }
    }

    /// Apply one delta. Divergence is reported in the returned outcome,
    /// not as an error; see [`PhaseTransition::into_result`].
    pub fn adjust_phase_delta(&mut self, delta: f64) -> PhaseTransition {
        if self.state == PhaseState::Error {
            log::debug!("delta {delta} ignored: phase machine is locked in error");
            return PhaseTransition {
                from: PhaseState::Error,
                to: PhaseState::Error,
                outcome: PhaseOutcome::Locked,
                delta: Some(delta),
            };
        }
        if !delta.is_finite() {
            log::warn!("non-finite phase delta {delta}");
        }
        self.delta_values.push(delta);
        let t = self.apply(&PhaseInput::Delta(delta), Some(delta));
        if t.outcome == PhaseOutcome::Divergent {
            log::error!("phase delta {delta} diverged; machine locked in error");
        }
        t
    }

    pub fn info(&self) -> PhaseInfo {
        PhaseInfo {
            current_phase: self.state,
            delta_values: self.delta_values.clone(),
            symbolic_input: self.symbolic_input.clone(),
            transitions: self.transitions.clone(),
            metadata: self.metadata.clone(),
        }
    }

    /// Back to `Idle` with empty history. The recognizer is kept.
    pub fn reset(&mut self) {
        log::info!("phase machine reset from {}", self.state);
        self.state = PhaseState::Idle;
        self.delta_values.clear();
        self.symbolic_input = None;
        self.transitions.clear();
        self.metadata.clear();
    }
}

impl Default for PhaseMachine {
    fn default() -> Self {
        Self::new(Arc::new(LengthHeuristic::default()))
    }
}
