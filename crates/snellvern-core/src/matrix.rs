// ─────────────────────────────────────────────────────────────────────
// Snell-Vern Drive Matrix — Facade
// ─────────────────────────────────────────────────────────────────────
//! `DriveMatrix` composes the sequence core, the field core and the phase
//! machine behind one object with a coarse operational state. It adds no
//! arithmetic of its own; delegate errors propagate unchanged and leave
//! the matrix in `MatrixState::Error` until the next successful call.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use snellvern_math::{
    egyptian_fraction_4_7_11, frobenius_number, FieldCore, SequenceCore, SignatureSummary,
};
use snellvern_types::{
    FieldPoint, GoldenConstants, MatrixConfig, MatrixError, MatrixResult, PolarPoint,
    RatioEstimate, SequenceKind,
};

use crate::cache::SequenceCache;
use crate::glyph::{GlyphRecognizer, LengthHeuristic};
use crate::phase::{PhaseInfo, PhaseMachine, PhaseOutcome, PhaseState, PhaseTransition};

const RESULT_SEQUENCES: &str = "sequences";
const RESULT_FIELD: &str = "field";
const RESULT_R_THETA: &str = "r_theta_field";
const RESULT_LUCAS: &str = "lucas_analysis";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixState {
    #[default]
    Idle,
    Computing,
    FieldAnalysis,
    PhaseSync,
    Complete,
    Error,
}

impl fmt::Display for MatrixState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Computing => "computing",
            Self::FieldAnalysis => "field_analysis",
            Self::PhaseSync => "phase_sync",
            Self::Complete => "complete",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceTable {
    pub fibonacci: BTreeMap<u64, BigUint>,
    pub lucas: BTreeMap<u64, BigUint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LucasAnalysis {
    pub phi: f64,
    pub psi: f64,
    /// Ratio estimate at the requested index.
    pub estimate: RatioEstimate,
    pub ratios: BTreeMap<u64, RatioEstimate>,
    /// Analytic (lower, upper) bounds per index.
    pub error_bounds: BTreeMap<u64, (f64, f64)>,
    pub signature: SignatureSummary,
    pub egyptian_fraction: (u64, u64),
    pub frobenius_4_7: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldenFieldAnalysis {
    pub golden_angle_degrees: f64,
    pub phi: f64,
    pub psi: f64,
    pub samples: Vec<FieldPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixStatus {
    pub matrix_state: MatrixState,
    pub phase_info: PhaseInfo,
    pub field_data_count: usize,
    pub cached_fibonacci: usize,
    pub cached_lucas: usize,
    pub computed_results: Vec<String>,
}

/// Unified engine over sequences, field geometry and phase tracking.
pub struct DriveMatrix {
    config: MatrixConfig,
    state: MatrixState,
    sequences: SequenceCore,
    field: FieldCore,
    phase: PhaseMachine,
    cache: Arc<SequenceCache>,
    field_data: Vec<FieldPoint>,
    computed: BTreeSet<&'static str>,
}

impl DriveMatrix {
    /// Build from a validated config with the shared golden constants.
    pub fn new(config: MatrixConfig) -> MatrixResult<Self> {
        Self::with_golden_constants(config, *GoldenConstants::shared())
    }

    pub fn with_golden_constants(
        config: MatrixConfig,
        golden: GoldenConstants,
    ) -> MatrixResult<Self> {
        config.validate()?;
        golden.verify()?;
        let sequences = SequenceCore::new(golden, config.strategy, config.max_index);
        let field = FieldCore::new(golden, config.root_scale)?;
        let phase = PhaseMachine::new(Arc::new(LengthHeuristic::new(config.refinement_length)));
        log::info!(
            "drive matrix ready (strategy {:?}, max_index {}, root_scale {})",
            config.strategy,
            config.max_index,
            config.root_scale
        );
        Ok(Self {
            config,
            state: MatrixState::Idle,
            sequences,
            field,
            phase,
            cache: Arc::new(SequenceCache::new()),
            field_data: Vec::new(),
            computed: BTreeSet::new(),
        })
    }

    /// Replace the glyph recognizer. Resets the phase machine.
    pub fn with_recognizer(mut self, recognizer: Arc<dyn GlyphRecognizer>) -> Self {
        self.phase = PhaseMachine::new(recognizer);
        self
    }

    /// Use a cache shared with other matrices.
    pub fn with_cache(mut self, cache: Arc<SequenceCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn state(&self) -> MatrixState {
        self.state
    }

    pub fn config(&self) -> &MatrixConfig {
        &self.config
    }

    pub fn sequences(&self) -> &SequenceCore {
        &self.sequences
    }

    pub fn field(&self) -> &FieldCore {
        &self.field
    }

    pub fn phase(&self) -> &PhaseMachine {
        &self.phase
    }

    pub fn cache(&self) -> &Arc<SequenceCache> {
        &self.cache
    }

    fn finish<T>(&mut self, key: &'static str, result: MatrixResult<T>) -> MatrixResult<T> {
        match &result {
            Ok(_) => {
                self.state = MatrixState::Complete;
                self.computed.insert(key);
            }
            Err(e) => {
                log::warn!("{key} failed: {e}");
                self.state = MatrixState::Error;
            }
        }
        result
    }

    // ── Phase ───────────────────────────────────────────────────────

    /// Feed symbolic input to the phase machine.
    pub fn process_input(&mut self, input: &str) -> MatrixResult<MatrixState> {
        self.state = MatrixState::Computing;
        match self.phase.process_symbolic_input(input) {
            Ok(PhaseState::Stabilized) => self.state = MatrixState::Complete,
            Ok(_) => self.state = MatrixState::PhaseSync,
            Err(e) => {
                self.state = MatrixState::Error;
                return Err(e);
            }
        }
        Ok(self.state)
    }

    pub fn adjust_phase(&mut self, delta: f64) -> PhaseTransition {
        let t = self.phase.adjust_phase_delta(delta);
        self.state = match t.outcome {
            PhaseOutcome::Converged => MatrixState::Complete,
            PhaseOutcome::Divergent | PhaseOutcome::Locked => MatrixState::Error,
            _ => MatrixState::PhaseSync,
        };
        t
    }

    // ── Sequences ───────────────────────────────────────────────────

    /// F(0..=max_n) and L(0..=max_n), served through the cache.
    pub fn compute_sequences(&mut self, max_n: i64) -> MatrixResult<SequenceTable> {
        self.state = MatrixState::Computing;
        let result = self.sequence_table(max_n);
        self.finish(RESULT_SEQUENCES, result)
    }

    fn sequence_table(&self, max_n: i64) -> MatrixResult<SequenceTable> {
        Ok(SequenceTable {
            fibonacci: self
                .cache
                .prefix(&self.sequences, SequenceKind::Fibonacci, max_n)?,
            lucas: self.cache.prefix(&self.sequences, SequenceKind::Lucas, max_n)?,
        })
    }

    /// L(n+1)/L(n) for 1..=max_n plus the 4-7-11 signature facts.
    pub fn analyze_lucas_ratios(&mut self, max_n: i64) -> MatrixResult<LucasAnalysis> {
        self.state = MatrixState::FieldAnalysis;
        let result = self.lucas_analysis(max_n);
        self.finish(RESULT_LUCAS, result)
    }

    fn lucas_analysis(&self, max_n: i64) -> MatrixResult<LucasAnalysis> {
        let series = self.sequences.ratio_series(max_n)?;
        let estimate = series
            .last()
            .map(|(r, _)| *r)
            .ok_or_else(|| MatrixError::Numerical(format!("empty ratio series for {max_n}")))?;
        let mut ratios = BTreeMap::new();
        let mut error_bounds = BTreeMap::new();
        for (r, bounds) in series {
            ratios.insert(r.n, r);
            error_bounds.insert(r.n, bounds);
        }
        let golden = self.sequences.golden();
        Ok(LucasAnalysis {
            phi: golden.phi,
            psi: golden.psi,
            estimate,
            ratios,
            error_bounds,
            signature: self.sequences.signature_summary()?,
            egyptian_fraction: egyptian_fraction_4_7_11(),
            frobenius_4_7: frobenius_number(4, 7)?,
        })
    }

    // ── Field ───────────────────────────────────────────────────────

    /// Phyllotaxis points for [start, end]; empty when start > end.
    pub fn compute_field(&mut self, start: i64, end: i64) -> MatrixResult<Vec<FieldPoint>> {
        self.state = MatrixState::FieldAnalysis;
        let result = self.field.points(start, end);
        if let Ok(points) = &result {
            self.field_data = points.clone();
        }
        self.finish(RESULT_FIELD, result)
    }

    /// φ-radian (r, θ) points for [start, end], start ≥ 1.
    pub fn compute_r_theta_field(
        &mut self,
        start: i64,
        end: i64,
    ) -> MatrixResult<Vec<PolarPoint>> {
        self.state = MatrixState::FieldAnalysis;
        let result = self.field.polar_points(start, end);
        self.finish(RESULT_R_THETA, result)
    }

    pub fn get_golden_field_analysis(&self) -> MatrixResult<GoldenFieldAnalysis> {
        let count = self.config.golden_sample_count as i64;
        let samples = (1..=count)
            .map(|n| self.field.point(n))
            .collect::<MatrixResult<Vec<_>>>()?;
        let golden = self.sequences.golden();
        Ok(GoldenFieldAnalysis {
            golden_angle_degrees: self.field.golden_angle(),
            phi: golden.phi,
            psi: golden.psi,
            samples,
        })
    }

    // ── Status ──────────────────────────────────────────────────────

    pub fn status(&self) -> MatrixStatus {
        MatrixStatus {
            matrix_state: self.state,
            phase_info: self.phase.info(),
            field_data_count: self.field_data.len(),
            cached_fibonacci: self.cache.len(SequenceKind::Fibonacci),
            cached_lucas: self.cache.len(SequenceKind::Lucas),
            computed_results: self.computed.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Back to `Idle`. The sequence cache survives.
    pub fn reset(&mut self) {
        log::info!("drive matrix reset from {}", self.state);
        self.state = MatrixState::Idle;
        self.phase.reset();
        self.field_data.clear();
        self.computed.clear();
    }
}
