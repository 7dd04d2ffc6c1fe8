// ─────────────────────────────────────────────────────────────────────
// Snell-Vern Drive Matrix — Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{MatrixError, MatrixResult};

/// How exact sequence values are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceStrategy {
    /// Closed form while the precision guard holds, integer recurrence beyond.
    #[default]
    Guarded,
    /// Closed form only; a guard trip is reported as `PrecisionExceeded`.
    ClosedFormOnly,
    /// Integer recurrence for every index.
    Recurrence,
}

/// Runtime configuration for the drive matrix.
///
/// The phase-delta thresholds (0.1 / 1.0) are fixed constants of the
/// phase machine and intentionally absent here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixConfig {
    /// Phyllotaxis radius scale: r(n) = root_scale · √n.
    /// Default: 3.0.
    pub root_scale: f64,

    /// Largest sequence index accepted by any operation.
    /// Default: 100_000.
    pub max_index: u64,

    /// Sequence evaluation strategy.
    /// Default: `Guarded`.
    pub strategy: SequenceStrategy,

    /// Symbolic inputs longer than this (in chars) need delta refinement.
    /// Default: 100.
    pub refinement_length: usize,

    /// Number of indices sampled by the golden field analysis.
    /// Default: 10.
    pub golden_sample_count: usize,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            root_scale: 3.0,
            max_index: 100_000,
            strategy: SequenceStrategy::Guarded,
            refinement_length: 100,
            golden_sample_count: 10,
        }
    }
}

impl MatrixConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> MatrixResult<()> {
        if !self.root_scale.is_finite() || self.root_scale <= 0.0 {
            return Err(MatrixError::Config(format!(
                "root_scale must be finite and > 0, got {}",
                self.root_scale
            )));
        }
        if self.max_index < 1 {
            return Err(MatrixError::Config(format!(
                "max_index must be >= 1, got {}",
                self.max_index
            )));
        }
        if self.max_index > i64::MAX as u64 {
            return Err(MatrixError::Config(format!(
                "max_index must fit in i64, got {}",
                self.max_index
            )));
        }
        if self.refinement_length < 1 {
            return Err(MatrixError::Config(format!(
                "refinement_length must be >= 1, got {}",
                self.refinement_length
            )));
        }
        if self.golden_sample_count < 1 {
            return Err(MatrixError::Config(format!(
                "golden_sample_count must be >= 1, got {}",
                self.golden_sample_count
            )));
        }
        Ok(())
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> MatrixResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| MatrixError::Config(format!("JSON parse error: {e}")))
    }

    /// Load from JSON and validate in one step.
    pub fn from_json_validated(json: &str) -> MatrixResult<Self> {
        let config = Self::from_json(json)?;
        config.validate()?;
        Ok(config)
    }
}
