// ─────────────────────────────────────────────────────────────────────
// Snell-Vern Drive Matrix — Sequence Core
// ─────────────────────────────────────────────────────────────────────
//! Exact Fibonacci / Lucas evaluation.
//!
//! The closed form is used while its precision guard holds; what happens
//! past the guard depends on [`SequenceStrategy`]:
//!
//! - `Guarded`: fall back to integer recurrence (exact, linear time).
//! - `ClosedFormOnly`: fail with `PrecisionExceeded`.
//! - `Recurrence`: never touch the float at all.
//!
//! Ratio, generating-function and continued-fraction operations live in
//! their own modules as further `impl SequenceCore` blocks.

use num_bigint::BigUint;

use snellvern_types::{
    check_index, GoldenConstants, MatrixConfig, MatrixError, MatrixResult, SequenceKind,
    SequenceStrategy,
};

use crate::binet::{closed_form_limit, ClosedForm};
use crate::recurrence;

/// Exact sequence evaluator with a closed-form precision guard.
#[derive(Debug, Clone)]
pub struct SequenceCore {
    golden: GoldenConstants,
    strategy: SequenceStrategy,
    max_index: u64,
    fibonacci_limit: u64,
    lucas_limit: u64,
}

impl SequenceCore {
    pub fn new(golden: GoldenConstants, strategy: SequenceStrategy, max_index: u64) -> Self {
        Self {
            fibonacci_limit: closed_form_limit(SequenceKind::Fibonacci, &golden),
            lucas_limit: closed_form_limit(SequenceKind::Lucas, &golden),
            golden,
            strategy,
            max_index,
        }
    }

    /// Build from config with the process-wide golden constants.
    pub fn from_config(config: &MatrixConfig) -> Self {
        Self::new(*GoldenConstants::shared(), config.strategy, config.max_index)
    }

    pub fn golden(&self) -> &GoldenConstants {
        &self.golden
    }

    pub fn strategy(&self) -> SequenceStrategy {
        self.strategy
    }

    pub fn max_index(&self) -> u64 {
        self.max_index
    }

    /// Largest index at which the closed form of `kind` is trusted.
    pub fn closed_form_limit(&self, kind: SequenceKind) -> u64 {
        match kind {
            SequenceKind::Fibonacci => self.fibonacci_limit,
            SequenceKind::Lucas => self.lucas_limit,
        }
    }

    pub fn check_index(&self, n: i64) -> MatrixResult<u64> {
        check_index(n, self.max_index)
    }

    /// Exact F(n).
    pub fn fibonacci(&self, n: i64) -> MatrixResult<BigUint> {
        self.value(SequenceKind::Fibonacci, n)
    }

    /// Exact L(n).
    pub fn lucas(&self, n: i64) -> MatrixResult<BigUint> {
        self.value(SequenceKind::Lucas, n)
    }

    pub fn value(&self, kind: SequenceKind, n: i64) -> MatrixResult<BigUint> {
        let n = self.check_index(n)?;
        self.value_at(kind, n)
    }

    /// Exact a(n) for an already-validated index.
    pub(crate) fn value_at(&self, kind: SequenceKind, n: u64) -> MatrixResult<BigUint> {
        match self.strategy {
            SequenceStrategy::Recurrence => Ok(recurrence::nth(kind, n)),
            SequenceStrategy::ClosedFormOnly => {
                self.closed_form_at(kind, n).map(BigUint::from)
            }
            SequenceStrategy::Guarded => {
                if n <= self.closed_form_limit(kind) {
                    match self.closed_form_at(kind, n) {
                        Ok(v) => return Ok(BigUint::from(v)),
                        Err(MatrixError::PrecisionExceeded { error_bound, .. }) => {
                            log::debug!(
                                "{kind}({n}): closed form failed drift check \
                                 (bound {error_bound:e}), using recurrence"
                            );
                        }
                        Err(e) => return Err(e),
                    }
                } else {
                    log::debug!("{kind}({n}): beyond closed-form limit, using recurrence");
                }
                Ok(recurrence::nth(kind, n))
            }
        }
    }

    /// Strict closed-form evaluation, independent of the configured strategy.
    pub fn closed_form(&self, kind: SequenceKind, n: i64) -> MatrixResult<u64> {
        let n = self.check_index(n)?;
        self.closed_form_at(kind, n)
    }

    fn closed_form_at(&self, kind: SequenceKind, n: u64) -> MatrixResult<u64> {
        let eval = ClosedForm::evaluate(kind, n, &self.golden);
        eval.rounded().ok_or_else(|| {
            log::warn!(
                "{kind}({n}): closed-form error bound {:e} admits no exact rounding",
                eval.error_bound
            );
            MatrixError::PrecisionExceeded {
                index: n,
                error_bound: eval.error_bound,
            }
        })
    }

    /// a(0), …, a(max_n) in order.
    pub fn sequence(&self, kind: SequenceKind, max_n: i64) -> MatrixResult<Vec<BigUint>> {
        let max_n = self.check_index(max_n)?;
        match self.strategy {
            // One linear pass instead of max_n independent evaluations.
            SequenceStrategy::Recurrence | SequenceStrategy::Guarded => {
                Ok(recurrence::SequenceIter::new(kind)
                    .take(max_n as usize + 1)
                    .collect())
            }
            SequenceStrategy::ClosedFormOnly => {
                (0..=max_n).map(|n| self.value_at(kind, n)).collect()
            }
        }
    }
}

impl Default for SequenceCore {
    fn default() -> Self {
        Self::from_config(&MatrixConfig::default())
    }
}
