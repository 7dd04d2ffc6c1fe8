// ─────────────────────────────────────────────────────────────────────
// Snell-Vern Drive Matrix — Lucas Ratio Convergence
// ─────────────────────────────────────────────────────────────────────
//! L(n+1)/L(n) → φ with a two-sided analytic error bound.
//!
//! From L(n+1) − φ·L(n) = −√5·ψⁿ and φⁿ = L(n) − ψⁿ:
//!
//!   |L(n+1)/L(n) − φ| = √5 / (L(n) · (L(n) − ψⁿ))
//!
//! so the error sits between √5/(L(L + |ψ|ⁿ)) and √5/(L(L − |ψ|ⁿ)),
//! hitting the lower end for odd n and the upper end for even n.

use num_bigint::BigUint;
use num_traits::ToPrimitive;

use snellvern_types::{MatrixError, MatrixResult, RatioEstimate, SequenceKind, SequenceStrategy};

use crate::sequence::SequenceCore;

/// Absolute floating-point slack added to the analytic bound, in units of ε·φ.
const RATIO_SLACK_ULPS: f64 = 4.0;

/// Convert num/den to f64 after shifting both so `den` fits in 64 bits.
fn bigratio_to_f64(num: &BigUint, den: &BigUint) -> f64 {
    let bits = den.bits();
    let (num, den) = if bits > 64 {
        let shift = bits - 64;
        (num >> shift, den >> shift)
    } else {
        (num.clone(), den.clone())
    };
    let n = num.to_f64().unwrap_or(f64::INFINITY);
    let d = den.to_f64().unwrap_or(f64::INFINITY);
    n / d
}

impl SequenceCore {
    fn check_ratio_index(&self, n: i64) -> MatrixResult<u64> {
        if n == 0 {
            return Err(MatrixError::invalid_index(0, "ratio requires n >= 1"));
        }
        self.check_index(n)
    }

    /// Analytic `(lower, upper)` bounds on |L(n+1)/L(n) − φ| given exact L(n).
    pub fn ratio_error_bounds_from(&self, n: u64, lucas_n: &BigUint) -> (f64, f64) {
        let g = self.golden();
        let l = lucas_n.to_f64().unwrap_or(f64::INFINITY);
        let psi_n = g.psi.abs().powf(n as f64);
        let lower = g.sqrt5 / (l * (l + psi_n));
        let upper = g.sqrt5 / (l * (l - psi_n));
        (lower, upper)
    }

    /// Analytic `(lower, upper)` bounds on |L(n+1)/L(n) − φ|, n ≥ 1.
    pub fn ratio_error_bounds(&self, n: i64) -> MatrixResult<(f64, f64)> {
        let n = self.check_ratio_index(n)?;
        let lucas_n = self.value_at(SequenceKind::Lucas, n)?;
        Ok(self.ratio_error_bounds_from(n, &lucas_n))
    }

    /// L(n+1)/L(n) from exact Lucas integers, with its error bound.
    ///
    /// Fails with `Numerical` if the observed deviation ever exceeds the
    /// bound; that would mean the bound analysis is wrong, not the input.
    pub fn ratio(&self, n: i64) -> MatrixResult<RatioEstimate> {
        let n = self.check_ratio_index(n)?;
        let lucas_n = self.value_at(SequenceKind::Lucas, n)?;
        let lucas_next = self.value_at(SequenceKind::Lucas, n + 1)?;
        self.ratio_from(n, &lucas_n, &lucas_next)
    }

    /// Ratio estimate from caller-supplied exact L(n) and L(n+1), n ≥ 1.
    pub fn ratio_from(
        &self,
        n: u64,
        lucas_n: &BigUint,
        lucas_next: &BigUint,
    ) -> MatrixResult<RatioEstimate> {
        if n == 0 {
            return Err(MatrixError::invalid_index(0, "ratio requires n >= 1"));
        }
        let estimate = bigratio_to_f64(lucas_next, lucas_n);
        let phi = self.golden().phi;
        let deviation = (estimate - phi).abs();
        let (lower_bound, upper) = self.ratio_error_bounds_from(n, lucas_n);
        let bound = upper * (1.0 + RATIO_SLACK_ULPS * f64::EPSILON)
            + RATIO_SLACK_ULPS * f64::EPSILON * phi;

        if !estimate.is_finite() || !(bound >= 0.0) {
            log::warn!("ratio({n}): non-finite estimate {estimate} or bound {bound}");
            return Err(MatrixError::Numerical(format!(
                "ratio({n}) produced estimate {estimate} with bound {bound}"
            )));
        }
        if deviation > bound {
            log::error!("ratio({n}): deviation {deviation:e} exceeds bound {bound:e}");
            return Err(MatrixError::Numerical(format!(
                "ratio({n}) deviation {deviation:e} exceeds bound {bound:e}"
            )));
        }

        Ok(RatioEstimate {
            n,
            estimate,
            lower_bound,
            bound,
            deviation,
        })
    }

    /// Estimates and analytic bounds for every n in 1..=max_n.
    ///
    /// One linear pass over the Lucas numbers; each step reuses the two
    /// values already in hand instead of rebuilding L(n) from the seeds.
    pub fn ratio_series(&self, max_n: i64) -> MatrixResult<Vec<(RatioEstimate, (f64, f64))>> {
        let max_n = self.check_ratio_index(max_n)?;
        if self.strategy() == SequenceStrategy::ClosedFormOnly {
            // Same failure `ratio(max_n)` reports past the closed-form limit.
            self.value_at(SequenceKind::Lucas, max_n + 1)?;
        }
        let (l0, l1) = SequenceKind::Lucas.seeds();
        let mut lucas_n = BigUint::from(l1);
        let mut lucas_next = BigUint::from(l0 + l1);
        let mut out = Vec::with_capacity(max_n as usize);
        for n in 1..=max_n {
            let estimate = self.ratio_from(n, &lucas_n, &lucas_next)?;
            out.push((estimate, self.ratio_error_bounds_from(n, &lucas_n)));
            let following = &lucas_n + &lucas_next;
            lucas_n = std::mem::replace(&mut lucas_next, following);
        }
        Ok(out)
    }
}
