// ─────────────────────────────────────────────────────────────────────
// Snell-Vern Drive Matrix — Guarded Binet Evaluation
// ─────────────────────────────────────────────────────────────────────
//! Closed-form evaluation of the golden-ratio sequences:
//!
//!   F(n) = (φⁿ − ψⁿ) / √5        L(n) = φⁿ + ψⁿ
//!
//! evaluated in `f64` together with a first-order forward error bound.
//! The stored φ carries a relative error of about ε, which `powi` raises
//! to roughly n·ε, and each of the ≤ 2·⌈log₂(n+1)⌉ multiplications inside
//! `powi` adds another ε/2. The √5 division and the ψⁿ term add a few ε
//! more. Rounding to the nearest integer is exact only while
//!
//!   |value| · (n + 2·⌈log₂(n+1)⌉ + 4) · ε  <  0.5
//!
//! and beyond that index the float is not trusted.

use snellvern_types::{GoldenConstants, SequenceKind};

/// Rounding-error units charged regardless of n (√5 division, ψⁿ, final add).
const FIXED_ROUNDING_STEPS: u64 = 4;

/// Indices scanned when searching for the guard threshold.
const LIMIT_SCAN_MAX: u64 = 256;

/// A closed-form value and the bound on its distance from the true integer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosedForm {
    pub kind: SequenceKind,
    pub n: u64,
    pub value: f64,
    pub error_bound: f64,
}

impl ClosedForm {
    pub fn evaluate(kind: SequenceKind, n: u64, golden: &GoldenConstants) -> Self {
        if n > i32::MAX as u64 {
            return Self {
                kind,
                n,
                value: f64::INFINITY,
                error_bound: f64::INFINITY,
            };
        }
        let exp = n as i32;
        let phi_n = golden.phi.powi(exp);
        let psi_n = golden.psi.powi(exp);
        let value = match kind {
            SequenceKind::Fibonacci => (phi_n - psi_n) / golden.sqrt5,
            SequenceKind::Lucas => phi_n + psi_n,
        };
        Self {
            kind,
            n,
            value,
            error_bound: forward_error_bound(value, n),
        }
    }

    /// Whether rounding `value` is guaranteed to give the exact integer.
    ///
    /// Besides the bound itself, the observed distance to the nearest
    /// integer must not exceed the bound; a larger distance means the
    /// float has drifted further than the analysis allows.
    pub fn is_exact(&self) -> bool {
        self.value.is_finite()
            && self.error_bound < 0.5
            && (self.value - self.value.round()).abs() <= self.error_bound
    }

    /// The exact integer, when the guard holds.
    pub fn rounded(&self) -> Option<u64> {
        if self.is_exact() && self.value >= -0.5 {
            Some(self.value.round().max(0.0) as u64)
        } else {
            None
        }
    }
}

fn forward_error_bound(value: f64, n: u64) -> f64 {
    if !value.is_finite() {
        return f64::INFINITY;
    }
    let log2_ceil = u64::from(64 - n.leading_zeros());
    let steps = n + 2 * log2_ceil + FIXED_ROUNDING_STEPS;
    // +1 covers the |ψⁿ| ≤ 1 term's own relative error.
    (value.abs() + 1.0) * steps as f64 * f64::EPSILON
}

/// Largest index for which the closed form of `kind` rounds exactly.
pub fn closed_form_limit(kind: SequenceKind, golden: &GoldenConstants) -> u64 {
    let mut limit = 0;
    for n in 0..=LIMIT_SCAN_MAX {
        if !ClosedForm::evaluate(kind, n, golden).is_exact() {
            break;
        }
        limit = n;
    }
    limit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recurrence;
    use num_traits::ToPrimitive;

    fn golden() -> GoldenConstants {
        GoldenConstants::new()
    }

    #[test]
    fn test_small_fibonacci_values() {
        let g = golden();
        let expected = [0u64, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55];
        for (n, &want) in expected.iter().enumerate() {
            let cf = ClosedForm::evaluate(SequenceKind::Fibonacci, n as u64, &g);
            assert_eq!(cf.rounded(), Some(want), "F({n})");
        }
    }

    #[test]
    fn test_small_lucas_values() {
        let g = golden();
        let expected = [2u64, 1, 3, 4, 7, 11, 18, 29, 47, 76, 123];
        for (n, &want) in expected.iter().enumerate() {
            let cf = ClosedForm::evaluate(SequenceKind::Lucas, n as u64, &g);
            assert_eq!(cf.rounded(), Some(want), "L({n})");
        }
    }

    #[test]
    fn test_bound_grows_with_index() {
        let g = golden();
        let b10 = ClosedForm::evaluate(SequenceKind::Fibonacci, 10, &g).error_bound;
        let b40 = ClosedForm::evaluate(SequenceKind::Fibonacci, 40, &g).error_bound;
        assert!(b40 > b10, "{b40} should exceed {b10}");
    }

    #[test]
    fn test_guard_trips_for_large_index() {
        let g = golden();
        let cf = ClosedForm::evaluate(SequenceKind::Fibonacci, 100, &g);
        assert!(!cf.is_exact());
        assert!(cf.rounded().is_none());
        assert!(cf.error_bound >= 0.5);
    }

    #[test]
    fn test_overflowing_index_is_not_exact() {
        let g = golden();
        let cf = ClosedForm::evaluate(SequenceKind::Lucas, 5_000, &g);
        assert!(!cf.value.is_finite());
        assert!(cf.rounded().is_none());
    }

    #[test]
    fn test_limits_are_in_expected_range() {
        let g = golden();
        let f = closed_form_limit(SequenceKind::Fibonacci, &g);
        let l = closed_form_limit(SequenceKind::Lucas, &g);
        assert!((55..=72).contains(&f), "fibonacci limit {f}");
        assert!((55..=72).contains(&l), "lucas limit {l}");
    }

    #[test]
    fn test_closed_form_matches_recurrence_up_to_limit() {
        let g = golden();
        for kind in [SequenceKind::Fibonacci, SequenceKind::Lucas] {
            let limit = closed_form_limit(kind, &g);
            for n in 0..=limit {
                let cf = ClosedForm::evaluate(kind, n, &g);
                let exact = recurrence::nth(kind, n).to_u64().unwrap();
                assert_eq!(cf.rounded(), Some(exact), "{kind}({n})");
                assert!(
                    (cf.value - exact as f64).abs() <= cf.error_bound,
                    "{kind}({n}): error {} exceeds bound {}",
                    (cf.value - exact as f64).abs(),
                    cf.error_bound
                );
            }
        }
    }

    #[test]
    fn test_corrupted_constants_fail_guard() {
        let g = GoldenConstants {
            phi: 1.62,
            ..GoldenConstants::new()
        };
        let cf = ClosedForm::evaluate(SequenceKind::Lucas, 30, &g);
        // 1.62^30 overshoots L(30) by ~3.7%; the rounded value must not match.
        let exact = recurrence::nth(SequenceKind::Lucas, 30).to_u64().unwrap();
        assert_ne!(cf.rounded(), Some(exact));
    }
}
