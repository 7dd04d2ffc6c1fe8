// ─────────────────────────────────────────────────────────────────────
// Snell-Vern Drive Matrix — Generating Functions
// ─────────────────────────────────────────────────────────────────────
//! Power-series expansion of rational generating functions N(x)/D(x)
//! with integer coefficients and D(0) = 1.
//!
//!   Fibonacci:  x / (1 − x − x²)
//!   Lucas:      (2 − x) / (1 − x − x²)
//!
//! Coefficients follow from N = C·D: cₖ = nₖ − Σⱼ≥₁ dⱼ·cₖ₋ⱼ.

use std::collections::VecDeque;

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;

use snellvern_types::{MatrixError, MatrixResult, SequenceKind};

use crate::sequence::SequenceCore;

/// |D(x)| below this is treated as a pole.
const SINGULARITY_EPS: f64 = 1e-15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RationalSeries {
    /// n₀, n₁, … (ascending powers).
    numerator: Vec<i64>,
    /// d₀ = 1, d₁, … (ascending powers).
    denominator: Vec<i64>,
}

impl RationalSeries {
    pub fn new(numerator: Vec<i64>, denominator: Vec<i64>) -> MatrixResult<Self> {
        if denominator.first() != Some(&1) {
            return Err(MatrixError::Numerical(format!(
                "denominator {denominator:?} must have constant term 1"
            )));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn fibonacci() -> Self {
        Self {
            numerator: vec![0, 1],
            denominator: vec![1, -1, -1],
        }
    }

    pub fn lucas() -> Self {
        Self {
            numerator: vec![2, -1],
            denominator: vec![1, -1, -1],
        }
    }

    pub fn for_kind(kind: SequenceKind) -> Self {
        match kind {
            SequenceKind::Fibonacci => Self::fibonacci(),
            SequenceKind::Lucas => Self::lucas(),
        }
    }

    fn order(&self) -> usize {
        self.denominator.len().saturating_sub(1)
    }

    /// cᵢ given `recent` = [cᵢ₋₁, cᵢ₋₂, …].
    fn next_coefficient(&self, i: u64, recent: &VecDeque<BigInt>) -> BigInt {
        let mut c = usize::try_from(i)
            .ok()
            .and_then(|i| self.numerator.get(i))
            .map_or_else(BigInt::zero, |&v| BigInt::from(v));
        for (j, &d) in self.denominator.iter().enumerate().skip(1) {
            if d == 0 {
                continue;
            }
            if let Some(prev) = recent.get(j - 1) {
                c -= prev * BigInt::from(d);
            }
        }
        c
    }

    /// k-th coefficient, keeping only the last `order` terms in memory.
    pub fn coefficient(&self, k: u64) -> BigInt {
        let order = self.order();
        let mut window: VecDeque<BigInt> = VecDeque::with_capacity(order + 1);
        let mut current = BigInt::zero();
        for i in 0..=k {
            current = self.next_coefficient(i, &window);
            window.push_front(current.clone());
            window.truncate(order);
        }
        current
    }

    /// c₀, …, c_{count−1}.
    pub fn coefficients(&self, count: usize) -> Vec<BigInt> {
        let order = self.order();
        let mut window: VecDeque<BigInt> = VecDeque::with_capacity(order + 1);
        let mut out = Vec::with_capacity(count);
        for i in 0..count as u64 {
            let c = self.next_coefficient(i, &window);
            window.push_front(c.clone());
            window.truncate(order);
            out.push(c);
        }
        out
    }

    /// N(x)/D(x) at a real point.
    pub fn evaluate(&self, x: f64) -> MatrixResult<f64> {
        if !x.is_finite() {
            log::warn!("generating function evaluated at non-finite x = {x}");
            return Err(MatrixError::Numerical(format!("non-finite argument {x}")));
        }
        let d = horner(&self.denominator, x);
        if d.abs() < SINGULARITY_EPS {
            return Err(MatrixError::Singularity { x });
        }
        Ok(horner(&self.numerator, x) / d)
    }
}

fn horner(coeffs: &[i64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c as f64)
}

/// x / (1 − x − x²).
pub fn gf_fibonacci(x: f64) -> MatrixResult<f64> {
    RationalSeries::fibonacci().evaluate(x)
}

/// (2 − x) / (1 − x − x²).
pub fn gf_lucas(x: f64) -> MatrixResult<f64> {
    RationalSeries::lucas().evaluate(x)
}

impl SequenceCore {
    /// k-th power-series coefficient of the generating function of `kind`.
    pub fn generating_function_coefficient(
        &self,
        kind: SequenceKind,
        k: i64,
    ) -> MatrixResult<BigUint> {
        let k = self.check_index(k)?;
        let c = RationalSeries::for_kind(kind).coefficient(k);
        c.to_biguint().ok_or_else(|| {
            MatrixError::Numerical(format!("{kind} coefficient {k} is negative: {c}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fibonacci_coefficients() {
        let coeffs = RationalSeries::fibonacci().coefficients(11);
        let expected: Vec<BigInt> = [0i64, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55]
            .iter()
            .map(|&v| BigInt::from(v))
            .collect();
        assert_eq!(coeffs, expected);
    }

    #[test]
    fn test_lucas_coefficients() {
        let coeffs = RationalSeries::lucas().coefficients(8);
        let expected: Vec<BigInt> = [2i64, 1, 3, 4, 7, 11, 18, 29]
            .iter()
            .map(|&v| BigInt::from(v))
            .collect();
        assert_eq!(coeffs, expected);
    }

    #[test]
    fn test_coefficient_matches_sequence() {
        let core = SequenceCore::default();
        for k in 0..=20 {
            assert_eq!(
                core.generating_function_coefficient(SequenceKind::Fibonacci, k)
                    .unwrap(),
                core.fibonacci(k).unwrap(),
                "k={k}"
            );
            assert_eq!(
                core.generating_function_coefficient(SequenceKind::Lucas, k)
                    .unwrap(),
                core.lucas(k).unwrap(),
                "k={k}"
            );
        }
    }

    #[test]
    fn test_coefficient_large_index() {
        let series = RationalSeries::fibonacci();
        let expected: BigInt = "354224848179261915075".parse().unwrap();
        assert_eq!(series.coefficient(100), expected);
    }

    #[test]
    fn test_coefficient_negative_index() {
        let core = SequenceCore::default();
        assert!(matches!(
            core.generating_function_coefficient(SequenceKind::Lucas, -1),
            Err(MatrixError::InvalidIndex { index: -1, .. })
        ));
    }

    #[test]
    fn test_custom_series() {
        // 1 / (1 − 2x) = Σ 2ᵏ xᵏ
        let series = RationalSeries::new(vec![1], vec![1, -2]).unwrap();
        assert_eq!(series.coefficient(10), BigInt::from(1024));
    }

    #[test]
    fn test_denominator_must_be_monic_constant() {
        assert!(RationalSeries::new(vec![1], vec![2, -1]).is_err());
        assert!(RationalSeries::new(vec![1], vec![]).is_err());
    }

    #[test]
    fn test_evaluate_at_half() {
        // x/(1−x−x²) at x = 1/2 → 0.5 / 0.25 = 2.
        assert!((gf_fibonacci(0.5).unwrap() - 2.0).abs() < 1e-12);
        // (2−x)/(1−x−x²) at x = 1/2 → 1.5 / 0.25 = 6.
        assert!((gf_lucas(0.5).unwrap() - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_matches_partial_sum() {
        let x: f64 = 0.1;
        let partial: f64 = RationalSeries::fibonacci()
            .coefficients(40)
            .iter()
            .enumerate()
            .map(|(k, c)| c.to_string().parse::<f64>().unwrap() * x.powi(k as i32))
            .sum();
        assert!((gf_fibonacci(x).unwrap() - partial).abs() < 1e-12);
    }

    #[test]
    fn test_singularity_at_reciprocal_phi() {
        // 1 − x − x² = 0 at x = 1/φ = φ − 1.
        let x = 0.6180339887498949;
        assert!(matches!(
            gf_fibonacci(x),
            Err(MatrixError::Singularity { .. })
        ));
    }

    #[test]
    fn test_non_finite_argument() {
        assert!(matches!(gf_lucas(f64::NAN), Err(MatrixError::Numerical(_))));
    }
}
