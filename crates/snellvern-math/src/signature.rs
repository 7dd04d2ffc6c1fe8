// ─────────────────────────────────────────────────────────────────────
// Snell-Vern Drive Matrix — 4-7-11 Signature
// ─────────────────────────────────────────────────────────────────────
//! Small combinatorial facts around L(3), L(4), L(5) = 4, 7, 11:
//! the Egyptian sum 1/4 + 1/7 + 1/11 = 149/308 (308 = 4·7·11), the
//! Frobenius number of {4, 7}, and the additive chain 4 + 7 = 11.
//!
//! Over the common denominator 4·7·11 the Egyptian numerator is the sum of
//! pairwise products 7·11 + 4·11 + 4·7 = 77 + 44 + 28 = 149.

use num_integer::Integer;
use num_rational::Ratio;
use num_traits::{CheckedAdd, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

use snellvern_types::{MatrixError, MatrixResult, SequenceKind};

use crate::sequence::SequenceCore;

/// Σ 1/dᵢ as an exact reduced fraction.
pub fn egyptian_sum(denominators: &[u64]) -> MatrixResult<Ratio<u64>> {
    let mut sum = Ratio::<u64>::zero();
    for &d in denominators {
        if d == 0 {
            return Err(MatrixError::invalid_index(0, "unit fraction denominator must be >= 1"));
        }
        sum = sum
            .checked_add(&Ratio::new(1, d))
            .ok_or_else(|| MatrixError::Numerical(format!("egyptian sum overflow at 1/{d}")))?;
    }
    Ok(sum)
}

/// 1/4 + 1/7 + 1/11 as (numerator, denominator).
pub fn egyptian_fraction_4_7_11() -> (u64, u64) {
    // 149/308 is fully reduced and far from overflow.
    let sum = Ratio::new(1u64, 4) + Ratio::new(1, 7) + Ratio::new(1, 11);
    (*sum.numer(), *sum.denom())
}

/// Largest integer not expressible as x·a + y·b with x, y ≥ 0.
///
/// Requires a, b ≥ 1 and gcd(a, b) = 1. For a = 1 or b = 1 every
/// non-negative integer is expressible and the result is −1.
pub fn frobenius_number(a: u64, b: u64) -> MatrixResult<i64> {
    if a == 0 || b == 0 {
        return Err(MatrixError::invalid_index(0, "frobenius arguments must be >= 1"));
    }
    if a.gcd(&b) != 1 {
        return Err(MatrixError::NotCoprime { a, b });
    }
    let (a, b) = (i128::from(a), i128::from(b));
    let g = a * b - a - b;
    g.to_i64()
        .ok_or_else(|| MatrixError::Numerical(format!("frobenius number {g} exceeds i64")))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureSummary {
    pub l3: u64,
    pub l4: u64,
    pub l5: u64,
    /// L(3)·L(4)·L(5).
    pub product: u64,
    /// L(3)·L(4) + L(3)·L(5) + L(4)·L(5); numerator of 1/L(3) + 1/L(4) + 1/L(5)
    /// over `product`.
    pub pair_sum: u64,
    pub frobenius_4_7: i64,
    /// Whether L(3) + L(4) = L(5).
    pub additive_chain: bool,
}

impl SequenceCore {
    pub fn signature_summary(&self) -> MatrixResult<SignatureSummary> {
        let lucas = |n: u64| -> MatrixResult<u64> {
            let v = self.value_at(SequenceKind::Lucas, n)?;
            v.to_u64()
                .ok_or_else(|| MatrixError::Numerical(format!("L({n}) = {v} exceeds u64")))
        };
        let (l3, l4, l5) = (lucas(3)?, lucas(4)?, lucas(5)?);
        Ok(SignatureSummary {
            l3,
            l4,
            l5,
            product: l3 * l4 * l5,
            pair_sum: l3 * l4 + l3 * l5 + l4 * l5,
            frobenius_4_7: frobenius_number(l3, l4)?,
            additive_chain: l3 + l4 == l5,
        })
    }
}
