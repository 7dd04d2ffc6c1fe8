// ─────────────────────────────────────────────────────────────────────
// Snell-Vern Drive Matrix — Continued Fractions
// ─────────────────────────────────────────────────────────────────────
//! Simple continued fractions of exact rationals.
//!
//! The Lucas ratios expand as L(n+1)/L(n) = [1; 1, …, 1, 3] with n − 2
//! interior ones (n ≥ 2) and [3] for n = 1, i.e. truncations of φ = [1; 1, 1, …].

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

use snellvern_types::{MatrixError, MatrixResult, SequenceKind};

use crate::sequence::SequenceCore;

/// Partial quotients of num/den by Euclid's algorithm. Empty when den = 0.
pub fn expand(num: &BigUint, den: &BigUint) -> Vec<BigUint> {
    let mut terms = Vec::new();
    let mut a = num.clone();
    let mut b = den.clone();
    while !b.is_zero() {
        let (q, r) = a.div_rem(&b);
        terms.push(q);
        a = std::mem::replace(&mut b, r);
    }
    terms
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LucasContinuedFraction {
    pub n: u64,
    /// L(n+1), decimal.
    pub numerator: String,
    /// L(n), decimal.
    pub denominator: String,
    pub terms: Vec<u64>,
}

impl LucasContinuedFraction {
    pub fn head(&self) -> Option<u64> {
        self.terms.first().copied()
    }

    pub fn tail(&self) -> Option<u64> {
        self.terms.last().copied()
    }

    /// Number of interior partial quotients equal to 1.
    pub fn ones(&self) -> usize {
        if self.terms.len() < 3 {
            return 0;
        }
        self.terms[1..self.terms.len() - 1]
            .iter()
            .filter(|&&t| t == 1)
            .count()
    }
}

impl SequenceCore {
    /// Continued-fraction expansion of L(n+1)/L(n), n ≥ 1.
    pub fn lucas_ratio_cfrac(&self, n: i64) -> MatrixResult<LucasContinuedFraction> {
        if n == 0 {
            return Err(MatrixError::invalid_index(0, "continued fraction requires n >= 1"));
        }
        let n = self.check_index(n)?;
        let den = self.value_at(SequenceKind::Lucas, n)?;
        let num = self.value_at(SequenceKind::Lucas, n + 1)?;
        let terms = expand(&num, &den)
            .iter()
            .map(|t| {
                t.to_u64().ok_or_else(|| {
                    MatrixError::Numerical(format!("partial quotient {t} exceeds u64"))
                })
            })
            .collect::<MatrixResult<Vec<u64>>>()?;
        Ok(LucasContinuedFraction {
            n,
            numerator: num.to_string(),
            denominator: den.to_string(),
            terms,
        })
    }
}
