// ─────────────────────────────────────────────────────────────────────
// Snell-Vern Drive Matrix — Value Records
// ─────────────────────────────────────────────────────────────────────

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MatrixError;

/// The two golden-ratio sequences sharing the recurrence a(n) = a(n−1) + a(n−2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceKind {
    /// F(0) = 0, F(1) = 1.
    Fibonacci,
    /// L(0) = 2, L(1) = 1.
    Lucas,
}

impl SequenceKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fibonacci => "fibonacci",
            Self::Lucas => "lucas",
        }
    }

    /// Seed values (a(0), a(1)).
    pub fn seeds(&self) -> (u64, u64) {
        match self {
            Self::Fibonacci => (0, 1),
            Self::Lucas => (2, 1),
        }
    }
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SequenceKind {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fibonacci" | "f" => Ok(Self::Fibonacci),
            "lucas" | "l" => Ok(Self::Lucas),
            _ => Err(MatrixError::UnknownSequence(s.to_string())),
        }
    }
}

/// Floating-point estimate of L(n+1)/L(n) with a rigorous error bound.
///
/// Invariant: `deviation <= bound` and `bound >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioEstimate {
    pub n: u64,
    /// L(n+1) / L(n) as f64.
    pub estimate: f64,
    /// Analytic lower bound on |L(n+1)/L(n) − φ|.
    pub lower_bound: f64,
    /// Upper bound on |estimate − φ|, floating-point slack included.
    pub bound: f64,
    /// Observed |estimate − φ|.
    pub deviation: f64,
}

impl RatioEstimate {
    pub fn within_bound(&self) -> bool {
        self.bound >= 0.0 && self.deviation <= self.bound
    }
}

/// One phyllotaxis point: golden-angle rotation, √n radial growth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldPoint {
    pub index: u64,
    pub radius: f64,
    /// Angle in degrees, reduced to [0, 360).
    pub angle_degrees: f64,
    pub x: f64,
    pub y: f64,
}

impl FieldPoint {
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// Point of the φ-radian field: r = scale · √n, θ = n · φ (unreduced).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarPoint {
    pub index: u64,
    pub radius: f64,
    pub theta_radians: f64,
}
