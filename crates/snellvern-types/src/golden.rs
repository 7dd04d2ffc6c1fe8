// ─────────────────────────────────────────────────────────────────────
// Snell-Vern Drive Matrix — Golden Constants
// ─────────────────────────────────────────────────────────────────────
//! φ = (1 + √5) / 2 and its conjugate ψ = (1 − √5) / 2, the roots of
//! x² − x − 1 = 0, together with the derived golden angle.
//!
//! `GoldenConstants` is a plain `Copy` value: components take it by value
//! at construction, so tests can inject their own. [`GoldenConstants::shared`]
//! hands out one lazily-built process-wide instance that is never rebuilt.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{MatrixError, MatrixResult};

/// Tolerance of the φ·ψ = −1 and φ + ψ = 1 self-check, in units of ε.
const SELF_CHECK_ULPS: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoldenConstants {
    /// Golden ratio φ ≈ 1.618033988749895.
    pub phi: f64,
    /// Conjugate ψ = 1 − φ ≈ −0.618033988749895.
    pub psi: f64,
    /// √5 = φ − ψ.
    pub sqrt5: f64,
    /// Golden angle 360° · (2 − φ) = 180° · (3 − √5) ≈ 137.50776°.
    pub golden_angle_degrees: f64,
}

impl Default for GoldenConstants {
    fn default() -> Self {
        Self::new()
    }
}

impl GoldenConstants {
    pub fn new() -> Self {
        let sqrt5 = 5.0f64.sqrt();
        let phi = (1.0 + sqrt5) / 2.0;
        Self {
            phi,
            psi: 1.0 - phi,
            sqrt5,
            golden_angle_degrees: 180.0 * (3.0 - sqrt5),
        }
    }

    /// Process-wide instance, computed on first use.
    pub fn shared() -> &'static GoldenConstants {
        static SHARED: OnceLock<GoldenConstants> = OnceLock::new();
        SHARED.get_or_init(GoldenConstants::new)
    }

    /// Verify φ·ψ = −1 and φ + ψ = 1 to within a few ulps.
    pub fn verify(&self) -> MatrixResult<()> {
        let tol = SELF_CHECK_ULPS * f64::EPSILON;
        let product_err = (self.phi * self.psi + 1.0).abs();
        if !(product_err <= tol) {
            return Err(MatrixError::Numerical(format!(
                "phi * psi = {} deviates from -1 by {product_err:e}",
                self.phi * self.psi
            )));
        }
        let sum_err = (self.phi + self.psi - 1.0).abs();
        if !(sum_err <= tol) {
            return Err(MatrixError::Numerical(format!(
                "phi + psi = {} deviates from 1 by {sum_err:e}",
                self.phi + self.psi
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phi_value() {
        let g = GoldenConstants::new();
        assert!((g.phi - 1.618033988749895).abs() < 1e-15);
    }

    #[test]
    fn test_psi_is_conjugate() {
        let g = GoldenConstants::new();
        assert!((g.psi + 0.618033988749895).abs() < 1e-15);
    }

    #[test]
    fn test_self_check_passes() {
        assert!(GoldenConstants::new().verify().is_ok());
    }

    #[test]
    fn test_self_check_catches_corruption() {
        let g = GoldenConstants {
            psi: -0.6,
            ..GoldenConstants::new()
        };
        assert!(matches!(g.verify(), Err(MatrixError::Numerical(_))));
    }

    #[test]
    fn test_self_check_catches_nan() {
        let g = GoldenConstants {
            phi: f64::NAN,
            ..GoldenConstants::new()
        };
        assert!(g.verify().is_err());
    }

    #[test]
    fn test_golden_angle() {
        let g = GoldenConstants::new();
        assert!((g.golden_angle_degrees - 137.508).abs() < 0.001);
        assert!((g.golden_angle_degrees - 360.0 * (2.0 - g.phi)).abs() < 1e-10);
    }

    #[test]
    fn test_shared_is_stable() {
        let a = GoldenConstants::shared();
        let b = GoldenConstants::shared();
        assert!(std::ptr::eq(a, b));
        assert_eq!(*a, GoldenConstants::new());
    }
}
