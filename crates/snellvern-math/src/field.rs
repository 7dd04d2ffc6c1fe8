// ─────────────────────────────────────────────────────────────────────
// Snell-Vern Drive Matrix — Golden-Angle Field
// ─────────────────────────────────────────────────────────────────────
//! Phyllotaxis geometry: point n sits at angle n·θ_g (mod 360°) and
//! radius scale·√n, where θ_g = 360°·(2 − φ) is the golden angle.

use snellvern_types::{
    FieldPoint, GoldenConstants, MatrixConfig, MatrixError, MatrixResult, PolarPoint,
};

fn check_scale(scale: f64) -> MatrixResult<f64> {
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(MatrixError::InvalidScale(scale))
    }
}

fn check_field_index(n: i64) -> MatrixResult<u64> {
    if n < 0 {
        return Err(MatrixError::invalid_index(n, "field index must be >= 0"));
    }
    Ok(n as u64)
}

/// Stateless field evaluator with a construction-time default scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldCore {
    golden: GoldenConstants,
    scale: f64,
}

impl FieldCore {
    pub fn new(golden: GoldenConstants, scale: f64) -> MatrixResult<Self> {
        Ok(Self {
            golden,
            scale: check_scale(scale)?,
        })
    }

    pub fn from_config(config: &MatrixConfig) -> MatrixResult<Self> {
        Self::new(*GoldenConstants::shared(), config.root_scale)
    }

    /// Golden angle in degrees, ≈ 137.50776.
    pub fn golden_angle(&self) -> f64 {
        self.golden.golden_angle_degrees
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn radius(&self, n: i64) -> MatrixResult<f64> {
        self.radius_scaled(n, self.scale)
    }

    /// scale·√n; radius(0) = 0.
    pub fn radius_scaled(&self, n: i64, scale: f64) -> MatrixResult<f64> {
        let n = check_field_index(n)?;
        let scale = check_scale(scale)?;
        Ok(scale * (n as f64).sqrt())
    }

    /// n·θ_g reduced to [0°, 360°).
    pub fn angle(&self, n: i64) -> MatrixResult<f64> {
        let n = check_field_index(n)?;
        Ok(self.angle_at(n))
    }

    fn angle_at(&self, n: u64) -> f64 {
        // Both operands are non-negative, so the remainder is exact and < 360.
        (n as f64 * self.golden.golden_angle_degrees).rem_euclid(360.0)
    }

    pub fn position(&self, n: i64) -> MatrixResult<(f64, f64)> {
        self.position_scaled(n, self.scale)
    }

    pub fn position_scaled(&self, n: i64, scale: f64) -> MatrixResult<(f64, f64)> {
        let r = self.radius_scaled(n, scale)?;
        let theta = self.angle(n)?.to_radians();
        Ok((r * theta.cos(), r * theta.sin()))
    }

    pub fn point(&self, n: i64) -> MatrixResult<FieldPoint> {
        let radius = self.radius(n)?;
        let angle_degrees = self.angle(n)?;
        let theta = angle_degrees.to_radians();
        Ok(FieldPoint {
            index: n as u64,
            radius,
            angle_degrees,
            x: radius * theta.cos(),
            y: radius * theta.sin(),
        })
    }

    /// Points for every index in [start, end]; empty when start > end.
    pub fn points(&self, start: i64, end: i64) -> MatrixResult<Vec<FieldPoint>> {
        check_field_index(start)?;
        if start > end {
            return Ok(Vec::new());
        }
        (start..=end).map(|n| self.point(n)).collect()
    }

    /// φ-radian field: θ = n·φ radians (unreduced), r = scale·√n, n ≥ 1.
    pub fn polar_phi(&self, n: i64) -> MatrixResult<PolarPoint> {
        if n < 1 {
            return Err(MatrixError::invalid_index(n, "polar field index must be >= 1"));
        }
        Ok(PolarPoint {
            index: n as u64,
            radius: self.radius(n)?,
            theta_radians: n as f64 * self.golden.phi,
        })
    }

    pub fn polar_points(&self, start: i64, end: i64) -> MatrixResult<Vec<PolarPoint>> {
        if start < 1 {
            return Err(MatrixError::invalid_index(start, "polar field index must be >= 1"));
        }
        if start > end {
            return Ok(Vec::new());
        }
        (start..=end).map(|n| self.polar_phi(n)).collect()
    }
}

impl Default for FieldCore {
    fn default() -> Self {
        Self {
            golden: *GoldenConstants::shared(),
            scale: MatrixConfig::default().root_scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> FieldCore {
        FieldCore::default()
    }

    #[test]
    fn test_golden_angle() {
        assert!((field().golden_angle() - 137.50776405).abs() < 1e-6);
    }

    #[test]
    fn test_radius() {
        let f = field();
        assert_eq!(f.radius(0).unwrap(), 0.0);
        assert!((f.radius(4).unwrap() - 6.0).abs() < 1e-12);
        assert!((f.radius_scaled(9, 2.0).unwrap() - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_radius_monotonic() {
        let f = field();
        let mut prev = 0.0;
        for n in 0..200 {
            let r = f.radius(n).unwrap();
            assert!(r >= prev);
            prev = r;
        }
    }

    #[test]
    fn test_invalid_scale() {
        let f = field();
        assert_eq!(f.radius_scaled(1, 0.0), Err(MatrixError::InvalidScale(0.0)));
        assert!(f.radius_scaled(1, -1.0).is_err());
        assert!(f.radius_scaled(1, f64::INFINITY).is_err());
        assert!(FieldCore::new(GoldenConstants::new(), f64::NAN).is_err());
    }

    #[test]
    fn test_angle_reduced() {
        let f = field();
        assert_eq!(f.angle(0).unwrap(), 0.0);
        let a3 = f.angle(3).unwrap();
        assert!((a3 - (3.0 * f.golden_angle() - 360.0)).abs() < 1e-9);
        for n in [1, 7, 1_000, 1_000_000, i64::MAX / 2] {
            let a = f.angle(n).unwrap();
            assert!((0.0..360.0).contains(&a), "angle({n}) = {a}");
        }
    }

    #[test]
    fn test_negative_index_rejected() {
        let f = field();
        assert!(matches!(
            f.radius(-1),
            Err(MatrixError::InvalidIndex { index: -1, .. })
        ));
        assert!(f.angle(-2).is_err());
        assert!(f.position(-3).is_err());
        assert!(f.point(-4).is_err());
    }

    #[test]
    fn test_position_matches_polar() {
        let f = field();
        let (x, y) = f.position(5).unwrap();
        let r = f.radius(5).unwrap();
        assert!(((x * x + y * y).sqrt() - r).abs() < 1e-12);
        let p = f.point(5).unwrap();
        assert_eq!(p.position(), (x, y));
    }

    #[test]
    fn test_first_point_direction() {
        let f = field();
        let (x, y) = f.position(1).unwrap();
        let theta = 137.50776405f64.to_radians();
        assert!((x - 3.0 * theta.cos()).abs() < 1e-6);
        assert!((y - 3.0 * theta.sin()).abs() < 1e-6);
    }

    #[test]
    fn test_points_range() {
        let f = field();
        let pts = f.points(0, 9).unwrap();
        assert_eq!(pts.len(), 10);
        assert!(pts.iter().enumerate().all(|(i, p)| p.index == i as u64));
        assert!(f.points(5, 2).unwrap().is_empty());
    }

    #[test]
    fn test_polar_phi() {
        let f = field();
        let p = f.polar_phi(2).unwrap();
        assert!((p.theta_radians - 2.0 * 1.618033988749895).abs() < 1e-12);
        assert!((p.radius - 3.0 * 2f64.sqrt()).abs() < 1e-12);
        assert!(f.polar_phi(0).is_err());
        assert_eq!(f.polar_points(1, 4).unwrap().len(), 4);
        assert!(f.polar_points(0, 4).is_err());
    }
}
