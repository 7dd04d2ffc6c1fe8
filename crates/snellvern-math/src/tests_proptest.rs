// ─────────────────────────────────────────────────────────────────────
// Snell-Vern Drive Matrix — Property Tests (sequences & field)
// ─────────────────────────────────────────────────────────────────────

use proptest::prelude::*;

use snellvern_types::{MatrixError, SequenceKind};

use crate::{FieldCore, SequenceCore};

// ── Sequence identities ─────────────────────────────────────────────

proptest! {
    #[test]
    fn test_recurrence_holds_below_guard(n in 0i64..60) {
        let core = SequenceCore::default();
        for kind in [SequenceKind::Fibonacci, SequenceKind::Lucas] {
            let guard = core.closed_form_limit(kind) as i64;
            prop_assume!(n + 2 <= guard);
            let lhs = core.value(kind, n + 2).unwrap();
            let rhs = core.value(kind, n + 1).unwrap() + core.value(kind, n).unwrap();
            prop_assert_eq!(lhs, rhs);
        }
    }

    #[test]
    fn test_lucas_is_sum_of_neighbouring_fibonacci(n in 1i64..2_000) {
        let core = SequenceCore::default();
        let rhs = core.fibonacci(n - 1).unwrap() + core.fibonacci(n + 1).unwrap();
        prop_assert_eq!(core.lucas(n).unwrap(), rhs);
    }

    #[test]
    fn test_negative_index_always_rejected(n in i64::MIN..0) {
        let core = SequenceCore::default();
        let is_invalid = matches!(core.fibonacci(n), Err(MatrixError::InvalidIndex { .. }));
        prop_assert!(is_invalid);
        let is_invalid = matches!(core.lucas(n), Err(MatrixError::InvalidIndex { .. }));
        prop_assert!(is_invalid);
    }
}

// ── Ratio bounds ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_ratio_deviation_within_bound(n in 1i64..3_000) {
        let core = SequenceCore::default();
        let r = core.ratio(n).unwrap();
        prop_assert!(r.bound >= 0.0);
        prop_assert!(r.deviation <= r.bound, "n={} dev={} bound={}", n, r.deviation, r.bound);
    }

    #[test]
    fn test_generating_coefficient_matches(k in 0i64..=20) {
        let core = SequenceCore::default();
        prop_assert_eq!(
            core.generating_function_coefficient(SequenceKind::Fibonacci, k).unwrap(),
            core.fibonacci(k).unwrap()
        );
    }
}

// ── Field geometry ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn test_angle_in_range(n in 0i64..i64::MAX) {
        let a = FieldCore::default().angle(n).unwrap();
        prop_assert!((0.0..360.0).contains(&a), "angle({}) = {}", n, a);
    }

    #[test]
    fn test_radius_non_decreasing(n in 0i64..10_000_000) {
        let f = FieldCore::default();
        prop_assert!(f.radius(n + 1).unwrap() >= f.radius(n).unwrap());
    }

    #[test]
    fn test_field_rejects_negative(n in i64::MIN..0) {
        let f = FieldCore::default();
        prop_assert!(f.radius(n).is_err());
        prop_assert!(f.angle(n).is_err());
        prop_assert!(f.position(n).is_err());
    }
}
