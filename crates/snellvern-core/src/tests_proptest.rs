// ─────────────────────────────────────────────────────────────────────
// Snell-Vern Drive Matrix — Property Tests (phase thresholds)
// ─────────────────────────────────────────────────────────────────────

use proptest::prelude::*;

use crate::phase::{
    transition, PhaseInput, PhaseMachine, PhaseOutcome, PhaseState, CONVERGENCE_THRESHOLD,
    DIVERGENCE_THRESHOLD,
};

fn non_error_state() -> impl Strategy<Value = PhaseState> {
    prop_oneof![
        Just(PhaseState::Idle),
        Just(PhaseState::Processing),
        Just(PhaseState::DeltaAdjustment),
        Just(PhaseState::Stabilized),
    ]
}

fn signed(magnitude: f64, negative: bool) -> f64 {
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

proptest! {
    #[test]
    fn test_small_delta_converges(
        start in non_error_state(),
        magnitude in 0.0f64..CONVERGENCE_THRESHOLD,
        negative in any::<bool>(),
    ) {
        let delta = signed(magnitude, negative);
        let mut m = PhaseMachine::default().starting_in(start);
        let t = m.adjust_phase_delta(delta);
        prop_assert_eq!(t.to, PhaseState::Stabilized);
        prop_assert_eq!(t.outcome, PhaseOutcome::Converged);
        prop_assert_eq!(m.delta_values(), &[delta][..]);
    }

    #[test]
    fn test_mid_delta_refines(
        start in non_error_state(),
        magnitude in CONVERGENCE_THRESHOLD..=DIVERGENCE_THRESHOLD,
        negative in any::<bool>(),
    ) {
        let (to, outcome) = transition(start, &PhaseInput::Delta(signed(magnitude, negative)));
        prop_assert_eq!(to, PhaseState::DeltaAdjustment);
        prop_assert_eq!(outcome, PhaseOutcome::Refining);
    }

    #[test]
    fn test_large_delta_diverges(
        start in non_error_state(),
        magnitude in (DIVERGENCE_THRESHOLD + 1e-9)..1e12,
        negative in any::<bool>(),
    ) {
        let delta = signed(magnitude, negative);
        let mut m = PhaseMachine::default().starting_in(start);
        let t = m.adjust_phase_delta(delta);
        prop_assert_eq!(t.to, PhaseState::Error);
        prop_assert_eq!(t.outcome, PhaseOutcome::Divergent);
        prop_assert!(t.into_result().is_err());
    }

    #[test]
    fn test_error_absorbs_any_delta(delta in any::<f64>()) {
        let mut m = PhaseMachine::default().starting_in(PhaseState::Error);
        let t = m.adjust_phase_delta(delta);
        prop_assert_eq!(t.outcome, PhaseOutcome::Locked);
        prop_assert_eq!(m.state(), PhaseState::Error);
        prop_assert!(m.delta_values().is_empty());
        prop_assert!(m.transitions().is_empty());
    }
}
