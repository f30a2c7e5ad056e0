//! Property-based invariant tests for `SizeConstraint`.
//!
//! 1. Construction succeeds exactly when `0 <= min <= max`
//! 2. Clamping is idempotent
//! 3. Clamped values always lie inside the bounds
//! 4. Values already inside the bounds are untouched

use proptest::prelude::*;
use sizer_core::geometry::{ConstraintError, SizeConstraint};

fn bounds_strategy() -> impl Strategy<Value = (f64, f64)> {
    (0.0f64..10_000.0, 0.0f64..10_000.0).prop_map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
}

fn candidate_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1.0e6f64..1.0e6,
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
        Just(f64::NAN),
    ]
}

proptest! {
    #[test]
    fn construction_accepts_ordered_bounds((min, max) in bounds_strategy()) {
        let constraint = SizeConstraint::new(min, max).expect("ordered bounds are valid");
        prop_assert_eq!(constraint.minimum(), min);
        prop_assert_eq!(constraint.maximum(), max);
    }

    #[test]
    fn construction_rejects_inverted_bounds((min, max) in bounds_strategy()) {
        prop_assume!(min < max);
        let result = SizeConstraint::new(max, min);
        prop_assert_eq!(
            result,
            Err(ConstraintError::MinimumExceedsMaximum { minimum: max, maximum: min })
        );
    }

    #[test]
    fn clamp_is_idempotent((min, max) in bounds_strategy(), candidate in candidate_strategy()) {
        let constraint = SizeConstraint::new(min, max).expect("valid");
        let once = constraint.clamp(candidate);
        prop_assert_eq!(constraint.clamp(once), once);
    }

    #[test]
    fn clamp_stays_in_bounds((min, max) in bounds_strategy(), candidate in candidate_strategy()) {
        let constraint = SizeConstraint::new(min, max).expect("valid");
        let clamped = constraint.clamp(candidate);
        prop_assert!(clamped >= min && clamped <= max, "{clamped} outside [{min}, {max}]");
    }

    #[test]
    fn clamp_preserves_in_range_values((min, max) in bounds_strategy(), t in 0.0f64..=1.0) {
        let constraint = SizeConstraint::new(min, max).expect("valid");
        let inside = min + (max - min) * t;
        prop_assume!(constraint.contains(inside));
        prop_assert_eq!(constraint.clamp(inside), inside);
    }

    #[test]
    fn unbounded_maximum_only_raises(min in 0.0f64..1_000.0, candidate in -1.0e6f64..1.0e6) {
        let constraint = SizeConstraint::at_least(min).expect("valid");
        prop_assert_eq!(constraint.clamp(candidate), candidate.max(min));
    }
}
