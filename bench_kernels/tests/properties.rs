//! Property-based tests for bench_kernels.
//!
//! Key invariants:
//! - Runtime double -> int conversion is `as` in range and i32::MIN outside
//! - Integer division faults exactly where C raises SIGFPE
//! - Evaluation is pure under both semantics
//! - Float semantics never faults on small grids outside the `rc` loop
//! - `power` only ever returns one of its path codes

use proptest::prelude::*;

use bench_kernels::arithmetic::{checked_quot, fold_literal, truncate_runtime};
use bench_kernels::kernels::branch::{atoi, simple_branch, Band};
use bench_kernels::{evaluate, Fault, KernelId, Outcome, Reading, Semantics, SweepPlan, KERNELS};

fn kernel_without_rc() -> impl Strategy<Value = KernelId> {
    prop::sample::select(
        KERNELS
            .iter()
            .map(|k| k.id)
            .filter(|id| *id != KernelId::Rc)
            .collect::<Vec<_>>(),
    )
}

proptest! {
    #[test]
    fn truncation_matches_as_cast_in_range(v in -2_147_483_648.0f64..2_147_483_647.0) {
        prop_assert_eq!(truncate_runtime(v), v as i32);
    }

    #[test]
    fn truncation_out_of_range_is_int_min(v in 2_147_483_648.0f64..1e300) {
        prop_assert_eq!(truncate_runtime(v), i32::MIN);
        prop_assert_eq!(truncate_runtime(-v - 1.0), i32::MIN);
        prop_assert_eq!(fold_literal(v), i32::MAX);
    }

    #[test]
    fn quotient_agrees_with_wide_division(a in any::<i32>(), b in any::<i32>()) {
        match checked_quot(a, b) {
            Ok(q) => prop_assert_eq!(i64::from(q), i64::from(a) / i64::from(b)),
            Err(Fault::DivisionByZero) => prop_assert_eq!(b, 0),
            Err(Fault::DivisionOverflow) => prop_assert!(a == i32::MIN && b == -1),
            Err(other) => prop_assert!(false, "unexpected fault {:?}", other),
        }
    }

    #[test]
    fn evaluation_is_pure(
        id in kernel_without_rc(),
        raw in prop::collection::vec(-1000i32..1000, 3),
        float in any::<bool>(),
    ) {
        let semantics = if float { Semantics::Float } else { Semantics::Truncating };
        let arity = bench_kernels::registry::spec(id).arity();
        let inputs: Vec<Reading> = raw[..arity]
            .iter()
            .map(|v| bench_kernels::sweep::grid_reading(*v, semantics))
            .collect();
        let first = evaluate(id, semantics, &inputs).unwrap();
        let second = evaluate(id, semantics, &inputs).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn float_semantics_never_faults(
        id in kernel_without_rc(),
        raw in prop::collection::vec(-1000i32..1000, 3),
    ) {
        let arity = bench_kernels::registry::spec(id).arity();
        let inputs: Vec<Reading> = raw[..arity].iter().map(|v| Reading::Real(f64::from(*v))).collect();
        let outcome = evaluate(id, Semantics::Float, &inputs).unwrap();
        prop_assert!(!matches!(outcome, Outcome::Fault(_)), "{:?} {:?} -> {:?}", id, inputs, outcome);
    }

    #[test]
    fn truncating_values_are_ints(id in kernel_without_rc(), raw in prop::collection::vec(any::<i32>(), 3)) {
        prop_assume!(id != KernelId::Plgndr);
        let arity = bench_kernels::registry::spec(id).arity();
        let inputs: Vec<Reading> = raw[..arity].iter().copied().map(Reading::Int).collect();
        if let Some(r) = evaluate(id, Semantics::Truncating, &inputs).unwrap().printed() {
            prop_assert!(matches!(r, Reading::Int(_)));
        }
    }

    #[test]
    fn power_is_a_path_code(x in any::<i32>(), y in any::<i32>()) {
        let outcome = evaluate(KernelId::Power, Semantics::Truncating, &[Reading::Int(x), Reading::Int(y)]).unwrap();
        let Outcome::Value(Reading::Int(code)) = outcome else {
            return Err(TestCaseError::fail("power returned a non-int"));
        };
        prop_assert!([0, 3, 4, 13, 14].contains(&code));
        prop_assert_eq!(code == 0, x <= 0);
    }

    #[test]
    fn simple_branch_bands(x in any::<i32>()) {
        let out = simple_branch(x);
        match out.band {
            Band::AboveTen => prop_assert_eq!(out.result, x.wrapping_mul(2)),
            Band::AboveFive => prop_assert_eq!(out.result, x + 10),
            Band::AtMostFive => prop_assert_eq!(out.result, x.wrapping_sub(1)),
        }
    }

    #[test]
    fn atoi_reads_decimal(x in any::<i32>(), tail in "[a-z ]{0,4}") {
        prop_assert_eq!(atoi(&format!("{x}{tail}")), x);
        prop_assert_eq!(atoi(&format!("  {x}")), x);
    }

    #[test]
    fn sweep_points_are_sorted(lower in -5i32..5, width in 0i32..4) {
        let plan = SweepPlan::new(KernelId::Julday, lower, lower + width);
        let points: Vec<Vec<i32>> = plan.points().collect();
        prop_assert_eq!(points.len() as u64, plan.len());
        prop_assert!(points.windows(2).all(|w| w[0] < w[1]));
    }
}
