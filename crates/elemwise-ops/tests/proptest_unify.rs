//! Property tests for attribute unification.
//!
//! These tests use proptest to generate random attribute lists and verify
//! invariants that must hold for any valid input: idempotence, seeding-order
//! independence, unknown absorption, and broadcast completeness.

use elemwise_core::{DType, Shape};
use elemwise_ops::{unify, Mode, ShapeAttr, TypeAttr};
use proptest::prelude::*;

// ── Strategies ───────────────────────────────────────────────────────────

/// Generate a random dimension value (1..=8 to keep tests fast).
fn dim() -> impl Strategy<Value = i64> {
    1i64..=8
}

/// Generate a fully-known shape with rank 1..=4.
fn known_shape() -> impl Strategy<Value = Shape> {
    prop::collection::vec(dim(), 1..=4).prop_map(Shape::new)
}

/// Generate a random DType.
fn arb_dtype() -> impl Strategy<Value = DType> {
    prop_oneof![
        Just(DType::F32),
        Just(DType::F64),
        Just(DType::F16),
        Just(DType::I8),
        Just(DType::U8),
        Just(DType::I32),
        Just(DType::I64),
        Just(DType::Bool),
    ]
}

/// Degrade a known shape: mask some dims to unknown, or drop the rank.
fn degraded(shape: Shape) -> impl Strategy<Value = Shape> {
    let dims = shape.dims().unwrap().to_vec();
    let len = dims.len();
    prop_oneof![
        1 => Just(Shape::unknown()),
        4 => prop::collection::vec(prop::bool::ANY, len).prop_map(move |mask| {
            let masked: Vec<i64> = dims
                .iter()
                .zip(mask.iter())
                .map(|(&d, &keep)| if keep { d } else { Shape::UNKNOWN_DIM })
                .collect();
            Shape::new(masked)
        }),
    ]
}

/// A target shape plus a list of slots that all degrade from it.
fn consistent_shape_slots() -> impl Strategy<Value = (Shape, Vec<Shape>, Vec<Shape>)> {
    known_shape().prop_flat_map(|target| {
        let ins = prop::collection::vec(degraded(target.clone()), 1..=3);
        let outs = prop::collection::vec(degraded(target.clone()), 1..=2);
        (Just(target), ins, outs)
    })
}

/// A dtype plus slot lists where each slot is either that dtype or unknown.
fn consistent_dtype_slots() -> impl Strategy<Value = (DType, Vec<Option<DType>>, Vec<Option<DType>>)>
{
    arb_dtype().prop_flat_map(|dt| {
        let slot = prop_oneof![Just(Some(dt)), Just(None)];
        let slot2 = prop_oneof![Just(Some(dt)), Just(None)];
        (
            Just(dt),
            prop::collection::vec(slot, 1..=4),
            prop::collection::vec(slot2, 1..=2),
        )
    })
}

// ── Type unification properties ──────────────────────────────────────────

proptest! {
    /// Any concrete dtype seeded anywhere resolves every slot to it.
    #[test]
    fn dtype_broadcast_completeness((dt, mut ins, mut outs) in consistent_dtype_slots()) {
        prop_assume!(ins.iter().chain(outs.iter()).any(|s| s.is_some()));
        unify::<TypeAttr>("n", Mode::Bidirectional, &mut ins, &mut outs, None, None).unwrap();
        prop_assert!(ins.iter().chain(outs.iter()).all(|&s| s == Some(dt)));
    }

    /// A fully unknown list unifies to a fully unknown list.
    #[test]
    fn dtype_all_unknown_stays_unknown(n_in in 1usize..4, n_out in 1usize..3) {
        let mut ins: Vec<Option<DType>> = vec![None; n_in];
        let mut outs: Vec<Option<DType>> = vec![None; n_out];
        unify::<TypeAttr>("n", Mode::Bidirectional, &mut ins, &mut outs, None, None).unwrap();
        prop_assert!(ins.iter().chain(outs.iter()).all(|s| s.is_none()));
    }

    /// Unification is idempotent: a resolved list is a fixed point.
    #[test]
    fn dtype_idempotent((_, mut ins, mut outs) in consistent_dtype_slots()) {
        unify::<TypeAttr>("n", Mode::Bidirectional, &mut ins, &mut outs, None, None).unwrap();
        let (ins1, outs1) = (ins.clone(), outs.clone());
        unify::<TypeAttr>("n", Mode::Bidirectional, &mut ins, &mut outs, None, None).unwrap();
        prop_assert_eq!(ins, ins1);
        prop_assert_eq!(outs, outs1);
    }

    /// Seeding order does not matter: reversing the input list yields the
    /// same resolved value.
    #[test]
    fn dtype_seed_order_independent((dt, ins, outs) in consistent_dtype_slots()) {
        prop_assume!(ins.iter().chain(outs.iter()).any(|s| s.is_some()));
        let (mut a_ins, mut a_outs) = (ins.clone(), outs.clone());
        let mut b_ins: Vec<_> = ins.iter().rev().copied().collect();
        let mut b_outs = outs.clone();
        unify::<TypeAttr>("n", Mode::Bidirectional, &mut a_ins, &mut a_outs, None, None).unwrap();
        unify::<TypeAttr>("n", Mode::Bidirectional, &mut b_ins, &mut b_outs, None, None).unwrap();
        prop_assert!(a_ins.iter().chain(b_ins.iter()).all(|&s| s == Some(dt)));
    }

    /// Two distinct concrete dtypes always conflict, at the right slot.
    #[test]
    fn dtype_distinct_pair_conflicts(a in arb_dtype(), b in arb_dtype()) {
        prop_assume!(a != b);
        let mut ins = vec![Some(a), Some(b)];
        let mut outs: Vec<Option<DType>> = vec![None];
        let err = unify::<TypeAttr>("n", Mode::Bidirectional, &mut ins, &mut outs, None, None)
            .unwrap_err();
        prop_assert_eq!(
            err.to_string(),
            format!("Incompatible attr in node n at 1-th input: expected {a}, got {b}")
        );
    }
}

// ── Shape unification properties ─────────────────────────────────────────

proptest! {
    /// Consistent degradations of one target all resolve back to it.
    #[test]
    fn shape_broadcast_completeness((target, mut ins, mut outs) in consistent_shape_slots()) {
        unify::<ShapeAttr>("n", Mode::Bidirectional, &mut ins, &mut outs, None, None).unwrap();
        // Every slot ends up with the target's rank, and every dim that any
        // slot knew is filled in everywhere; dims no slot knew stay unknown
        // but must agree across slots.
        let resolved = ins[0].clone();
        prop_assert_eq!(resolved.ndim().or(target.ndim()), target.ndim());
        for slot in ins.iter().chain(outs.iter()) {
            prop_assert_eq!(slot, &resolved);
        }
    }

    /// Unifying any concrete shape with unknown-rank slots yields that shape.
    #[test]
    fn shape_unknown_absorption(target in known_shape(), n_extra in 0usize..3) {
        let mut ins = vec![target.clone()];
        ins.extend(std::iter::repeat_with(Shape::unknown).take(n_extra));
        let mut outs = vec![Shape::unknown()];
        unify::<ShapeAttr>("n", Mode::Bidirectional, &mut ins, &mut outs, None, None).unwrap();
        for slot in ins.iter().chain(outs.iter()) {
            prop_assert_eq!(slot, &target);
        }
    }

    /// Unification is idempotent for shapes.
    #[test]
    fn shape_idempotent((_, mut ins, mut outs) in consistent_shape_slots()) {
        unify::<ShapeAttr>("n", Mode::Bidirectional, &mut ins, &mut outs, None, None).unwrap();
        let (ins1, outs1) = (ins.clone(), outs.clone());
        unify::<ShapeAttr>("n", Mode::Bidirectional, &mut ins, &mut outs, None, None).unwrap();
        prop_assert_eq!(ins, ins1);
        prop_assert_eq!(outs, outs1);
    }

    /// Two known shapes of different rank always conflict.
    #[test]
    fn shape_rank_mismatch_conflicts(a in known_shape(), b in known_shape()) {
        prop_assume!(a.ndim() != b.ndim());
        let mut ins = vec![a, b];
        let mut outs = vec![Shape::unknown()];
        prop_assert!(
            unify::<ShapeAttr>("n", Mode::Bidirectional, &mut ins, &mut outs, None, None)
                .is_err()
        );
    }

    /// Equal-rank shapes differing in one concrete dim always conflict.
    #[test]
    fn shape_dim_mismatch_conflicts(a in known_shape(), idx in any::<prop::sample::Index>()) {
        let mut dims = a.dims().unwrap().to_vec();
        let i = idx.index(dims.len());
        dims[i] += 1;
        let mut ins = vec![a, Shape::new(dims)];
        let mut outs = vec![Shape::unknown()];
        prop_assert!(
            unify::<ShapeAttr>("n", Mode::Bidirectional, &mut ins, &mut outs, None, None)
                .is_err()
        );
    }
}
