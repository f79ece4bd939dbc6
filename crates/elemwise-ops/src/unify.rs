//! Generic attribute unification.
//!
//! One algorithm, parameterized over an attribute kind, deduces a single
//! value consistent with every participating slot and then broadcasts it
//! back into the slots in place. It is instantiated twice: [`ShapeAttr`]
//! for tensor shapes and [`TypeAttr`] for element types.

use elemwise_core::{AttrError, DType, Result, Role, Shape};

/// Which slots seed the deduced value.
///
/// The broadcast step always writes the deduced value into both lists;
/// only the seeding walk differs between modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Only input slots seed the deduction.
    ForwardOnly,
    /// Output slots constrain the deduction as well.
    Bidirectional,
}

/// Capability set an attribute kind must provide to the unifier.
pub trait AttrKind {
    type Value: Clone;

    /// The sentinel value carrying no constraint.
    fn unknown() -> Self::Value;

    fn is_unknown(v: &Self::Value) -> bool;

    /// Merge `v` into `acc`, tightening `acc` where it was unconstrained.
    /// Returns `false` when the two are incompatible; `acc` may have been
    /// partially updated at that point.
    fn merge(acc: &mut Self::Value, v: &Self::Value) -> bool;

    /// Render a value for conflict diagnostics.
    fn format(v: &Self::Value) -> String;
}

/// Element-type attribute: two tags merge iff either is unknown or both
/// are equal.
pub struct TypeAttr;

impl AttrKind for TypeAttr {
    type Value = Option<DType>;

    fn unknown() -> Option<DType> {
        None
    }

    fn is_unknown(v: &Option<DType>) -> bool {
        v.is_none()
    }

    fn merge(acc: &mut Option<DType>, v: &Option<DType>) -> bool {
        match (*acc, *v) {
            (None, got) => {
                *acc = got;
                true
            }
            (_, None) => true,
            (Some(a), Some(b)) => a == b,
        }
    }

    fn format(v: &Option<DType>) -> String {
        match v {
            Some(dt) => dt.to_string(),
            None => "unknown".to_string(),
        }
    }
}

/// Shape attribute.
///
/// The merge is deliberately asymmetric: an unknown-rank incoming value
/// leaves the accumulator untouched, while an unknown-rank accumulator
/// adopts the incoming shape wholesale. With equal known ranks, dimensions
/// merge independently and a negative size absorbs the other side.
pub struct ShapeAttr;

impl AttrKind for ShapeAttr {
    type Value = Shape;

    fn unknown() -> Shape {
        Shape::unknown()
    }

    fn is_unknown(v: &Shape) -> bool {
        v.0.is_none()
    }

    fn merge(acc: &mut Shape, v: &Shape) -> bool {
        let Some(new) = v.0.as_ref() else {
            return true;
        };
        let Some(cur) = acc.0.as_mut() else {
            *acc = v.clone();
            return true;
        };
        if cur.len() != new.len() {
            return false;
        }
        for (c, &n) in cur.iter_mut().zip(new.iter()) {
            if *c < 0 {
                *c = n;
            } else if *c != n && n >= 0 {
                return false;
            }
        }
        true
    }

    fn format(v: &Shape) -> String {
        v.to_string()
    }
}

/// Deduce one attribute value consistent with every participating slot of
/// `in_attrs` and (in [`Mode::Bidirectional`]) `out_attrs`, then write it
/// back into both lists.
///
/// `n_in` / `n_out` cap how many leading slots of each list participate;
/// omitted counts mean the whole list. On success every participating slot
/// holds the deduced value.
///
/// # Panics
///
/// Panics if a count override exceeds the length of its list — that is a
/// malformed call site, not a recoverable conflict.
pub fn unify<K: AttrKind>(
    node: &str,
    mode: Mode,
    in_attrs: &mut [K::Value],
    out_attrs: &mut [K::Value],
    n_in: Option<usize>,
    n_out: Option<usize>,
) -> Result<()> {
    let in_count = n_in.unwrap_or(in_attrs.len());
    let out_count = n_out.unwrap_or(out_attrs.len());
    assert!(
        in_count <= in_attrs.len(),
        "input count override {in_count} exceeds {} slots in operator {node}",
        in_attrs.len()
    );
    assert!(
        out_count <= out_attrs.len(),
        "output count override {out_count} exceeds {} slots in operator {node}",
        out_attrs.len()
    );

    let mut deduced = K::unknown();

    for (i, attr) in in_attrs.iter().take(in_count).enumerate() {
        if !K::merge(&mut deduced, attr) {
            return Err(conflict::<K>(node, i, Role::Input, &deduced, attr));
        }
    }
    if mode == Mode::Bidirectional {
        for (i, attr) in out_attrs.iter().take(out_count).enumerate() {
            if !K::merge(&mut deduced, attr) {
                return Err(conflict::<K>(node, i, Role::Output, &deduced, attr));
            }
        }
    }

    for (i, attr) in in_attrs.iter_mut().take(in_count).enumerate() {
        if !K::merge(attr, &deduced) {
            return Err(conflict::<K>(node, i, Role::Input, &deduced, attr));
        }
    }
    // Outputs receive the deduced value in both modes.
    for (i, attr) in out_attrs.iter_mut().take(out_count).enumerate() {
        if !K::merge(attr, &deduced) {
            return Err(conflict::<K>(node, i, Role::Output, &deduced, attr));
        }
    }

    tracing::trace!(node, resolved = %K::format(&deduced), "attribute unification resolved");
    Ok(())
}

fn conflict<K: AttrKind>(
    node: &str,
    index: usize,
    role: Role,
    expected: &K::Value,
    got: &K::Value,
) -> AttrError {
    AttrError::Conflict {
        node: node.to_string(),
        index,
        role,
        expected: K::format(expected),
        got: K::format(got),
    }
}
