//! Inference entry points for element-wise operators.
//!
//! These are the call shapes a host engine wires into an operator
//! definition: one shape pass and one dtype pass per operator per compile
//! pass. All of them unify bidirectionally, so pre-specified output
//! attributes constrain the inputs as well.

use elemwise_core::{DType, Result, Shape};

use crate::unify::{unify, Mode, ShapeAttr, TypeAttr};

fn check_arity(node: &str, side: &str, declared: Option<usize>, actual: usize) {
    if let Some(n) = declared {
        assert_eq!(
            n, actual,
            "declared {n} {side} slots but got {actual} in operator {node}"
        );
    }
}

/// Shape inference for an element-wise operator: every input and output
/// shares one shape.
///
/// # Panics
///
/// Panics if a declared arity does not match the corresponding list length.
pub fn elemwise_shape(
    node: &str,
    in_shapes: &mut [Shape],
    out_shapes: &mut [Shape],
    n_in: Option<usize>,
    n_out: Option<usize>,
) -> Result<()> {
    check_arity(node, "input", n_in, in_shapes.len());
    check_arity(node, "output", n_out, out_shapes.len());
    unify::<ShapeAttr>(node, Mode::Bidirectional, in_shapes, out_shapes, n_in, n_out)
}

/// Element-type inference for an element-wise operator: every input and
/// output shares one dtype.
///
/// # Panics
///
/// Panics if a declared arity does not match the corresponding list length.
pub fn elemwise_dtype(
    node: &str,
    in_dtypes: &mut [Option<DType>],
    out_dtypes: &mut [Option<DType>],
    n_in: Option<usize>,
    n_out: Option<usize>,
) -> Result<()> {
    check_arity(node, "input", n_in, in_dtypes.len());
    check_arity(node, "output", n_out, out_dtypes.len());
    unify::<TypeAttr>(node, Mode::Bidirectional, in_dtypes, out_dtypes, n_in, n_out)
}

/// [`elemwise_dtype`] restricted to integer operators: the first input slot
/// must already hold one of `{int64, int32, int8, uint8, bool}`.
///
/// # Panics
///
/// Panics before any merge occurs if the first input slot is missing, still
/// unknown, or holds a non-integer dtype, or if a declared arity does not
/// match the corresponding list length.
pub fn elemwise_int_dtype(
    node: &str,
    in_dtypes: &mut [Option<DType>],
    out_dtypes: &mut [Option<DType>],
    n_in: Option<usize>,
    n_out: Option<usize>,
) -> Result<()> {
    let first = in_dtypes.first().copied().flatten();
    assert!(
        matches!(
            first,
            Some(DType::I64 | DType::I32 | DType::I8 | DType::U8 | DType::Bool)
        ),
        "only supports integer types in operator {node}"
    );
    check_arity(node, "input", n_in, in_dtypes.len());
    check_arity(node, "output", n_out, out_dtypes.len());
    unify::<TypeAttr>(node, Mode::Bidirectional, in_dtypes, out_dtypes, n_in, n_out)
}
