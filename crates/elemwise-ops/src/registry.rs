//! Operator registry.
//!
//! The host engine owns an [`OpRegistry`] and consults it while building
//! its graph: each [`OpDef`] bundles the inference functions, the forward
//! kernel, arity, in-place hints, and documentation for one operator.
//! Nothing here is process-global; a host that wants a shared table wraps
//! the registry itself.

use std::collections::HashMap;

use smallvec::SmallVec;

use elemwise_core::{DType, Result, Shape};

use crate::elemwise::{elemwise_dtype, elemwise_shape};
use crate::kernels::{abs_forward, WriteReq};

pub type ShapeInferFn = fn(&str, &mut [Shape], &mut [Shape]) -> Result<()>;
pub type DTypeInferFn = fn(&str, &mut [Option<DType>], &mut [Option<DType>]) -> Result<()>;
pub type ComputeFn = fn(&[f32], WriteReq, &mut [f32]) -> Result<()>;

/// Documentation for one operator argument.
#[derive(Clone, Debug)]
pub struct ArgDoc {
    pub name: &'static str,
    pub type_desc: &'static str,
    pub help: &'static str,
}

/// Everything the host needs to wire one operator into its executor.
#[derive(Clone)]
pub struct OpDef {
    pub name: &'static str,
    pub describe: &'static str,
    pub num_inputs: usize,
    pub num_outputs: usize,
    pub infer_shape: ShapeInferFn,
    pub infer_dtype: DTypeInferFn,
    /// (input index, output index) pairs the kernel may compute in place.
    pub inplace_pairs: SmallVec<[(usize, usize); 1]>,
    pub compute: ComputeFn,
    pub arguments: Vec<ArgDoc>,
}

impl std::fmt::Debug for OpDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpDef")
            .field("name", &self.name)
            .field("num_inputs", &self.num_inputs)
            .field("num_outputs", &self.num_outputs)
            .field("inplace_pairs", &self.inplace_pairs)
            .finish_non_exhaustive()
    }
}

/// Owned table of operator definitions, keyed by operator name.
#[derive(Debug, Default)]
pub struct OpRegistry {
    ops: HashMap<&'static str, OpDef>,
}

impl OpRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an operator, returning the previous definition if the name
    /// was already taken.
    pub fn register(&mut self, def: OpDef) -> Option<OpDef> {
        tracing::debug!(op = def.name, "registering operator");
        self.ops.insert(def.name, def)
    }

    pub fn get(&self, name: &str) -> Option<&OpDef> {
        self.ops.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.ops.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

fn dummy_abs_shape(node: &str, ins: &mut [Shape], outs: &mut [Shape]) -> Result<()> {
    elemwise_shape(node, ins, outs, Some(1), Some(1))
}

fn dummy_abs_dtype(
    node: &str,
    ins: &mut [Option<DType>],
    outs: &mut [Option<DType>],
) -> Result<()> {
    elemwise_dtype(node, ins, outs, Some(1), Some(1))
}

/// The `dummy_abs` operator: element-wise absolute value of a single f32
/// input, safe for in-place execution.
pub fn dummy_abs() -> OpDef {
    OpDef {
        name: "dummy_abs",
        describe: "Take absolute value of the src",
        num_inputs: 1,
        num_outputs: 1,
        infer_shape: dummy_abs_shape,
        infer_dtype: dummy_abs_dtype,
        inplace_pairs: SmallVec::from_slice(&[(0, 0)]),
        compute: abs_forward,
        arguments: vec![ArgDoc {
            name: "data",
            type_desc: "NDArray-or-Symbol",
            help: "Source input",
        }],
    }
}
