//! Attribute unification and the element-wise operator plugin surface.
//!
//! The host graph engine calls the inference entry points in [`elemwise`]
//! once for shapes and once for element types per operator per compile pass;
//! both are thin wrappers over the generic unifier in [`unify`]. The
//! [`registry`] module models the host-side operator table as an explicit
//! owned object, and [`kernels`] holds the forward compute kernels the
//! registry entries point at.

pub mod elemwise;
pub mod kernels;
pub mod registry;
pub mod unify;

pub use elemwise::{elemwise_dtype, elemwise_int_dtype, elemwise_shape};
pub use kernels::{abs_forward, abs_inplace, WriteReq};
pub use registry::{dummy_abs, ArgDoc, OpDef, OpRegistry};
pub use unify::{unify, AttrKind, Mode, ShapeAttr, TypeAttr};
