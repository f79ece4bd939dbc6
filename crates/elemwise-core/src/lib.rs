//! Foundational types for element-wise attribute inference.
//!
//! `elemwise-core` provides the attribute value types (`DType`, `Shape`) and
//! the shared error enum used by the unifier and kernels in `elemwise-ops`.
//! Attribute lists are plain slices over these types, owned by the host
//! engine and mutated in place during an inference pass.

pub mod types;

pub use types::{DType, Shape};

pub type Result<T> = std::result::Result<T, AttrError>;

/// Which side of an operator a slot belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Input,
    Output,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Input => write!(f, "input"),
            Role::Output => write!(f, "output"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum AttrError {
    /// Two slot values could not be merged. The host is expected to abort
    /// compilation of the offending graph node and surface this to its user.
    #[error(
        "Incompatible attr in node {node} at {index}-th {role}: expected {expected}, got {got}"
    )]
    Conflict {
        node: String,
        index: usize,
        role: Role,
        expected: String,
        got: String,
    },

    /// Input and output buffers passed to a kernel differ in length.
    #[error("buffer length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },
}
