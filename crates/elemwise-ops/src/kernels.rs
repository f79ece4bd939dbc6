//! Forward compute kernels.
//!
//! Plain safe-Rust kernels over caller-owned f32 buffers, in the shape a
//! host executor dispatches them after attribute inference has resolved
//! the operand shapes and dtypes.

use elemwise_core::{AttrError, Result};

/// How the host wants an output written.
///
/// The kernels only distinguish [`WriteReq::Null`]; the in-place /
/// write-through distinction is scheduling information for the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteReq {
    /// Skip the write entirely.
    Null,
    /// Write to a buffer distinct from the inputs.
    WriteTo,
    /// The output buffer aliases the input.
    WriteInplace,
}

/// Element-wise absolute value: `output[i] = |input[i]|`.
pub fn abs_forward(input: &[f32], req: WriteReq, output: &mut [f32]) -> Result<()> {
    if input.len() != output.len() {
        return Err(AttrError::LengthMismatch {
            expected: input.len(),
            got: output.len(),
        });
    }
    if req == WriteReq::Null {
        return Ok(());
    }
    for (out, &x) in output.iter_mut().zip(input.iter()) {
        *out = x.abs();
    }
    Ok(())
}

/// In-place variant for the aliased-buffer case two slices cannot express.
pub fn abs_inplace(buf: &mut [f32]) {
    for x in buf.iter_mut() {
        *x = x.abs();
    }
}
