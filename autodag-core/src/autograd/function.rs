// src/autograd/function.rs

use crate::autograd::context::Context;
use crate::autograd::graph::attach_to_graph;
use crate::buffer::Buffer;
use crate::error::AutodagError;
use crate::tensor::Tensor;
use std::fmt::Debug;

/// A differentiable operation: a forward kernel paired with its backward and
/// tangent rules.
///
/// Implementors carry only their own parameters (e.g. the axes of a sum) and
/// write whatever the derivative rules need into the [`Context`] during
/// `forward`. Forward never mutates its inputs.
pub trait Function: Debug {
    /// Operation name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Computes the output buffer, saving what backward and tangent will need.
    fn forward(&self, ctx: &mut Context, inputs: &[&Tensor]) -> Result<Buffer, AutodagError>;

    /// Returns one gradient per input, in input order.
    ///
    /// Gradients may keep the broadcast output shape: the engine reduces them
    /// to each input's shape.
    fn backward(&self, ctx: &Context, grad_output: &Buffer) -> Result<Vec<Buffer>, AutodagError>;

    /// Forward-mode rule: the output tangent given one tangent per input
    /// (zero-filled for inputs without one).
    fn tangent(&self, _ctx: &Context, _tangents: &[Buffer]) -> Result<Buffer, AutodagError> {
        Err(AutodagError::UnsupportedOperation(format!(
            "'{}' has no forward-mode rule",
            self.name()
        )))
    }
}

/// Runs `function` on `inputs` and registers the result in the graph
/// according to the current mode.
pub fn apply<F: Function + 'static>(function: F, inputs: &[&Tensor]) -> Result<Tensor, AutodagError> {
    let mut ctx = Context::new(function.name());
    let buffer = function.forward(&mut ctx, inputs)?;
    let output = Tensor::from_buffer(buffer);
    attach_to_graph(output, Box::new(function), ctx, inputs)
}

/// Checks the number of tensors handed to an operation.
pub(crate) fn expect_arity(
    operation: &str,
    inputs_len: usize,
    expected: usize,
) -> Result<(), AutodagError> {
    if inputs_len != expected {
        return Err(AutodagError::ArityMismatch {
            operation: operation.to_string(),
            expected,
            actual: inputs_len,
        });
    }
    Ok(())
}
