use crate::autograd::{apply, Context, Function};
use crate::buffer::Buffer;
use crate::error::AutodagError;
use crate::ops::{binary_inputs, binary_tangents, scalar_like};
use crate::tensor::Tensor;

/// Element-wise addition with broadcasting.
///
/// The gradient flows through unchanged to both operands; the engine reduces
/// it back to each operand's shape.
#[derive(Debug)]
pub struct Add;

impl Function for Add {
    fn name(&self) -> &'static str {
        "add"
    }

    fn forward(&self, _ctx: &mut Context, inputs: &[&Tensor]) -> Result<Buffer, AutodagError> {
        let (a, b) = binary_inputs(self.name(), inputs)?;
        a.buffer().add(&b.buffer())
    }

    fn backward(&self, _ctx: &Context, grad_output: &Buffer) -> Result<Vec<Buffer>, AutodagError> {
        Ok(vec![grad_output.clone(), grad_output.clone()])
    }

    fn tangent(&self, _ctx: &Context, tangents: &[Buffer]) -> Result<Buffer, AutodagError> {
        let (ta, tb) = binary_tangents(self.name(), tangents)?;
        ta.add(tb)
    }
}

/// Adds two tensors element-wise, broadcasting their shapes.
pub fn add_op(a: &Tensor, b: &Tensor) -> Result<Tensor, AutodagError> {
    apply(Add, &[a, b])
}

/// Adds a scalar, lifted to a constant tensor of `a`'s dtype.
pub fn add_scalar_op(a: &Tensor, value: f64) -> Result<Tensor, AutodagError> {
    add_op(a, &scalar_like(a, value))
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
