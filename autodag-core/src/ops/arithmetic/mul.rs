use crate::autograd::{apply, Context, Function};
use crate::buffer::Buffer;
use crate::error::AutodagError;
use crate::ops::{binary_inputs, binary_tangents, scalar_like};
use crate::tensor::Tensor;

// --- Function Structure ---

/// Element-wise multiplication with broadcasting. Saves both operands.
#[derive(Debug)]
pub struct Mul;

impl Function for Mul {
    fn name(&self) -> &'static str {
        "mul"
    }

    fn forward(&self, ctx: &mut Context, inputs: &[&Tensor]) -> Result<Buffer, AutodagError> {
        let (a, b) = binary_inputs(self.name(), inputs)?;
        ctx.save_for_backward(&[a, b])?;
        a.buffer().mul(&b.buffer())
    }

    fn backward(&self, ctx: &Context, grad_output: &Buffer) -> Result<Vec<Buffer>, AutodagError> {
        let a = ctx.saved_buffer(0)?;
        let b = ctx.saved_buffer(1)?;
        // grad_a = grad_output * b, grad_b = grad_output * a
        Ok(vec![grad_output.mul(&b)?, grad_output.mul(&a)?])
    }

    fn tangent(&self, ctx: &Context, tangents: &[Buffer]) -> Result<Buffer, AutodagError> {
        let (ta, tb) = binary_tangents(self.name(), tangents)?;
        let a = ctx.saved_buffer(0)?;
        let b = ctx.saved_buffer(1)?;
        ta.mul(&b)?.add(&a.mul(tb)?)
    }
}

// --- Forward Operation ---

pub fn mul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, AutodagError> {
    apply(Mul, &[a, b])
}

/// Multiplies by a scalar, lifted to a constant tensor of `a`'s dtype.
pub fn mul_scalar_op(a: &Tensor, value: f64) -> Result<Tensor, AutodagError> {
    mul_op(a, &scalar_like(a, value))
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
