use crate::autograd::{apply, Context, Function};
use crate::buffer::Buffer;
use crate::error::AutodagError;
use crate::ops::{binary_inputs, binary_tangents};
use crate::tensor::Tensor;

/// Element-wise division `a / b` with broadcasting. Saves both operands.
#[derive(Debug)]
pub struct Div;

impl Function for Div {
    fn name(&self) -> &'static str {
        "div"
    }

    fn forward(&self, ctx: &mut Context, inputs: &[&Tensor]) -> Result<Buffer, AutodagError> {
        let (a, b) = binary_inputs(self.name(), inputs)?;
        ctx.save_for_backward(&[a, b])?;
        a.buffer().div(&b.buffer())
    }

    fn backward(&self, ctx: &Context, grad_output: &Buffer) -> Result<Vec<Buffer>, AutodagError> {
        let a = ctx.saved_buffer(0)?;
        let b = ctx.saved_buffer(1)?;
        // grad_a = g / b
        let grad_a = grad_output.div(&b)?;
        // grad_b = -a / b^2 * g
        let grad_b = grad_output.mul(&a)?.div(&b.mul(&b)?)?.neg()?;
        Ok(vec![grad_a, grad_b])
    }

    fn tangent(&self, ctx: &Context, tangents: &[Buffer]) -> Result<Buffer, AutodagError> {
        let (ta, tb) = binary_tangents(self.name(), tangents)?;
        let a = ctx.saved_buffer(0)?;
        let b = ctx.saved_buffer(1)?;
        let direct = ta.div(&b)?;
        let through_b = tb.mul(&a)?.div(&b.mul(&b)?)?;
        direct.sub(&through_b)
    }
}

pub fn div_op(a: &Tensor, b: &Tensor) -> Result<Tensor, AutodagError> {
    apply(Div, &[a, b])
}

#[cfg(test)]
#[path = "div_test.rs"]
mod tests;
