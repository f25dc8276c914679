use crate::autograd::{apply, Context, Function};
use crate::buffer::Buffer;
use crate::error::AutodagError;
use crate::ops::{unary_input, unary_tangent};
use crate::tensor::Tensor;

/// Element-wise `e^x`. Saves the output, which is also its own derivative.
#[derive(Debug)]
pub struct Exp;

impl Function for Exp {
    fn name(&self) -> &'static str {
        "exp"
    }

    fn forward(&self, ctx: &mut Context, inputs: &[&Tensor]) -> Result<Buffer, AutodagError> {
        let a = unary_input(self.name(), inputs)?;
        let out = a.buffer().exp()?;
        ctx.save_for_backward(&[&Tensor::from_buffer(out.clone())])?;
        Ok(out)
    }

    fn backward(&self, ctx: &Context, grad_output: &Buffer) -> Result<Vec<Buffer>, AutodagError> {
        Ok(vec![grad_output.mul(&*ctx.saved_buffer(0)?)?])
    }

    fn tangent(&self, ctx: &Context, tangents: &[Buffer]) -> Result<Buffer, AutodagError> {
        unary_tangent(self.name(), tangents)?.mul(&*ctx.saved_buffer(0)?)
    }
}

pub fn exp_op(a: &Tensor) -> Result<Tensor, AutodagError> {
    apply(Exp, &[a])
}
