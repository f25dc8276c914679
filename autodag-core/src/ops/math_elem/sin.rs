use crate::autograd::{apply, Context, Function};
use crate::buffer::Buffer;
use crate::error::AutodagError;
use crate::ops::{unary_input, unary_tangent};
use crate::tensor::Tensor;

#[derive(Debug)]
pub struct Sin;

impl Function for Sin {
    fn name(&self) -> &'static str {
        "sin"
    }

    fn forward(&self, ctx: &mut Context, inputs: &[&Tensor]) -> Result<Buffer, AutodagError> {
        let a = unary_input(self.name(), inputs)?;
        ctx.save_for_backward(&[a])?;
        a.buffer().sin()
    }

    fn backward(&self, ctx: &Context, grad_output: &Buffer) -> Result<Vec<Buffer>, AutodagError> {
        Ok(vec![grad_output.mul(&ctx.saved_buffer(0)?.cos()?)?])
    }

    fn tangent(&self, ctx: &Context, tangents: &[Buffer]) -> Result<Buffer, AutodagError> {
        unary_tangent(self.name(), tangents)?.mul(&ctx.saved_buffer(0)?.cos()?)
    }
}

pub fn sin_op(a: &Tensor) -> Result<Tensor, AutodagError> {
    apply(Sin, &[a])
}
