use crate::autograd::{apply, Context, Function};
use crate::buffer::Buffer;
use crate::error::AutodagError;
use crate::ops::{unary_input, unary_tangent};
use crate::tensor::Tensor;

/// Element-wise hyperbolic tangent. Saves the output: `d tanh = 1 - tanh^2`.
#[derive(Debug)]
pub struct Tanh;

fn one_minus_square(out: &Buffer) -> Result<Buffer, AutodagError> {
    out.mul(out)?.neg()?.add_scalar(1.0)
}

impl Function for Tanh {
    fn name(&self) -> &'static str {
        "tanh"
    }

    fn forward(&self, ctx: &mut Context, inputs: &[&Tensor]) -> Result<Buffer, AutodagError> {
        let a = unary_input(self.name(), inputs)?;
        let out = a.buffer().tanh()?;
        ctx.save_for_backward(&[&Tensor::from_buffer(out.clone())])?;
        Ok(out)
    }

    fn backward(&self, ctx: &Context, grad_output: &Buffer) -> Result<Vec<Buffer>, AutodagError> {
        let derivative = one_minus_square(&*ctx.saved_buffer(0)?)?;
        Ok(vec![grad_output.mul(&derivative)?])
    }

    fn tangent(&self, ctx: &Context, tangents: &[Buffer]) -> Result<Buffer, AutodagError> {
        let derivative = one_minus_square(&*ctx.saved_buffer(0)?)?;
        unary_tangent(self.name(), tangents)?.mul(&derivative)
    }
}

pub fn tanh_op(a: &Tensor) -> Result<Tensor, AutodagError> {
    apply(Tanh, &[a])
}
