use crate::autograd::{apply, Context, Function};
use crate::buffer::Buffer;
use crate::error::AutodagError;
use crate::ops::{unary_input, unary_tangent};
use crate::tensor::Tensor;

#[derive(Debug)]
pub struct Cos;

impl Function for Cos {
    fn name(&self) -> &'static str {
        "cos"
    }

    fn forward(&self, ctx: &mut Context, inputs: &[&Tensor]) -> Result<Buffer, AutodagError> {
        let a = unary_input(self.name(), inputs)?;
        ctx.save_for_backward(&[a])?;
        a.buffer().cos()
    }

    fn backward(&self, ctx: &Context, grad_output: &Buffer) -> Result<Vec<Buffer>, AutodagError> {
        // d/dx cos(x) = -sin(x)
        Ok(vec![grad_output.mul(&ctx.saved_buffer(0)?.sin()?)?.neg()?])
    }

    fn tangent(&self, ctx: &Context, tangents: &[Buffer]) -> Result<Buffer, AutodagError> {
        unary_tangent(self.name(), tangents)?
            .mul(&ctx.saved_buffer(0)?.sin()?)?
            .neg()
    }
}

pub fn cos_op(a: &Tensor) -> Result<Tensor, AutodagError> {
    apply(Cos, &[a])
}
