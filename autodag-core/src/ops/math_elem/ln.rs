use crate::autograd::{apply, Context, Function};
use crate::buffer::Buffer;
use crate::error::AutodagError;
use crate::ops::{unary_input, unary_tangent};
use crate::tensor::Tensor;

/// Element-wise natural logarithm.
///
/// Non-positive inputs follow IEEE semantics (`-inf` at zero, NaN below);
/// no error is raised.
#[derive(Debug)]
pub struct Ln;

impl Function for Ln {
    fn name(&self) -> &'static str {
        "ln"
    }

    fn forward(&self, ctx: &mut Context, inputs: &[&Tensor]) -> Result<Buffer, AutodagError> {
        let a = unary_input(self.name(), inputs)?;
        ctx.save_for_backward(&[a])?;
        a.buffer().ln()
    }

    fn backward(&self, ctx: &Context, grad_output: &Buffer) -> Result<Vec<Buffer>, AutodagError> {
        Ok(vec![grad_output.div(&*ctx.saved_buffer(0)?)?])
    }

    fn tangent(&self, ctx: &Context, tangents: &[Buffer]) -> Result<Buffer, AutodagError> {
        unary_tangent(self.name(), tangents)?.div(&*ctx.saved_buffer(0)?)
    }
}

pub fn ln_op(a: &Tensor) -> Result<Tensor, AutodagError> {
    apply(Ln, &[a])
}
