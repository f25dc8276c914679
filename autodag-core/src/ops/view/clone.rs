use crate::autograd::{apply, Context, Function};
use crate::buffer::Buffer;
use crate::error::AutodagError;
use crate::ops::{unary_input, unary_tangent};
use crate::tensor::Tensor;

/// Element copy into fresh storage, tracked as an identity.
///
/// Unlike `Tensor::clone`, which shares state with the original handle, the
/// result owns its own buffer and is a separate node in the graph.
#[derive(Debug)]
pub struct CloneOp;

impl Function for CloneOp {
    fn name(&self) -> &'static str {
        "clone"
    }

    fn forward(&self, _ctx: &mut Context, inputs: &[&Tensor]) -> Result<Buffer, AutodagError> {
        let a = unary_input(self.name(), inputs)?;
        Ok((*a.buffer()).clone())
    }

    fn backward(&self, _ctx: &Context, grad_output: &Buffer) -> Result<Vec<Buffer>, AutodagError> {
        Ok(vec![grad_output.clone()])
    }

    fn tangent(&self, _ctx: &Context, tangents: &[Buffer]) -> Result<Buffer, AutodagError> {
        Ok(unary_tangent(self.name(), tangents)?.clone())
    }
}

pub fn clone_op(a: &Tensor) -> Result<Tensor, AutodagError> {
    apply(CloneOp, &[a])
}

#[cfg(test)]
#[path = "clone_test.rs"]
mod tests;
