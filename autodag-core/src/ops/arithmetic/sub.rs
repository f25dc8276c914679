use crate::autograd::{apply, Context, Function};
use crate::buffer::Buffer;
use crate::error::AutodagError;
use crate::ops::{binary_inputs, binary_tangents};
use crate::tensor::Tensor;

/// Element-wise subtraction `a - b` with broadcasting.
#[derive(Debug)]
pub struct Sub;

impl Function for Sub {
    fn name(&self) -> &'static str {
        "sub"
    }

    fn forward(&self, _ctx: &mut Context, inputs: &[&Tensor]) -> Result<Buffer, AutodagError> {
        let (a, b) = binary_inputs(self.name(), inputs)?;
        a.buffer().sub(&b.buffer())
    }

    fn backward(&self, _ctx: &Context, grad_output: &Buffer) -> Result<Vec<Buffer>, AutodagError> {
        Ok(vec![grad_output.clone(), grad_output.neg()?])
    }

    fn tangent(&self, _ctx: &Context, tangents: &[Buffer]) -> Result<Buffer, AutodagError> {
        let (ta, tb) = binary_tangents(self.name(), tangents)?;
        ta.sub(tb)
    }
}

pub fn sub_op(a: &Tensor, b: &Tensor) -> Result<Tensor, AutodagError> {
    apply(Sub, &[a, b])
}

#[cfg(test)]
#[path = "sub_test.rs"]
mod tests;
