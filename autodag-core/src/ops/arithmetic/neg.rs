use crate::autograd::{apply, Context, Function};
use crate::buffer::Buffer;
use crate::error::AutodagError;
use crate::ops::{unary_input, unary_tangent};
use crate::tensor::Tensor;

/// Element-wise negation.
#[derive(Debug)]
pub struct Neg;

impl Function for Neg {
    fn name(&self) -> &'static str {
        "neg"
    }

    fn forward(&self, _ctx: &mut Context, inputs: &[&Tensor]) -> Result<Buffer, AutodagError> {
        unary_input(self.name(), inputs)?.buffer().neg()
    }

    fn backward(&self, _ctx: &Context, grad_output: &Buffer) -> Result<Vec<Buffer>, AutodagError> {
        Ok(vec![grad_output.neg()?])
    }

    fn tangent(&self, _ctx: &Context, tangents: &[Buffer]) -> Result<Buffer, AutodagError> {
        unary_tangent(self.name(), tangents)?.neg()
    }
}

pub fn neg_op(a: &Tensor) -> Result<Tensor, AutodagError> {
    apply(Neg, &[a])
}

#[cfg(test)]
#[path = "neg_test.rs"]
mod tests;
