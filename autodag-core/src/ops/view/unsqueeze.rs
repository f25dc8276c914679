use crate::autograd::{apply, Context, Function, Param};
use crate::buffer::Buffer;
use crate::error::AutodagError;
use crate::ops::view::reshape::reshape_kernel;
use crate::ops::{unary_input, unary_tangent};
use crate::tensor::Tensor;

/// Inserts a size-1 dimension at `dim`, which may equal the input rank.
#[derive(Debug)]
pub struct Unsqueeze {
    pub dim: usize,
}

impl Function for Unsqueeze {
    fn name(&self) -> &'static str {
        "unsqueeze"
    }

    fn forward(&self, ctx: &mut Context, inputs: &[&Tensor]) -> Result<Buffer, AutodagError> {
        let a = unary_input(self.name(), inputs)?;
        let buffer = a.buffer();
        let rank = buffer.ndim();
        if self.dim > rank {
            return Err(AutodagError::InvalidAxis { axis: self.dim, rank });
        }
        let mut out_shape = buffer.shape().to_vec();
        out_shape.insert(self.dim, 1);
        let out = reshape_kernel(&buffer, &out_shape)?;
        ctx.set_param("input_shape", Param::Shape(buffer.shape().to_vec()));
        ctx.set_param("output_shape", Param::Shape(out_shape));
        Ok(out)
    }

    fn backward(&self, ctx: &Context, grad_output: &Buffer) -> Result<Vec<Buffer>, AutodagError> {
        Ok(vec![reshape_kernel(grad_output, ctx.shape("input_shape")?)?])
    }

    fn tangent(&self, ctx: &Context, tangents: &[Buffer]) -> Result<Buffer, AutodagError> {
        reshape_kernel(unary_tangent(self.name(), tangents)?, ctx.shape("output_shape")?)
    }
}

pub fn unsqueeze_op(a: &Tensor, dim: usize) -> Result<Tensor, AutodagError> {
    apply(Unsqueeze { dim }, &[a])
}

#[cfg(test)]
#[path = "unsqueeze_test.rs"]
mod tests;
