use crate::autograd::{apply, Context, Function, Param};
use crate::buffer::Buffer;
use crate::error::AutodagError;
use crate::ops::view::reshape::reshape_kernel;
use crate::ops::{unary_input, unary_tangent};
use crate::tensor::Tensor;

/// Shape left after dropping `dim`, or every size-1 dim when `dim` is `None`.
fn squeezed_shape(shape: &[usize], dim: Option<usize>) -> Result<Vec<usize>, AutodagError> {
    match dim {
        None => Ok(shape.iter().copied().filter(|&d| d != 1).collect()),
        Some(dim) if dim >= shape.len() => Err(AutodagError::InvalidAxis {
            axis: dim,
            rank: shape.len(),
        }),
        Some(dim) if shape[dim] != 1 => {
            let mut expected = shape.to_vec();
            expected[dim] = 1;
            Err(AutodagError::ShapeMismatch {
                expected,
                actual: shape.to_vec(),
                operation: "squeeze".to_string(),
            })
        }
        Some(dim) => {
            let mut out = shape.to_vec();
            out.remove(dim);
            Ok(out)
        }
    }
}

/// Removes size-1 dimensions. The backward pass restores them.
#[derive(Debug)]
pub struct Squeeze {
    pub dim: Option<usize>,
}

impl Function for Squeeze {
    fn name(&self) -> &'static str {
        "squeeze"
    }

    fn forward(&self, ctx: &mut Context, inputs: &[&Tensor]) -> Result<Buffer, AutodagError> {
        let a = unary_input(self.name(), inputs)?;
        let buffer = a.buffer();
        let out_shape = squeezed_shape(buffer.shape(), self.dim)?;
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

pub fn squeeze_op(a: &Tensor, dim: Option<usize>) -> Result<Tensor, AutodagError> {
    apply(Squeeze { dim }, &[a])
}

#[cfg(test)]
#[path = "squeeze_test.rs"]
mod tests;
