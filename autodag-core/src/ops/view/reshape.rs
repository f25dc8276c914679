use crate::autograd::{apply, Context, Function, Param};
use crate::buffer::Buffer;
use crate::error::AutodagError;
use crate::ops::{unary_input, unary_tangent};
use crate::tensor::Tensor;
use ndarray::{ArrayD, IxDyn};

fn reshaped<A: Clone>(array: &ArrayD<A>, shape: &[usize]) -> Result<ArrayD<A>, AutodagError> {
    array
        .to_shape(IxDyn(shape))
        .map(|cow| cow.into_owned())
        .map_err(|_| AutodagError::ShapeMismatch {
            expected: array.shape().to_vec(),
            actual: shape.to_vec(),
            operation: "reshape".to_string(),
        })
}

/// Copies a buffer into `shape`, reading elements in row-major order.
pub(crate) fn reshape_kernel(buffer: &Buffer, shape: &[usize]) -> Result<Buffer, AutodagError> {
    let new_numel: usize = shape.iter().product();
    if new_numel != buffer.numel() {
        return Err(AutodagError::ShapeMismatch {
            expected: buffer.shape().to_vec(),
            actual: shape.to_vec(),
            operation: "reshape (numel mismatch)".to_string(),
        });
    }
    Ok(match buffer {
        Buffer::F32(a) => Buffer::F32(reshaped(a, shape)?),
        Buffer::F64(a) => Buffer::F64(reshaped(a, shape)?),
        Buffer::I64(a) => Buffer::I64(reshaped(a, shape)?),
        Buffer::Bool(a) => Buffer::Bool(reshaped(a, shape)?),
    })
}

/// Reshape with copy semantics: the output never aliases the input.
#[derive(Debug)]
pub struct Reshape {
    pub shape: Vec<usize>,
}

impl Function for Reshape {
    fn name(&self) -> &'static str {
        "reshape"
    }

    fn forward(&self, ctx: &mut Context, inputs: &[&Tensor]) -> Result<Buffer, AutodagError> {
        let a = unary_input(self.name(), inputs)?;
        let buffer = a.buffer();
        let out = reshape_kernel(&buffer, &self.shape)?;
        ctx.set_param("input_shape", Param::Shape(buffer.shape().to_vec()));
        Ok(out)
    }

    fn backward(&self, ctx: &Context, grad_output: &Buffer) -> Result<Vec<Buffer>, AutodagError> {
        Ok(vec![reshape_kernel(grad_output, ctx.shape("input_shape")?)?])
    }

    fn tangent(&self, _ctx: &Context, tangents: &[Buffer]) -> Result<Buffer, AutodagError> {
        reshape_kernel(unary_tangent(self.name(), tangents)?, &self.shape)
    }
}

pub fn reshape_op(a: &Tensor, shape: &[usize]) -> Result<Tensor, AutodagError> {
    apply(
        Reshape {
            shape: shape.to_vec(),
        },
        &[a],
    )
}

#[cfg(test)]
#[path = "reshape_test.rs"]
mod tests;
