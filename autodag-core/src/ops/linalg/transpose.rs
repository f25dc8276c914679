use crate::autograd::{apply, Context, Function, Param};
use crate::buffer::Buffer;
use crate::error::AutodagError;
use crate::ops::{unary_input, unary_tangent};
use crate::tensor::utils::{inverse_permutation, validate_permutation};
use crate::tensor::Tensor;
use ndarray::{ArrayD, IxDyn};

fn permuted<A: Clone>(array: &ArrayD<A>, axes: &[usize]) -> ArrayD<A> {
    array
        .view()
        .permuted_axes(IxDyn(axes))
        .as_standard_layout()
        .into_owned()
}

/// Reorders the axes of a buffer into a fresh row-major array.
pub(crate) fn permute_kernel(buffer: &Buffer, axes: &[usize]) -> Result<Buffer, AutodagError> {
    validate_permutation(axes, buffer.ndim())?;
    Ok(match buffer {
        Buffer::F32(a) => Buffer::F32(permuted(a, axes)),
        Buffer::F64(a) => Buffer::F64(permuted(a, axes)),
        Buffer::I64(a) => Buffer::I64(permuted(a, axes)),
        Buffer::Bool(a) => Buffer::Bool(permuted(a, axes)),
    })
}

/// Swaps the trailing two axes.
pub(crate) fn transpose_last2(buffer: &Buffer) -> Result<Buffer, AutodagError> {
    let rank = buffer.ndim();
    if rank < 2 {
        return Err(AutodagError::RankTooLow {
            min_rank: 2,
            actual: rank,
            operation: "transpose".to_string(),
        });
    }
    let mut axes: Vec<usize> = (0..rank).collect();
    axes.swap(rank - 2, rank - 1);
    permute_kernel(buffer, &axes)
}

/// Axis permutation. The backward pass applies the inverse permutation.
#[derive(Debug)]
pub struct Permute {
    pub axes: Vec<usize>,
}

impl Function for Permute {
    fn name(&self) -> &'static str {
        "permute"
    }

    fn forward(&self, ctx: &mut Context, inputs: &[&Tensor]) -> Result<Buffer, AutodagError> {
        let a = unary_input(self.name(), inputs)?;
        let out = permute_kernel(&a.buffer(), &self.axes)?;
        ctx.set_param("axes", Param::Axes(self.axes.clone()));
        Ok(out)
    }

    fn backward(&self, ctx: &Context, grad_output: &Buffer) -> Result<Vec<Buffer>, AutodagError> {
        let inverse = inverse_permutation(ctx.axes("axes")?);
        Ok(vec![permute_kernel(grad_output, &inverse)?])
    }

    fn tangent(&self, ctx: &Context, tangents: &[Buffer]) -> Result<Buffer, AutodagError> {
        permute_kernel(unary_tangent(self.name(), tangents)?, ctx.axes("axes")?)
    }
}

pub fn permute_op(a: &Tensor, axes: &[usize]) -> Result<Tensor, AutodagError> {
    apply(Permute { axes: axes.to_vec() }, &[a])
}

/// Swaps two axes; a permutation with every other axis in place.
pub fn transpose_op(a: &Tensor, dim0: usize, dim1: usize) -> Result<Tensor, AutodagError> {
    let rank = a.ndim();
    for axis in [dim0, dim1] {
        if axis >= rank {
            return Err(AutodagError::InvalidAxis { axis, rank });
        }
    }
    let mut axes: Vec<usize> = (0..rank).collect();
    axes.swap(dim0, dim1);
    permute_op(a, &axes)
}

#[cfg(test)]
#[path = "transpose_test.rs"]
mod tests;
