use crate::autograd::{apply, Context, Function, Param};
use crate::buffer::Buffer;
use crate::error::AutodagError;
use crate::ops::{unary_input, unary_tangent};
use crate::tensor::Tensor;
use ndarray::{ArrayD, Axis};
use num_traits::Zero;
use std::ops::Add;

/// Validates `axes` against `rank` and returns them sorted and deduplicated.
/// `None` selects every axis.
pub(crate) fn normalize_axes(axes: Option<&[usize]>, rank: usize) -> Result<Vec<usize>, AutodagError> {
    let Some(axes) = axes else {
        return Ok((0..rank).collect());
    };
    if let Some(&axis) = axes.iter().find(|&&axis| axis >= rank) {
        return Err(AutodagError::InvalidAxis { axis, rank });
    }
    let mut axes = axes.to_vec();
    axes.sort_unstable();
    axes.dedup();
    Ok(axes)
}

/// Input shape with every reduced axis set to 1.
pub(crate) fn keepdims_shape(input_shape: &[usize], axes: &[usize]) -> Vec<usize> {
    input_shape
        .iter()
        .enumerate()
        .map(|(dim, &size)| if axes.contains(&dim) { 1 } else { size })
        .collect()
}

fn sum_array<A>(array: &ArrayD<A>, axes: &[usize], keepdims: bool) -> ArrayD<A>
where
    A: Clone + Zero + Add<Output = A>,
{
    let mut out = array.clone();
    // Highest axis first so the remaining indices stay valid.
    for &axis in axes.iter().rev() {
        out = out.sum_axis(Axis(axis));
    }
    if keepdims {
        for &axis in axes {
            out = out.insert_axis(Axis(axis));
        }
    }
    out
}

/// Sums a buffer over `axes` (all axes for `None`).
pub(crate) fn sum_kernel(
    buffer: &Buffer,
    axes: Option<&[usize]>,
    keepdims: bool,
) -> Result<Buffer, AutodagError> {
    let axes = normalize_axes(axes, buffer.ndim())?;
    match buffer {
        Buffer::F32(a) => Ok(Buffer::F32(sum_array(a, &axes, keepdims))),
        Buffer::F64(a) => Ok(Buffer::F64(sum_array(a, &axes, keepdims))),
        Buffer::I64(a) => Ok(Buffer::I64(sum_array(a, &axes, keepdims))),
        Buffer::Bool(_) => Err(AutodagError::UnsupportedDType {
            dtype: buffer.dtype(),
            operation: "sum".to_string(),
        }),
    }
}

/// Spreads a reduced gradient back over the input shape.
pub(crate) fn expand_reduced(
    grad_output: &Buffer,
    input_shape: &[usize],
    axes: &[usize],
) -> Result<Buffer, AutodagError> {
    let kept = crate::ops::view::reshape::reshape_kernel(grad_output, &keepdims_shape(input_shape, axes))?;
    kept.broadcast_to(input_shape)
}

/// Sum over a set of axes.
///
/// Backward broadcasts the gradient back to the input shape, first
/// reinserting the reduced axes when `keepdims` was false.
#[derive(Debug)]
pub struct Sum {
    pub axes: Option<Vec<usize>>,
    pub keepdims: bool,
}

impl Function for Sum {
    fn name(&self) -> &'static str {
        "sum"
    }

    fn forward(&self, ctx: &mut Context, inputs: &[&Tensor]) -> Result<Buffer, AutodagError> {
        let a = unary_input(self.name(), inputs)?;
        let buffer = a.buffer();
        let axes = normalize_axes(self.axes.as_deref(), buffer.ndim())?;
        let out = sum_kernel(&buffer, Some(&axes), self.keepdims)?;
        ctx.set_param("input_shape", Param::Shape(buffer.shape().to_vec()));
        ctx.set_param("axes", Param::Axes(axes));
        ctx.set_param("keepdims", Param::Flag(self.keepdims));
        Ok(out)
    }

    fn backward(&self, ctx: &Context, grad_output: &Buffer) -> Result<Vec<Buffer>, AutodagError> {
        let grad = expand_reduced(grad_output, ctx.shape("input_shape")?, ctx.axes("axes")?)?;
        Ok(vec![grad])
    }

    fn tangent(&self, ctx: &Context, tangents: &[Buffer]) -> Result<Buffer, AutodagError> {
        let tangent = unary_tangent(self.name(), tangents)?;
        sum_kernel(tangent, Some(ctx.axes("axes")?), ctx.flag("keepdims")?)
    }
}

pub fn sum_op(a: &Tensor, axes: Option<&[usize]>, keepdims: bool) -> Result<Tensor, AutodagError> {
    apply(
        Sum {
            axes: axes.map(<[usize]>::to_vec),
            keepdims,
        },
        &[a],
    )
}

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
