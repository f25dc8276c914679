use crate::autograd::{apply, Context, Function, Param};
use crate::buffer::Buffer;
use crate::error::AutodagError;
use crate::ops::reduction::sum::{expand_reduced, normalize_axes, sum_kernel};
use crate::ops::{unary_input, unary_tangent};
use crate::tensor::Tensor;

/// Arithmetic mean over a set of axes: the sum divided by the number of
/// reduced elements. Reducing an empty extent yields NaN.
#[derive(Debug)]
pub struct Mean {
    pub axes: Option<Vec<usize>>,
    pub keepdims: bool,
}

impl Function for Mean {
    fn name(&self) -> &'static str {
        "mean"
    }

    fn forward(&self, ctx: &mut Context, inputs: &[&Tensor]) -> Result<Buffer, AutodagError> {
        let a = unary_input(self.name(), inputs)?;
        let buffer = a.buffer();
        if !buffer.dtype().is_floating_point() {
            return Err(AutodagError::UnsupportedDType {
                dtype: buffer.dtype(),
                operation: self.name().to_string(),
            });
        }
        let axes = normalize_axes(self.axes.as_deref(), buffer.ndim())?;
        let count: usize = axes.iter().map(|&axis| buffer.shape()[axis]).product();
        let scale = 1.0 / count as f64;
        let out = sum_kernel(&buffer, Some(&axes), self.keepdims)?.mul_scalar(scale)?;
        ctx.set_param("input_shape", Param::Shape(buffer.shape().to_vec()));
        ctx.set_param("axes", Param::Axes(axes));
        ctx.set_param("keepdims", Param::Flag(self.keepdims));
        ctx.set_param("scale", Param::Scalar(scale));
        Ok(out)
    }

    fn backward(&self, ctx: &Context, grad_output: &Buffer) -> Result<Vec<Buffer>, AutodagError> {
        let grad = expand_reduced(grad_output, ctx.shape("input_shape")?, ctx.axes("axes")?)?;
        Ok(vec![grad.mul_scalar(ctx.scalar("scale")?)?])
    }

    fn tangent(&self, ctx: &Context, tangents: &[Buffer]) -> Result<Buffer, AutodagError> {
        let tangent = unary_tangent(self.name(), tangents)?;
        sum_kernel(tangent, Some(ctx.axes("axes")?), ctx.flag("keepdims")?)?
            .mul_scalar(ctx.scalar("scale")?)
    }
}

pub fn mean_op(a: &Tensor, axes: Option<&[usize]>, keepdims: bool) -> Result<Tensor, AutodagError> {
    apply(
        Mean {
            axes: axes.map(<[usize]>::to_vec),
            keepdims,
        },
        &[a],
    )
}

#[cfg(test)]
#[path = "mean_test.rs"]
mod tests;
