use crate::autograd::{apply, Context, Function, Param};
use crate::buffer::{float_unary, Buffer};
use crate::error::AutodagError;
use crate::ops::activation::float_param;
use crate::ops::{unary_input, unary_tangent};
use crate::tensor::Tensor;
use num_traits::Float;

fn leaky<F: Float>(x: F, slope: f64) -> F {
    if x >= F::zero() {
        x
    } else {
        x * float_param(slope)
    }
}

fn leaky_mask<F: Float>(x: F, slope: f64) -> F {
    if x >= F::zero() {
        F::one()
    } else {
        float_param(slope)
    }
}

/// `x` for `x >= 0`, `slope * x` otherwise.
#[derive(Debug)]
pub struct LeakyRelu {
    pub slope: f64,
}

impl LeakyRelu {
    fn mask(ctx: &Context) -> Result<Buffer, AutodagError> {
        let slope = ctx.scalar("slope")?;
        float_unary!(&*ctx.saved_buffer(0)?, "leaky_relu", |a| a.mapv(|x| leaky_mask(x, slope)))
    }
}

impl Function for LeakyRelu {
    fn name(&self) -> &'static str {
        "leaky_relu"
    }

    fn forward(&self, ctx: &mut Context, inputs: &[&Tensor]) -> Result<Buffer, AutodagError> {
        let a = unary_input(self.name(), inputs)?;
        ctx.save_for_backward(&[a])?;
        ctx.set_param("slope", Param::Scalar(self.slope));
        let slope = self.slope;
        float_unary!(&*a.buffer(), self.name(), |x| x.mapv(|v| leaky(v, slope)))
    }

    fn backward(&self, ctx: &Context, grad_output: &Buffer) -> Result<Vec<Buffer>, AutodagError> {
        Ok(vec![grad_output.mul(&LeakyRelu::mask(ctx)?)?])
    }

    fn tangent(&self, ctx: &Context, tangents: &[Buffer]) -> Result<Buffer, AutodagError> {
        unary_tangent(self.name(), tangents)?.mul(&LeakyRelu::mask(ctx)?)
    }
}

pub fn leaky_relu_op(a: &Tensor, slope: f64) -> Result<Tensor, AutodagError> {
    apply(LeakyRelu { slope }, &[a])
}

#[cfg(test)]
#[path = "leaky_relu_test.rs"]
mod tests;
