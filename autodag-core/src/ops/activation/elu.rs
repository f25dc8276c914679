use crate::autograd::{apply, Context, Function, Param};
use crate::buffer::{float_unary, Buffer};
use crate::error::AutodagError;
use crate::ops::activation::float_param;
use crate::ops::{unary_input, unary_tangent};
use crate::tensor::Tensor;
use num_traits::Float;

fn elu<F: Float>(x: F, alpha: f64) -> F {
    if x > F::zero() {
        x
    } else {
        float_param::<F>(alpha) * (x.exp() - F::one())
    }
}

fn elu_mask<F: Float>(x: F, alpha: f64) -> F {
    if x > F::zero() {
        F::one()
    } else {
        float_param::<F>(alpha) * x.exp()
    }
}

/// Exponential Linear Unit: `x` for `x > 0`, `alpha * (e^x - 1)` otherwise.
#[derive(Debug)]
pub struct Elu {
    pub alpha: f64,
}

impl Elu {
    fn mask(ctx: &Context) -> Result<Buffer, AutodagError> {
        let alpha = ctx.scalar("alpha")?;
        float_unary!(&*ctx.saved_buffer(0)?, "elu", |a| a.mapv(|x| elu_mask(x, alpha)))
    }
}

impl Function for Elu {
    fn name(&self) -> &'static str {
        "elu"
    }

    fn forward(&self, ctx: &mut Context, inputs: &[&Tensor]) -> Result<Buffer, AutodagError> {
        let a = unary_input(self.name(), inputs)?;
        ctx.save_for_backward(&[a])?;
        ctx.set_param("alpha", Param::Scalar(self.alpha));
        let alpha = self.alpha;
        float_unary!(&*a.buffer(), self.name(), |x| x.mapv(|v| elu(v, alpha)))
    }

    fn backward(&self, ctx: &Context, grad_output: &Buffer) -> Result<Vec<Buffer>, AutodagError> {
        Ok(vec![grad_output.mul(&Elu::mask(ctx)?)?])
    }

    fn tangent(&self, ctx: &Context, tangents: &[Buffer]) -> Result<Buffer, AutodagError> {
        unary_tangent(self.name(), tangents)?.mul(&Elu::mask(ctx)?)
    }
}

pub fn elu_op(a: &Tensor, alpha: f64) -> Result<Tensor, AutodagError> {
    apply(Elu { alpha }, &[a])
}

#[cfg(test)]
#[path = "elu_test.rs"]
mod tests;
