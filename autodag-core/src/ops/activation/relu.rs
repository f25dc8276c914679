use crate::autograd::{apply, Context, Function};
use crate::buffer::{float_unary, Buffer};
use crate::error::AutodagError;
use crate::ops::activation::float_param;
use crate::ops::{unary_input, unary_tangent};
use crate::tensor::Tensor;
use num_traits::Float;

fn relu<F: Float>(x: F) -> F {
    if x > F::zero() {
        x
    } else {
        F::zero()
    }
}

fn relu_mask<F: Float>(x: F) -> F {
    if x > F::zero() {
        F::one()
    } else {
        F::zero()
    }
}

fn relu6<F: Float>(x: F) -> F {
    relu(x).min(float_param(6.0))
}

fn relu6_mask<F: Float>(x: F) -> F {
    if x > F::zero() && x < float_param(6.0) {
        F::one()
    } else {
        F::zero()
    }
}

/// Rectified Linear Unit, `max(0, x)`. The derivative at 0 is taken as 0.
#[derive(Debug)]
pub struct Relu;

impl Relu {
    fn mask(input: &Buffer) -> Result<Buffer, AutodagError> {
        float_unary!(input, "relu", |a| a.mapv(relu_mask))
    }
}

impl Function for Relu {
    fn name(&self) -> &'static str {
        "relu"
    }

    fn forward(&self, ctx: &mut Context, inputs: &[&Tensor]) -> Result<Buffer, AutodagError> {
        let a = unary_input(self.name(), inputs)?;
        ctx.save_for_backward(&[a])?;
        float_unary!(&*a.buffer(), self.name(), |x| x.mapv(relu))
    }

    fn backward(&self, ctx: &Context, grad_output: &Buffer) -> Result<Vec<Buffer>, AutodagError> {
        Ok(vec![grad_output.mul(&Relu::mask(&*ctx.saved_buffer(0)?)?)?])
    }

    fn tangent(&self, ctx: &Context, tangents: &[Buffer]) -> Result<Buffer, AutodagError> {
        unary_tangent(self.name(), tangents)?.mul(&Relu::mask(&*ctx.saved_buffer(0)?)?)
    }
}

/// ReLU clipped at 6: `min(max(0, x), 6)`. Gradient flows only on `(0, 6)`.
#[derive(Debug)]
pub struct Relu6;

impl Relu6 {
    fn mask(input: &Buffer) -> Result<Buffer, AutodagError> {
        float_unary!(input, "relu6", |a| a.mapv(relu6_mask))
    }
}

impl Function for Relu6 {
    fn name(&self) -> &'static str {
        "relu6"
    }

    fn forward(&self, ctx: &mut Context, inputs: &[&Tensor]) -> Result<Buffer, AutodagError> {
        let a = unary_input(self.name(), inputs)?;
        ctx.save_for_backward(&[a])?;
        float_unary!(&*a.buffer(), self.name(), |x| x.mapv(relu6))
    }

    fn backward(&self, ctx: &Context, grad_output: &Buffer) -> Result<Vec<Buffer>, AutodagError> {
        Ok(vec![grad_output.mul(&Relu6::mask(&*ctx.saved_buffer(0)?)?)?])
    }

    fn tangent(&self, ctx: &Context, tangents: &[Buffer]) -> Result<Buffer, AutodagError> {
        unary_tangent(self.name(), tangents)?.mul(&Relu6::mask(&*ctx.saved_buffer(0)?)?)
    }
}

pub fn relu_op(a: &Tensor) -> Result<Tensor, AutodagError> {
    apply(Relu, &[a])
}

pub fn relu6_op(a: &Tensor) -> Result<Tensor, AutodagError> {
    apply(Relu6, &[a])
}

#[cfg(test)]
#[path = "relu_test.rs"]
mod tests;
