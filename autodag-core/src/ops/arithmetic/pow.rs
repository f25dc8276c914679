use crate::autograd::{apply, Context, Function};
use crate::buffer::{float_binary, zip_broadcast, Buffer};
use crate::error::AutodagError;
use crate::ops::{binary_inputs, binary_tangents, scalar_like};
use crate::tensor::Tensor;
use num_traits::Float;

/// Element-wise power `a ^ b` with a tensor exponent.
///
/// Saves the base, the exponent and the output: the exponent gradient is
/// `out * ln(a) * g`.
#[derive(Debug)]
pub struct Pow;

/// `t * d` where `t != 0`, and exactly zero elsewhere, so that a zero
/// exponent tangent never picks up the NaN of `ln(a)` for `a <= 0`.
fn masked_product(tangent: &Buffer, derivative: &Buffer) -> Result<Buffer, AutodagError> {
    float_binary!(tangent, derivative, "pow", |t, d| zip_broadcast(t, d, skip_zero)?)
}

fn skip_zero<F: Float>(t: F, d: F) -> F {
    if t == F::zero() {
        F::zero()
    } else {
        t * d
    }
}

impl Pow {
    /// `b * a^(b-1)`, the derivative w.r.t. the base.
    fn base_derivative(a: &Buffer, b: &Buffer) -> Result<Buffer, AutodagError> {
        a.pow(&b.add_scalar(-1.0)?)?.mul(b)
    }
}

impl Function for Pow {
    fn name(&self) -> &'static str {
        "pow"
    }

    fn forward(&self, ctx: &mut Context, inputs: &[&Tensor]) -> Result<Buffer, AutodagError> {
        let (a, b) = binary_inputs(self.name(), inputs)?;
        let out = a.buffer().pow(&b.buffer())?;
        let out_tensor = Tensor::from_buffer(out.clone());
        ctx.save_for_backward(&[a, b, &out_tensor])?;
        Ok(out)
    }

    fn backward(&self, ctx: &Context, grad_output: &Buffer) -> Result<Vec<Buffer>, AutodagError> {
        let a = ctx.saved_buffer(0)?;
        let b = ctx.saved_buffer(1)?;
        let out = ctx.saved_buffer(2)?;
        let grad_a = grad_output.mul(&Pow::base_derivative(&a, &b)?)?;
        let grad_b = grad_output.mul(&out.mul(&a.ln()?)?)?;
        Ok(vec![grad_a, grad_b])
    }

    fn tangent(&self, ctx: &Context, tangents: &[Buffer]) -> Result<Buffer, AutodagError> {
        let (ta, tb) = binary_tangents(self.name(), tangents)?;
        let a = ctx.saved_buffer(0)?;
        let b = ctx.saved_buffer(1)?;
        let out = ctx.saved_buffer(2)?;
        let through_base = ta.mul(&Pow::base_derivative(&a, &b)?)?;
        let through_exponent = masked_product(tb, &out.mul(&a.ln()?)?)?;
        through_base.add(&through_exponent)
    }
}

pub fn pow_op(a: &Tensor, b: &Tensor) -> Result<Tensor, AutodagError> {
    apply(Pow, &[a, b])
}

/// Raises to a constant power, lifted to a tensor of `a`'s dtype.
pub fn pow_scalar_op(a: &Tensor, exponent: f64) -> Result<Tensor, AutodagError> {
    pow_op(a, &scalar_like(a, exponent))
}

#[cfg(test)]
#[path = "pow_test.rs"]
mod tests;
