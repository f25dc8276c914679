//! # Tensor Operations Module (`ops`)
//!
//! Every differentiable operation lives here, grouped by kind.
//!
//! ## Structure:
//!
//! - **`Function` structs:** each operation is a struct implementing
//!   [`Function`](crate::autograd::Function): a forward kernel plus its
//!   backward and tangent rules. The struct carries only the operation's own
//!   parameters (axes, slope, target shape...).
//! - **`_op` functions:** thin entry points (`mul_op`, `sum_op`, ...) that run
//!   the struct through [`apply`](crate::autograd::apply). The `Tensor`
//!   methods delegate to them.
//! - **Kernels:** buffer-level helpers (`matmul_buffers`, `sum_kernel`,
//!   `reshape_kernel`, `permute_kernel`) shared by forward and backward.
//!
//! ## Key Submodules:
//!
//! - [`arithmetic`]: add, sub, mul, div, neg, pow and their scalar forms.
//! - [`math_elem`]: exp, ln, sin, cos, tanh.
//! - [`linalg`]: matmul, permute, transpose.
//! - [`reduction`]: sum, mean.
//! - [`view`]: reshape, squeeze, unsqueeze, clone.
//! - [`activation`]: relu, relu6, leaky_relu, elu.

use crate::autograd::function::expect_arity;
use crate::buffer::Buffer;
use crate::error::AutodagError;
use crate::tensor::Tensor;

pub mod activation;
pub mod arithmetic;
pub mod linalg;
pub mod math_elem;
pub mod reduction;
pub mod view;

pub(crate) fn unary_input<'a>(operation: &str, inputs: &[&'a Tensor]) -> Result<&'a Tensor, AutodagError> {
    expect_arity(operation, inputs.len(), 1)?;
    Ok(inputs[0])
}

pub(crate) fn binary_inputs<'a>(
    operation: &str,
    inputs: &[&'a Tensor],
) -> Result<(&'a Tensor, &'a Tensor), AutodagError> {
    expect_arity(operation, inputs.len(), 2)?;
    Ok((inputs[0], inputs[1]))
}

/// First tangent of a unary rule.
pub(crate) fn unary_tangent<'a>(operation: &str, tangents: &'a [Buffer]) -> Result<&'a Buffer, AutodagError> {
    expect_arity(operation, tangents.len(), 1)?;
    Ok(&tangents[0])
}

pub(crate) fn binary_tangents<'a>(
    operation: &str,
    tangents: &'a [Buffer],
) -> Result<(&'a Buffer, &'a Buffer), AutodagError> {
    expect_arity(operation, tangents.len(), 2)?;
    Ok((&tangents[0], &tangents[1]))
}

/// 0-dimensional constant of the same dtype as `like`, used to lift scalar
/// operands into tensors.
pub(crate) fn scalar_like(like: &Tensor, value: f64) -> Tensor {
    Tensor::from_buffer(Buffer::full(&[], value, like.dtype()))
}
