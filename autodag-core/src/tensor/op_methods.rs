use crate::error::AutodagError;
use crate::ops::{activation, arithmetic, linalg, math_elem, reduction, view};
use crate::tensor::Tensor;

/// Method forms of the operations in [`crate::ops`]. Each one delegates to
/// the corresponding `_op` function and records a graph node when tracking
/// is active.
impl Tensor {
    // --- Arithmetic ---

    pub fn add(&self, other: &Tensor) -> Result<Tensor, AutodagError> {
        arithmetic::add_op(self, other)
    }

    pub fn sub(&self, other: &Tensor) -> Result<Tensor, AutodagError> {
        arithmetic::sub_op(self, other)
    }

    pub fn mul(&self, other: &Tensor) -> Result<Tensor, AutodagError> {
        arithmetic::mul_op(self, other)
    }

    pub fn div(&self, other: &Tensor) -> Result<Tensor, AutodagError> {
        arithmetic::div_op(self, other)
    }

    pub fn neg(&self) -> Result<Tensor, AutodagError> {
        arithmetic::neg_op(self)
    }

    pub fn pow(&self, exponent: &Tensor) -> Result<Tensor, AutodagError> {
        arithmetic::pow_op(self, exponent)
    }

    pub fn add_scalar(&self, value: f64) -> Result<Tensor, AutodagError> {
        arithmetic::add_scalar_op(self, value)
    }

    pub fn mul_scalar(&self, value: f64) -> Result<Tensor, AutodagError> {
        arithmetic::mul_scalar_op(self, value)
    }

    pub fn pow_scalar(&self, exponent: f64) -> Result<Tensor, AutodagError> {
        arithmetic::pow_scalar_op(self, exponent)
    }

    // --- Element-wise math ---

    pub fn exp(&self) -> Result<Tensor, AutodagError> {
        math_elem::exp_op(self)
    }

    /// Natural logarithm.
    pub fn ln(&self) -> Result<Tensor, AutodagError> {
        math_elem::ln_op(self)
    }

    pub fn sin(&self) -> Result<Tensor, AutodagError> {
        math_elem::sin_op(self)
    }

    pub fn cos(&self) -> Result<Tensor, AutodagError> {
        math_elem::cos_op(self)
    }

    pub fn tanh(&self) -> Result<Tensor, AutodagError> {
        math_elem::tanh_op(self)
    }

    // --- Linear algebra ---

    /// Matrix product over the trailing two axes, broadcasting batch axes.
    pub fn matmul(&self, other: &Tensor) -> Result<Tensor, AutodagError> {
        linalg::matmul_op(self, other)
    }

    pub fn permute(&self, axes: &[usize]) -> Result<Tensor, AutodagError> {
        linalg::permute_op(self, axes)
    }

    pub fn transpose(&self, dim0: usize, dim1: usize) -> Result<Tensor, AutodagError> {
        linalg::transpose_op(self, dim0, dim1)
    }

    // --- Reductions ---

    /// Sums over `axes`, or over every axis when `axes` is `None`.
    pub fn sum(&self, axes: Option<&[usize]>, keepdims: bool) -> Result<Tensor, AutodagError> {
        reduction::sum_op(self, axes, keepdims)
    }

    pub fn mean(&self, axes: Option<&[usize]>, keepdims: bool) -> Result<Tensor, AutodagError> {
        reduction::mean_op(self, axes, keepdims)
    }

    // --- Shape ---

    /// Copies the elements into a new shape with the same number of elements.
    pub fn reshape(&self, shape: &[usize]) -> Result<Tensor, AutodagError> {
        view::reshape_op(self, shape)
    }

    /// Drops `dim`, which must have size 1, or every size-1 dim when `None`.
    pub fn squeeze(&self, dim: Option<usize>) -> Result<Tensor, AutodagError> {
        view::squeeze_op(self, dim)
    }

    pub fn unsqueeze(&self, dim: usize) -> Result<Tensor, AutodagError> {
        view::unsqueeze_op(self, dim)
    }

    /// Tracked copy into new storage. `clone()` only copies the handle.
    pub fn deep_clone(&self) -> Result<Tensor, AutodagError> {
        view::clone_op(self)
    }

    // --- Activations ---

    pub fn relu(&self) -> Result<Tensor, AutodagError> {
        activation::relu_op(self)
    }

    pub fn relu6(&self) -> Result<Tensor, AutodagError> {
        activation::relu6_op(self)
    }

    pub fn leaky_relu(&self, slope: f64) -> Result<Tensor, AutodagError> {
        activation::leaky_relu_op(self, slope)
    }

    pub fn elu(&self, alpha: f64) -> Result<Tensor, AutodagError> {
        activation::elu_op(self, alpha)
    }
}
