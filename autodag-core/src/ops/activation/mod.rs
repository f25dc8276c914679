//! # Activation Functions
//!
//! Element-wise non-linearities. Each one saves its pre-activation input (and
//! its parameter, if any); backward and tangent multiply the incoming buffer
//! by a derivative mask computed from them.

use num_traits::Float;

pub mod elu;
pub mod leaky_relu;
pub mod relu;

pub use elu::elu_op;
pub use leaky_relu::leaky_relu_op;
pub use relu::{relu6_op, relu_op};

/// Converts a saved `f64` parameter to the buffer's float type.
pub(crate) fn float_param<F: Float>(value: f64) -> F {
    F::from(value).unwrap_or_else(F::nan)
}
