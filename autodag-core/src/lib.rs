//! Automatic differentiation over dense N-dimensional tensors.
//!
//! Operations on [`Tensor`]s that require gradients are recorded into a
//! directed acyclic graph; [`backward`] and [`grad`] walk it in reverse,
//! while forward mode propagates tangents eagerly as values are computed.
//! The functional helpers ([`vjp`], [`jvp`], [`jacobian_reverse`],
//! [`jacobian_forward`]) and the finite-difference checker [`check_grad`]
//! are built on top of those two passes.

pub mod autograd;
pub mod buffer;
pub mod error;
pub mod ops;
pub mod tensor;
pub mod tensor_data;
pub mod types;
pub mod utils;

pub use autograd::{
    backward, check_grad, current_mode, forward_mode, grad, grad_mode, is_grad_enabled,
    jacobian_forward, jacobian_reverse, jvp, no_grad, vjp, with_grad_mode, Context, Discipline,
    Function, GradCheckConfig, GradCheckError, GradMode, GradModeGuard, Param,
};
pub use buffer::Buffer;
pub use error::AutodagError;
pub use tensor::{Tensor, TensorId};
pub use types::DType;

// Re-export traits required by public functions/structs
pub use num_traits;
