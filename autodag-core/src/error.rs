use crate::types::DType;
use thiserror::Error;

/// Custom error type for the autodag engine.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum AutodagError {
    /// `backward`, `grad` or `vjp` reached a tensor that was never produced by a
    /// tracked operation.
    #[error("Cannot backpropagate through a tensor with no producer node")]
    NoGraph,

    #[error("A seed gradient must be passed when the output has more than one element, got {numel} elements")]
    AmbiguousSeed { numel: usize },

    #[error("Argument '{argument}' must have a floating-point dtype to be differentiated, got {dtype:?}")]
    NonDifferentiableType { argument: String, dtype: DType },

    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Operation '{operation}' requires a tensor of rank at least {min_rank}, got rank {actual}")]
    RankTooLow {
        min_rank: usize,
        actual: usize,
        operation: String,
    },

    #[error("Cannot broadcast shapes: {shape1:?} and {shape2:?}")]
    BroadcastError {
        shape1: Vec<usize>,
        shape2: Vec<usize>,
    },

    #[error("DType mismatch for operation '{operation}': expected {expected:?}, got {actual:?}")]
    DTypeMismatch {
        expected: DType,
        actual: DType,
        operation: String,
    },

    #[error("Operation '{operation}' does not support dtype {dtype:?}")]
    UnsupportedDType { dtype: DType, operation: String },

    #[error("Invalid permutation: dims {dims:?} are not a valid permutation for rank {rank}")]
    InvalidPermutation { dims: Vec<usize>, rank: usize },

    #[error("Axis {axis} is out of range for a tensor of rank {rank}")]
    InvalidAxis { axis: usize, rank: usize },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("requires_grad can only be changed on leaf tensors")]
    RequiresGradOnNonLeaf,

    #[error("Operation '{operation}' expected {expected} tensors, got {actual}")]
    ArityMismatch {
        operation: String,
        expected: usize,
        actual: usize,
    },

    #[error("Operation '{operation}' has no saved parameter '{name}'")]
    MissingParameter { operation: String, name: String },

    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}
