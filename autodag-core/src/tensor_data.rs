// src/tensor_data.rs
use std::rc::{Rc, Weak};

use crate::autograd::graph::Node;
use crate::buffer::Buffer;
use crate::tensor::{Tensor, TensorId};
use crate::types::DType;

/// Internal storage and metadata for a Tensor.
///
/// This struct holds the data buffer and the autograd-related information.
/// It is wrapped in `Rc<RefCell<TensorData>>` by the `Tensor` struct to allow
/// shared ownership and interior mutability within a single thread.
#[derive(Debug)]
pub struct TensorData {
    /// Identity of this tensor state, never reused within the process.
    pub(crate) id: TensorId,
    /// The array payload. Wrapped in `Rc` so that detached copies and saved
    /// tensors share it without copying.
    pub(crate) buffer: Rc<Buffer>,

    // --- Autograd Metadata ---
    /// Flag indicating if operations involving this tensor are tracked.
    pub(crate) requires_grad: bool,
    /// `true` for tensors created by the user; `false` for outputs of tracked operations.
    pub(crate) is_leaf: bool,
    /// Accumulated gradient. Only ever populated on leaf tensors.
    pub(crate) grad: Option<Tensor>,
    /// Forward-mode tangent carried next to the primal value.
    pub(crate) tangent: Option<Tensor>,
    /// Node of the operation that produced this tensor. Leaf tensors have `None`.
    pub(crate) grad_fn: Option<Rc<Node>>,
    /// Accumulator node shared by every graph position that refers to this leaf.
    /// Held weakly: the graph owns it, the leaf only finds it again.
    pub(crate) accumulator: Weak<Node>,
}

impl TensorData {
    /// Creates a leaf `TensorData` that does not require gradients.
    pub fn new(buffer: Buffer) -> Self {
        TensorData {
            id: TensorId::fresh(),
            buffer: Rc::new(buffer),
            requires_grad: false,
            is_leaf: true,
            grad: None,
            tangent: None,
            grad_fn: None,
            accumulator: Weak::new(),
        }
    }

    /// Creates a leaf sharing an existing buffer (used by `detach`).
    pub(crate) fn from_shared(buffer: Rc<Buffer>) -> Self {
        TensorData {
            id: TensorId::fresh(),
            buffer,
            requires_grad: false,
            is_leaf: true,
            grad: None,
            tangent: None,
            grad_fn: None,
            accumulator: Weak::new(),
        }
    }

    pub fn shape(&self) -> &[usize] {
        self.buffer.shape()
    }

    pub fn dtype(&self) -> DType {
        self.buffer.dtype()
    }

    /// Returns the total number of elements.
    pub fn numel(&self) -> usize {
        self.buffer.numel()
    }
}
