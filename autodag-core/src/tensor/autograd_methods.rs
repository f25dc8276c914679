// src/tensor/autograd_methods.rs

use crate::autograd::backward;
use crate::autograd::graph::Node;
use crate::buffer::Buffer;
use crate::error::AutodagError;
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;
use std::cell::RefCell;
use std::rc::Rc;

impl Tensor {
    /// Checks if operations involving this tensor are tracked.
    pub fn requires_grad(&self) -> bool {
        self.read_data().requires_grad
    }

    /// `true` for tensors created by the user, `false` for outputs of tracked operations.
    pub fn is_leaf(&self) -> bool {
        self.read_data().is_leaf
    }

    /// Sets the `requires_grad` status of this tensor **in-place**.
    ///
    /// Only allowed on leaf tensors, and only floating-point tensors may be
    /// switched on.
    pub fn requires_grad_(&self, requires_grad: bool) -> Result<(), AutodagError> {
        let mut guard = self.write_data();
        if !guard.is_leaf {
            return Err(AutodagError::RequiresGradOnNonLeaf);
        }
        if requires_grad && !guard.dtype().is_floating_point() {
            return Err(AutodagError::NonDifferentiableType {
                argument: "self".to_string(),
                dtype: guard.dtype(),
            });
        }
        if requires_grad && guard.requires_grad {
            log::warn!("requires_grad_(true) called on a tensor that already requires grad");
        }
        guard.requires_grad = requires_grad;
        Ok(())
    }

    /// Builder form of [`Tensor::requires_grad_`].
    pub fn with_requires_grad(self, requires_grad: bool) -> Result<Self, AutodagError> {
        self.requires_grad_(requires_grad)?;
        Ok(self)
    }

    /// Returns a handle on the accumulated gradient, if any.
    pub fn grad(&self) -> Option<Tensor> {
        self.read_data().grad.clone()
    }

    /// Returns the forward-mode tangent, if any.
    pub fn tangent(&self) -> Option<Tensor> {
        self.read_data().tangent.clone()
    }

    pub(crate) fn set_tangent(&self, tangent: Option<Tensor>) {
        self.write_data().tangent = tangent;
    }

    /// Returns the node of the operation that produced this tensor.
    pub fn grad_fn(&self) -> Option<Rc<Node>> {
        self.read_data().grad_fn.clone()
    }

    /// Creates a new leaf tensor that shares the same buffer but is detached
    /// from the computation graph.
    pub fn detach(&self) -> Tensor {
        let buffer = Rc::clone(&self.read_data().buffer);
        Tensor {
            data: Rc::new(RefCell::new(TensorData::from_shared(buffer))),
        }
    }

    /// Resets the gradient of this tensor to `None`.
    pub fn zero_grad(&self) {
        self.write_data().grad = None;
    }

    /// Computes the gradients of this tensor w.r.t. the graph leaves and adds
    /// them into each leaf's `grad`.
    ///
    /// # Arguments
    /// * `gradient`: seed gradient. If `None`, the tensor must hold exactly one
    ///   element and the seed is a one.
    ///
    /// # Errors
    /// `NoGraph` on a tensor without a producer node, `AmbiguousSeed` for a
    /// missing seed on a multi-element tensor, and `NonDifferentiableType` or
    /// `ShapeMismatch` for an invalid seed.
    pub fn backward(&self, gradient: Option<&Tensor>) -> Result<(), AutodagError> {
        backward(self, gradient)
    }

    /// Adds `grad` into this tensor's gradient, casting it to the tensor's dtype.
    /// The gradient shape must already match the tensor shape.
    pub(crate) fn accumulate_grad(&self, grad: Buffer) -> Result<(), AutodagError> {
        let mut guard = self.write_data();
        if grad.shape() != guard.shape() {
            return Err(AutodagError::ShapeMismatch {
                expected: guard.shape().to_vec(),
                actual: grad.shape().to_vec(),
                operation: "accumulate_grad".to_string(),
            });
        }
        let grad = grad.cast(guard.dtype());
        let summed = match &guard.grad {
            Some(existing) => existing.read_data().buffer.add(&grad)?,
            None => grad,
        };
        guard.grad = Some(Tensor::from_buffer(summed));
        Ok(())
    }
}

#[cfg(test)]
#[path = "autograd_methods_test.rs"]
mod tests;
