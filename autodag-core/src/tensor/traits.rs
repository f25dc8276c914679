// src/tensor/traits.rs

use crate::tensor::Tensor;
use std::fmt::{self, Debug};
use std::rc::Rc;

impl Clone for Tensor {
    /// Shallow clone: the new handle shares data, gradient and graph node.
    fn clone(&self) -> Self {
        Tensor {
            data: Rc::clone(&self.data),
        }
    }
}

impl Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let td = self.read_data();
        write!(
            f,
            "Tensor(shape={:?}, dtype={:?}, requires_grad={}, is_leaf={}",
            td.shape(),
            td.dtype(),
            td.requires_grad,
            td.is_leaf
        )?;
        if let Some(node) = &td.grad_fn {
            write!(f, ", grad_fn={}", node.name())?;
        }
        write!(f, ")")
    }
}

impl PartialEq for Tensor {
    /// Two tensors are equal if they are the same handle or hold equal buffers
    /// (same dtype, shape and values). Graph state is ignored.
    fn eq(&self, other: &Self) -> bool {
        if Rc::ptr_eq(&self.data, &other.data) {
            return true;
        }
        *self.read_data().buffer == *other.read_data().buffer
    }
}
