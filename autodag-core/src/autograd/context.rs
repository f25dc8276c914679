// src/autograd/context.rs

use crate::buffer::Buffer;
use crate::error::AutodagError;
use crate::tensor::Tensor;
use std::collections::BTreeMap;
use std::rc::Rc;

/// A named non-tensor value recorded by an operation's forward step.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Scalar(f64),
    Axes(Vec<usize>),
    Shape(Vec<usize>),
    Flag(bool),
}

/// Per-invocation record of what an operation needs for its backward and
/// tangent steps.
///
/// Saved tensors are stored detached: they share the buffer of the original
/// tensor but hold no graph links, so a node can never keep itself alive.
#[derive(Debug, Default)]
pub struct Context {
    saved: Vec<Tensor>,
    saved_once: bool,
    params: BTreeMap<&'static str, Param>,
    operation: &'static str,
}

impl Context {
    pub fn new(operation: &'static str) -> Self {
        Context {
            operation,
            ..Context::default()
        }
    }

    /// Records the tensors needed by backward. May only be called once per invocation.
    pub fn save_for_backward(&mut self, tensors: &[&Tensor]) -> Result<(), AutodagError> {
        if self.saved_once {
            return Err(AutodagError::InternalError(format!(
                "save_for_backward called twice by '{}'",
                self.operation
            )));
        }
        self.saved_once = true;
        self.saved = tensors.iter().map(|t| t.detach()).collect();
        Ok(())
    }

    /// Returns the `index`-th saved tensor.
    pub fn saved(&self, index: usize) -> Result<&Tensor, AutodagError> {
        self.saved.get(index).ok_or_else(|| AutodagError::IndexOutOfBounds {
            index,
            len: self.saved.len(),
        })
    }

    /// Returns the buffer of the `index`-th saved tensor.
    pub fn saved_buffer(&self, index: usize) -> Result<Rc<Buffer>, AutodagError> {
        Ok(self.saved(index)?.buffer())
    }

    pub fn num_saved(&self) -> usize {
        self.saved.len()
    }

    pub fn set_param(&mut self, name: &'static str, value: Param) {
        self.params.insert(name, value);
    }

    pub fn param(&self, name: &str) -> Result<&Param, AutodagError> {
        self.params.get(name).ok_or_else(|| self.missing(name))
    }

    pub fn scalar(&self, name: &str) -> Result<f64, AutodagError> {
        match self.param(name)? {
            Param::Scalar(value) => Ok(*value),
            _ => Err(self.missing(name)),
        }
    }

    pub fn axes(&self, name: &str) -> Result<&[usize], AutodagError> {
        match self.param(name)? {
            Param::Axes(axes) => Ok(axes),
            _ => Err(self.missing(name)),
        }
    }

    pub fn shape(&self, name: &str) -> Result<&[usize], AutodagError> {
        match self.param(name)? {
            Param::Shape(shape) => Ok(shape),
            _ => Err(self.missing(name)),
        }
    }

    pub fn flag(&self, name: &str) -> Result<bool, AutodagError> {
        match self.param(name)? {
            Param::Flag(flag) => Ok(*flag),
            _ => Err(self.missing(name)),
        }
    }

    fn missing(&self, name: &str) -> AutodagError {
        AutodagError::MissingParameter {
            operation: self.operation.to_string(),
            name: name.to_string(),
        }
    }
}
