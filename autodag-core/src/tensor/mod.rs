// src/tensor/mod.rs

use crate::buffer::Buffer;
use crate::error::AutodagError;
use crate::tensor_data::TensorData;
use crate::types::DType;
use ndarray::{ArrayD, IxDyn};
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

mod autograd_methods;
mod op_methods;
mod traits;

pub mod broadcast_utils;
pub mod create;
pub mod utils;

// Re-export creation functions to make them public
pub use create::{
    eye_f64, full, full_f64, ones, ones_f64, ones_like, rand_f64, rand_f64_with_rng, randn_f64,
    randn_f64_with_rng, zeros, zeros_f64, zeros_like,
};

/// Represents a multi-dimensional array (tensor) taking part in automatic differentiation.
///
/// `Tensor` is a handle around `Rc<RefCell<TensorData>>`:
/// 1.  **Shared Ownership:** clones point to the same data, gradient and graph
///     node (cheap clones).
/// 2.  **Interior Mutability:** `grad`, `tangent` and the graph links are
///     updated through shared handles during graph construction and backward.
///
/// The handle is deliberately `!Send`: the engine is single-threaded.
pub struct Tensor {
    pub(crate) data: Rc<RefCell<TensorData>>,
}

/// Identity of a tensor's shared state, stable across handle clones.
///
/// Ids come from a process-wide counter, so an id is never handed out twice
/// even after the tensor that held it is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TensorId(u64);

static NEXT_TENSOR_ID: AtomicU64 = AtomicU64::new(0);

impl TensorId {
    pub(crate) fn fresh() -> Self {
        TensorId(NEXT_TENSOR_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Tensor {
    /// Creates a new F32 tensor from row-major data and a shape.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, AutodagError> {
        let data_len = data_vec.len();
        let array = ArrayD::from_shape_vec(IxDyn(&shape), data_vec)
            .map_err(|_| AutodagError::TensorCreationError { data_len, shape })?;
        Ok(Tensor::from_buffer(Buffer::F32(array)))
    }

    /// Creates a new F64 tensor from row-major data and a shape.
    pub fn new_f64(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<Self, AutodagError> {
        let data_len = data_vec.len();
        let array = ArrayD::from_shape_vec(IxDyn(&shape), data_vec)
            .map_err(|_| AutodagError::TensorCreationError { data_len, shape })?;
        Ok(Tensor::from_buffer(Buffer::F64(array)))
    }

    /// Creates a new I64 tensor. Integer tensors cannot require gradients.
    pub fn new_i64(data_vec: Vec<i64>, shape: Vec<usize>) -> Result<Self, AutodagError> {
        let data_len = data_vec.len();
        let array = ArrayD::from_shape_vec(IxDyn(&shape), data_vec)
            .map_err(|_| AutodagError::TensorCreationError { data_len, shape })?;
        Ok(Tensor::from_buffer(Buffer::I64(array)))
    }

    pub fn new_bool(data_vec: Vec<bool>, shape: Vec<usize>) -> Result<Self, AutodagError> {
        let data_len = data_vec.len();
        let array = ArrayD::from_shape_vec(IxDyn(&shape), data_vec)
            .map_err(|_| AutodagError::TensorCreationError { data_len, shape })?;
        Ok(Tensor::from_buffer(Buffer::Bool(array)))
    }

    /// 0-dimensional F32 tensor.
    pub fn scalar(value: f32) -> Self {
        Tensor::from_buffer(Buffer::F32(ArrayD::from_elem(IxDyn(&[]), value)))
    }

    /// 0-dimensional F64 tensor.
    pub fn scalar_f64(value: f64) -> Self {
        Tensor::from_buffer(Buffer::F64(ArrayD::from_elem(IxDyn(&[]), value)))
    }

    /// Wraps a buffer into a fresh leaf tensor.
    pub fn from_buffer(buffer: Buffer) -> Self {
        Tensor {
            data: Rc::new(RefCell::new(TensorData::new(buffer))),
        }
    }

    /// Borrows the tensor's data immutably.
    ///
    /// Panics if the data is currently borrowed mutably, which the engine never
    /// does across a call boundary.
    pub fn read_data(&self) -> Ref<'_, TensorData> {
        self.data.borrow()
    }

    /// Borrows the tensor's data mutably.
    pub fn write_data(&self) -> RefMut<'_, TensorData> {
        self.data.borrow_mut()
    }

    /// Returns the data type (`DType`) of the tensor elements.
    pub fn dtype(&self) -> DType {
        self.read_data().dtype()
    }

    /// Returns a clone of the tensor's shape.
    pub fn shape(&self) -> Vec<usize> {
        self.read_data().shape().to_vec()
    }

    pub fn ndim(&self) -> usize {
        self.read_data().shape().len()
    }

    /// Returns the number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.read_data().numel()
    }

    /// Shared handle on the array payload.
    pub fn buffer(&self) -> Rc<Buffer> {
        Rc::clone(&self.read_data().buffer)
    }

    /// Copies the elements out as `f64`, in row-major order.
    pub fn to_vec_f64(&self) -> Vec<f64> {
        self.read_data().buffer.to_f64_vec()
    }

    /// Value of a one-element tensor.
    pub fn item(&self) -> Result<f64, AutodagError> {
        let values = self.to_vec_f64();
        match values.as_slice() {
            [value] => Ok(*value),
            _ => Err(AutodagError::ShapeMismatch {
                expected: vec![],
                actual: self.shape(),
                operation: "item".to_string(),
            }),
        }
    }

    /// Identity of the shared tensor state. Clones share it; `detach` does not.
    pub fn id(&self) -> TensorId {
        self.read_data().id
    }

    /// Returns a copy of this tensor converted to `dtype`, detached from the graph.
    pub fn to_dtype(&self, dtype: DType) -> Tensor {
        Tensor::from_buffer(self.read_data().buffer.cast(dtype))
    }
}
