use crate::error::AutodagError;
use crate::tensor::utils::broadcast_shapes;
use crate::types::DType;
use ndarray::{ArrayD, IxDyn, Zip};
use num_traits::Float;

/// Dense array payload of a tensor, tagged with its element type.
///
/// The buffer is the boundary to the array backend: every numeric kernel of
/// the engine operates on `Buffer`s and never on tensors. Buffers are always
/// owned and in standard (row-major) layout after any kernel returns.
#[derive(Debug, Clone, PartialEq)]
pub enum Buffer {
    F32(ArrayD<f32>),
    F64(ArrayD<f64>),
    I64(ArrayD<i64>),
    Bool(ArrayD<bool>),
}

/// Runs `$body` for a float buffer and rewraps the result in the same variant.
/// Integer and boolean buffers are rejected with `UnsupportedDType`.
macro_rules! float_unary {
    ($buf:expr, $op:expr, |$a:ident| $body:expr) => {
        match $buf {
            $crate::buffer::Buffer::F32($a) => Ok($crate::buffer::Buffer::F32($body)),
            $crate::buffer::Buffer::F64($a) => Ok($crate::buffer::Buffer::F64($body)),
            other => Err($crate::error::AutodagError::UnsupportedDType {
                dtype: other.dtype(),
                operation: $op.to_string(),
            }),
        }
    };
}
pub(crate) use float_unary;

/// Two-operand version of [`float_unary`]. Both operands must share the same
/// float dtype: there is no promotion.
macro_rules! float_binary {
    ($lhs:expr, $rhs:expr, $op:expr, |$a:ident, $b:ident| $body:expr) => {
        match ($lhs, $rhs) {
            ($crate::buffer::Buffer::F32($a), $crate::buffer::Buffer::F32($b)) => {
                Ok($crate::buffer::Buffer::F32($body))
            }
            ($crate::buffer::Buffer::F64($a), $crate::buffer::Buffer::F64($b)) => {
                Ok($crate::buffer::Buffer::F64($body))
            }
            (l, r) => Err($crate::buffer::binary_dtype_error(l, r, $op)),
        }
    };
}
pub(crate) use float_binary;

pub(crate) fn binary_dtype_error(lhs: &Buffer, rhs: &Buffer, operation: &str) -> AutodagError {
    let (l, r) = (lhs.dtype(), rhs.dtype());
    if !l.is_floating_point() {
        AutodagError::UnsupportedDType {
            dtype: l,
            operation: operation.to_string(),
        }
    } else if !r.is_floating_point() {
        AutodagError::UnsupportedDType {
            dtype: r,
            operation: operation.to_string(),
        }
    } else {
        AutodagError::DTypeMismatch {
            expected: l,
            actual: r,
            operation: operation.to_string(),
        }
    }
}

/// Broadcasts both arrays to their common shape and maps them element-wise.
pub(crate) fn zip_broadcast<A, B, C, F>(
    a: &ArrayD<A>,
    b: &ArrayD<B>,
    mut f: F,
) -> Result<ArrayD<C>, AutodagError>
where
    A: Clone,
    B: Clone,
    F: FnMut(A, B) -> C,
{
    let shape = broadcast_shapes(a.shape(), b.shape())?;
    let broadcast_error = || AutodagError::BroadcastError {
        shape1: a.shape().to_vec(),
        shape2: b.shape().to_vec(),
    };
    let a_view = a.broadcast(IxDyn(&shape)).ok_or_else(broadcast_error)?;
    let b_view = b.broadcast(IxDyn(&shape)).ok_or_else(broadcast_error)?;
    Ok(Zip::from(a_view)
        .and(b_view)
        .map_collect(|x, y| f(x.clone(), y.clone())))
}

/// Applies `f(element, value)` with `value` converted to the array's float type.
pub(crate) fn scalar_map<F, M>(a: &ArrayD<F>, value: f64, f: M) -> ArrayD<F>
where
    F: Float,
    M: Fn(F, F) -> F,
{
    let value = num_traits::cast::<f64, F>(value).unwrap_or_else(F::nan);
    a.mapv(|x| f(x, value))
}

impl Buffer {
    /// Returns the element type of the buffer.
    pub fn dtype(&self) -> DType {
        match self {
            Buffer::F32(_) => DType::F32,
            Buffer::F64(_) => DType::F64,
            Buffer::I64(_) => DType::I64,
            Buffer::Bool(_) => DType::Bool,
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            Buffer::F32(a) => a.shape(),
            Buffer::F64(a) => a.shape(),
            Buffer::I64(a) => a.shape(),
            Buffer::Bool(a) => a.shape(),
        }
    }

    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    pub fn numel(&self) -> usize {
        self.shape().iter().product()
    }

    /// Builds a buffer of the requested dtype from row-major `f64` values.
    pub fn from_f64_vec(data: Vec<f64>, shape: &[usize], dtype: DType) -> Result<Self, AutodagError> {
        let data_len = data.len();
        let array = ArrayD::from_shape_vec(IxDyn(shape), data).map_err(|_| {
            AutodagError::TensorCreationError {
                data_len,
                shape: shape.to_vec(),
            }
        })?;
        Ok(Buffer::F64(array).cast(dtype))
    }

    pub fn full(shape: &[usize], value: f64, dtype: DType) -> Self {
        Buffer::F64(ArrayD::from_elem(IxDyn(shape), value)).cast(dtype)
    }

    pub fn zeros(shape: &[usize], dtype: DType) -> Self {
        match dtype {
            DType::F32 => Buffer::F32(ArrayD::zeros(IxDyn(shape))),
            DType::F64 => Buffer::F64(ArrayD::zeros(IxDyn(shape))),
            DType::I64 => Buffer::I64(ArrayD::zeros(IxDyn(shape))),
            DType::Bool => Buffer::Bool(ArrayD::from_elem(IxDyn(shape), false)),
        }
    }

    pub fn ones(shape: &[usize], dtype: DType) -> Self {
        match dtype {
            DType::F32 => Buffer::F32(ArrayD::ones(IxDyn(shape))),
            DType::F64 => Buffer::F64(ArrayD::ones(IxDyn(shape))),
            DType::I64 => Buffer::I64(ArrayD::ones(IxDyn(shape))),
            DType::Bool => Buffer::Bool(ArrayD::from_elem(IxDyn(shape), true)),
        }
    }

    pub fn zeros_like(&self) -> Self {
        Buffer::zeros(self.shape(), self.dtype())
    }

    pub fn ones_like(&self) -> Self {
        Buffer::ones(self.shape(), self.dtype())
    }

    /// Standard-basis element: zeros everywhere except a one at the row-major
    /// position `index`.
    pub fn one_hot(shape: &[usize], index: usize, dtype: DType) -> Result<Self, AutodagError> {
        let len: usize = shape.iter().product();
        if index >= len {
            return Err(AutodagError::IndexOutOfBounds { index, len });
        }
        let mut data = vec![0.0; len];
        data[index] = 1.0;
        Buffer::from_f64_vec(data, shape, dtype)
    }

    /// Converts the buffer to another dtype. Converting to the same dtype is a clone.
    pub fn cast(&self, dtype: DType) -> Buffer {
        if self.dtype() == dtype {
            return self.clone();
        }
        let as_f64 = match self {
            Buffer::F32(a) => a.mapv(f64::from),
            Buffer::F64(a) => a.clone(),
            Buffer::I64(a) => a.mapv(|x| x as f64),
            Buffer::Bool(a) => a.mapv(|x| if x { 1.0 } else { 0.0 }),
        };
        match dtype {
            DType::F32 => Buffer::F32(as_f64.mapv(|x| x as f32)),
            DType::F64 => Buffer::F64(as_f64),
            DType::I64 => Buffer::I64(as_f64.mapv(|x| x as i64)),
            DType::Bool => Buffer::Bool(as_f64.mapv(|x| x != 0.0)),
        }
    }

    /// Copies the elements out in row-major order as `f64`.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        match self.cast(DType::F64) {
            Buffer::F64(a) => a.iter().copied().collect(),
            _ => Vec::new(),
        }
    }

    /// Returns a copy with `delta` added to the row-major element `index`.
    pub(crate) fn perturbed(&self, index: usize, delta: f64) -> Result<Buffer, AutodagError> {
        let mut data = self.to_f64_vec();
        let len = data.len();
        let slot = data
            .get_mut(index)
            .ok_or(AutodagError::IndexOutOfBounds { index, len })?;
        *slot += delta;
        Buffer::from_f64_vec(data, self.shape(), self.dtype())
    }

    // --- Element-wise arithmetic (broadcasting) ---

    pub fn add(&self, other: &Buffer) -> Result<Buffer, AutodagError> {
        float_binary!(self, other, "add", |a, b| zip_broadcast(a, b, |x, y| x + y)?)
    }

    pub fn sub(&self, other: &Buffer) -> Result<Buffer, AutodagError> {
        float_binary!(self, other, "sub", |a, b| zip_broadcast(a, b, |x, y| x - y)?)
    }

    pub fn mul(&self, other: &Buffer) -> Result<Buffer, AutodagError> {
        float_binary!(self, other, "mul", |a, b| zip_broadcast(a, b, |x, y| x * y)?)
    }

    pub fn div(&self, other: &Buffer) -> Result<Buffer, AutodagError> {
        float_binary!(self, other, "div", |a, b| zip_broadcast(a, b, |x, y| x / y)?)
    }

    pub fn pow(&self, other: &Buffer) -> Result<Buffer, AutodagError> {
        float_binary!(self, other, "pow", |a, b| zip_broadcast(a, b, |x, y| x.powf(y))?)
    }

    pub fn neg(&self) -> Result<Buffer, AutodagError> {
        float_unary!(self, "neg", |a| a.mapv(|x| -x))
    }

    pub fn add_scalar(&self, value: f64) -> Result<Buffer, AutodagError> {
        float_unary!(self, "add_scalar", |a| scalar_map(a, value, |x, v| x + v))
    }

    pub fn mul_scalar(&self, value: f64) -> Result<Buffer, AutodagError> {
        float_unary!(self, "mul_scalar", |a| scalar_map(a, value, |x, v| x * v))
    }

    // --- Element-wise math ---

    pub fn exp(&self) -> Result<Buffer, AutodagError> {
        float_unary!(self, "exp", |a| a.mapv(|x| x.exp()))
    }

    pub fn ln(&self) -> Result<Buffer, AutodagError> {
        float_unary!(self, "ln", |a| a.mapv(|x| x.ln()))
    }

    pub fn sin(&self) -> Result<Buffer, AutodagError> {
        float_unary!(self, "sin", |a| a.mapv(|x| x.sin()))
    }

    pub fn cos(&self) -> Result<Buffer, AutodagError> {
        float_unary!(self, "cos", |a| a.mapv(|x| x.cos()))
    }

    pub fn tanh(&self) -> Result<Buffer, AutodagError> {
        float_unary!(self, "tanh", |a| a.mapv(|x| x.tanh()))
    }

    /// Broadcasts to `shape` and materializes the result.
    pub fn broadcast_to(&self, shape: &[usize]) -> Result<Buffer, AutodagError> {
        let error = || AutodagError::BroadcastError {
            shape1: self.shape().to_vec(),
            shape2: shape.to_vec(),
        };
        match self {
            Buffer::F32(a) => Ok(Buffer::F32(a.broadcast(IxDyn(shape)).ok_or_else(error)?.to_owned())),
            Buffer::F64(a) => Ok(Buffer::F64(a.broadcast(IxDyn(shape)).ok_or_else(error)?.to_owned())),
            Buffer::I64(a) => Ok(Buffer::I64(a.broadcast(IxDyn(shape)).ok_or_else(error)?.to_owned())),
            Buffer::Bool(a) => Ok(Buffer::Bool(a.broadcast(IxDyn(shape)).ok_or_else(error)?.to_owned())),
        }
    }
}
