use crate::autograd::{apply, Context, Function};
use crate::buffer::Buffer;
use crate::error::AutodagError;
use crate::ops::linalg::transpose::transpose_last2;
use crate::ops::{binary_inputs, binary_tangents};
use crate::tensor::utils::broadcast_shapes;
use crate::tensor::Tensor;
use ndarray::{Array3, ArrayD, Axis, IxDyn, LinalgScalar};

/// Splits a `[..batch, rows, cols]` shape. Requires rank >= 2.
fn split_matrix_shape(shape: &[usize]) -> Result<(&[usize], usize, usize), AutodagError> {
    match shape {
        [batch @ .., rows, cols] => Ok((batch, *rows, *cols)),
        _ => Err(AutodagError::RankTooLow {
            min_rank: 2,
            actual: shape.len(),
            operation: "matmul".to_string(),
        }),
    }
}

/// Broadcasts `array` to `[..batch, rows, cols]` and flattens the batch dims.
fn to_batched<F: Clone>(
    array: &ArrayD<F>,
    batch: &[usize],
    rows: usize,
    cols: usize,
) -> Result<Array3<F>, AutodagError> {
    let batch_numel: usize = batch.iter().product();
    let mut full_shape = batch.to_vec();
    full_shape.extend([rows, cols]);
    let view = array
        .broadcast(IxDyn(&full_shape))
        .ok_or_else(|| AutodagError::BroadcastError {
            shape1: array.shape().to_vec(),
            shape2: full_shape.clone(),
        })?;
    let flat = view
        .to_shape((batch_numel, rows, cols))
        .map_err(|e| AutodagError::InternalError(format!("matmul reshape failed: {}", e)))?;
    Ok(flat.into_owned())
}

fn batched_matmul<F: LinalgScalar>(a: &ArrayD<F>, b: &ArrayD<F>) -> Result<ArrayD<F>, AutodagError> {
    let (batch_a, m, k) = split_matrix_shape(a.shape())?;
    let (batch_b, k_b, n) = split_matrix_shape(b.shape())?;
    if k != k_b {
        return Err(AutodagError::ShapeMismatch {
            expected: vec![k],
            actual: vec![k_b],
            operation: "matmul (inner dimensions)".to_string(),
        });
    }
    let batch = broadcast_shapes(batch_a, batch_b)?;
    let lhs = to_batched(a, &batch, m, k)?;
    let rhs = to_batched(b, &batch, k, n)?;

    let batch_numel = lhs.len_of(Axis(0));
    let mut out = Array3::<F>::zeros((batch_numel, m, n));
    for i in 0..batch_numel {
        let product = lhs.index_axis(Axis(0), i).dot(&rhs.index_axis(Axis(0), i));
        out.index_axis_mut(Axis(0), i).assign(&product);
    }

    let mut out_shape = batch;
    out_shape.extend([m, n]);
    let out = out
        .to_shape(IxDyn(&out_shape))
        .map_err(|e| AutodagError::InternalError(format!("matmul reshape failed: {}", e)))?;
    Ok(out.into_owned())
}

/// Batched matrix product on buffers. Both operands must share a float dtype.
pub(crate) fn matmul_buffers(a: &Buffer, b: &Buffer) -> Result<Buffer, AutodagError> {
    crate::buffer::float_binary!(a, b, "matmul", |x, y| batched_matmul(x, y)?)
}

/// Matrix multiplication over the trailing two axes; leading axes broadcast.
///
/// For `a: [..., m, k]` and `b: [..., k, n]` the output is `[..., m, n]`.
/// Gradients are `g @ bᵀ` and `aᵀ @ g`, where `ᵀ` swaps only the trailing
/// two axes; broadcast batch dims are reduced by the engine.
#[derive(Debug)]
pub struct Matmul;

impl Function for Matmul {
    fn name(&self) -> &'static str {
        "matmul"
    }

    fn forward(&self, ctx: &mut Context, inputs: &[&Tensor]) -> Result<Buffer, AutodagError> {
        let (a, b) = binary_inputs(self.name(), inputs)?;
        let out = matmul_buffers(&a.buffer(), &b.buffer())?;
        ctx.save_for_backward(&[a, b])?;
        Ok(out)
    }

    fn backward(&self, ctx: &Context, grad_output: &Buffer) -> Result<Vec<Buffer>, AutodagError> {
        let a = ctx.saved_buffer(0)?;
        let b = ctx.saved_buffer(1)?;
        let grad_a = matmul_buffers(grad_output, &transpose_last2(&b)?)?;
        let grad_b = matmul_buffers(&transpose_last2(&a)?, grad_output)?;
        Ok(vec![grad_a, grad_b])
    }

    fn tangent(&self, ctx: &Context, tangents: &[Buffer]) -> Result<Buffer, AutodagError> {
        let (ta, tb) = binary_tangents(self.name(), tangents)?;
        let a = ctx.saved_buffer(0)?;
        let b = ctx.saved_buffer(1)?;
        matmul_buffers(ta, &b)?.add(&matmul_buffers(&a, tb)?)
    }
}

pub fn matmul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, AutodagError> {
    apply(Matmul, &[a, b])
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
