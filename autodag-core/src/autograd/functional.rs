// src/autograd/functional.rs

use crate::autograd::backward::grad;
use crate::autograd::mode::{grad_mode, no_grad, Discipline};
use crate::buffer::Buffer;
use crate::error::AutodagError;
use crate::tensor::Tensor;
use crate::types::DType;

fn check_differentiable(argument: &str, tensors: &[Tensor]) -> Result<(), AutodagError> {
    for (i, tensor) in tensors.iter().enumerate() {
        if !tensor.dtype().is_floating_point() {
            return Err(AutodagError::NonDifferentiableType {
                argument: format!("{}[{}]", argument, i),
                dtype: tensor.dtype(),
            });
        }
    }
    Ok(())
}

/// Fresh leaves sharing the inputs' buffers, with gradients switched on.
fn fresh_leaves(inputs: &[Tensor]) -> Result<Vec<Tensor>, AutodagError> {
    inputs.iter().map(|t| t.detach().with_requires_grad(true)).collect()
}

/// Vector-Jacobian product of `f` at `inputs`.
///
/// `f` runs in reverse mode on detached copies of the inputs, so the caller's
/// tensors and their `.grad` are never touched. Returns the detached output
/// and one gradient per input.
pub fn vjp<F>(inputs: &[Tensor], cotangent: &Tensor, f: F) -> Result<(Tensor, Vec<Tensor>), AutodagError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, AutodagError>,
{
    check_differentiable("inputs", inputs)?;
    check_differentiable("cotangent", std::slice::from_ref(cotangent))?;
    let leaves = fresh_leaves(inputs)?;
    let output = {
        let _guard = grad_mode(true, Discipline::Reverse);
        f(&leaves)?
    };
    let grads = grad(&leaves, &output, Some(cotangent))?;
    Ok((output.detach(), grads))
}

/// Jacobian-vector product of `f` at `inputs` along `tangents`.
///
/// Tangents are propagated eagerly in forward mode. An output that does not
/// depend on the inputs has a zero tangent.
pub fn jvp<F>(inputs: &[Tensor], tangents: &[Tensor], f: F) -> Result<(Tensor, Tensor), AutodagError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, AutodagError>,
{
    check_differentiable("inputs", inputs)?;
    check_differentiable("tangents", tangents)?;
    if inputs.len() != tangents.len() {
        return Err(AutodagError::ArityMismatch {
            operation: "jvp".to_string(),
            expected: inputs.len(),
            actual: tangents.len(),
        });
    }
    let leaves = fresh_leaves(inputs)?;
    for (leaf, tangent) in leaves.iter().zip(tangents) {
        if leaf.shape() != tangent.shape() {
            return Err(AutodagError::ShapeMismatch {
                expected: leaf.shape(),
                actual: tangent.shape(),
                operation: "jvp".to_string(),
            });
        }
        leaf.set_tangent(Some(tangent.to_dtype(leaf.dtype())));
    }

    let output = {
        let _guard = grad_mode(true, Discipline::Forward);
        f(&leaves)?
    };
    let tangent = match output.tangent() {
        Some(tangent) => tangent,
        None => Tensor::from_buffer(output.buffer().zeros_like()),
    };
    Ok((output.detach(), tangent))
}

fn check_position(inputs: &[Tensor], pos: usize) -> Result<&Tensor, AutodagError> {
    inputs.get(pos).ok_or(AutodagError::IndexOutOfBounds {
        index: pos,
        len: inputs.len(),
    })
}

/// Row-major `(out_numel, in_numel)` matrix reshaped to `out_shape ++ in_shape`.
struct JacobianBuilder {
    data: Vec<f64>,
    out_numel: usize,
    in_numel: usize,
    shape: Vec<usize>,
}

impl JacobianBuilder {
    fn new(out_shape: &[usize], in_shape: &[usize]) -> Self {
        let out_numel = out_shape.iter().product();
        let in_numel = in_shape.iter().product();
        let mut shape = out_shape.to_vec();
        shape.extend_from_slice(in_shape);
        JacobianBuilder {
            data: vec![0.0; out_numel * in_numel],
            out_numel,
            in_numel,
            shape,
        }
    }

    fn assign_row(&mut self, row: usize, values: &[f64]) {
        let start = row * self.in_numel;
        self.data[start..start + values.len()].copy_from_slice(values);
    }

    fn assign_column(&mut self, col: usize, values: &[f64]) {
        for (r, value) in values.iter().enumerate() {
            self.data[r * self.in_numel + col] = *value;
        }
    }

    fn finish(self, dtype: DType) -> Result<Tensor, AutodagError> {
        Buffer::from_f64_vec(self.data, &self.shape, dtype).map(Tensor::from_buffer)
    }
}

/// Jacobian of `f` w.r.t. `inputs[pos]`, built one row at a time with [`vjp`].
///
/// Returns the output and a Jacobian of shape `output_shape ++ input_shape`.
pub fn jacobian_reverse<F>(inputs: &[Tensor], f: F, pos: usize) -> Result<(Tensor, Tensor), AutodagError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, AutodagError>,
{
    check_differentiable("inputs", inputs)?;
    let input = check_position(inputs, pos)?;
    let output = {
        let _guard = no_grad();
        f(inputs)?
    };
    let out_shape = output.shape();
    let dtype = output.dtype();
    let mut jacobian = JacobianBuilder::new(&out_shape, &input.shape());
    log::debug!(
        "jacobian_reverse: {} vjp call(s) for output {:?}",
        jacobian.out_numel,
        out_shape
    );

    for row in 0..jacobian.out_numel {
        let basis = Tensor::from_buffer(Buffer::one_hot(&out_shape, row, dtype)?);
        let (_, grads) = vjp(inputs, &basis, &f)?;
        let row_grad = grads.get(pos).ok_or(AutodagError::IndexOutOfBounds {
            index: pos,
            len: grads.len(),
        })?;
        jacobian.assign_row(row, &row_grad.to_vec_f64());
    }
    Ok((output, jacobian.finish(dtype)?))
}

/// Jacobian of `f` w.r.t. `inputs[pos]`, built one column at a time with [`jvp`].
///
/// The other inputs get zero tangents.
pub fn jacobian_forward<F>(inputs: &[Tensor], f: F, pos: usize) -> Result<(Tensor, Tensor), AutodagError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, AutodagError>,
{
    check_differentiable("inputs", inputs)?;
    let input = check_position(inputs, pos)?;
    let output = {
        let _guard = no_grad();
        f(inputs)?
    };
    let in_shape = input.shape();
    let mut jacobian = JacobianBuilder::new(&output.shape(), &in_shape);
    log::debug!(
        "jacobian_forward: {} jvp call(s) for input {:?}",
        jacobian.in_numel,
        in_shape
    );

    let mut tangents: Vec<Tensor> = inputs
        .iter()
        .map(|t| Tensor::from_buffer(t.buffer().zeros_like()))
        .collect();
    for col in 0..jacobian.in_numel {
        tangents[pos] = Tensor::from_buffer(Buffer::one_hot(&in_shape, col, input.dtype())?);
        let (_, column) = jvp(inputs, &tangents, &f)?;
        jacobian.assign_column(col, &column.to_vec_f64());
    }
    let jacobian = jacobian.finish(output.dtype())?;
    Ok((output, jacobian))
}

#[cfg(test)]
#[path = "functional_test.rs"]
mod tests;
