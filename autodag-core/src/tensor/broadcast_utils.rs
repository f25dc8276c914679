use crate::buffer::Buffer;
use crate::error::AutodagError;
use crate::ops::reduction::sum::sum_kernel;
use crate::ops::view::reshape::reshape_kernel;
use crate::tensor::utils::pad_shape;

/// Reduces a gradient to `target_shape` by summing along broadcast dimensions.
///
/// The target shape is left-padded with 1s up to the gradient's rank, and
/// every axis where the two disagree is summed. Dimensions are kept only when
/// both ranks are equal. A result that still differs from the target but has
/// the same number of elements is reshaped; anything else is a `ShapeMismatch`.
pub fn reduce_to_shape(grad: &Buffer, target_shape: &[usize]) -> Result<Buffer, AutodagError> {
    let grad_shape = grad.shape();
    if grad_shape == target_shape {
        return Ok(grad.clone());
    }
    let mismatch = || AutodagError::ShapeMismatch {
        expected: target_shape.to_vec(),
        actual: grad_shape.to_vec(),
        operation: "reduce_to_shape".to_string(),
    };
    if target_shape.len() > grad_shape.len() {
        return Err(mismatch());
    }

    let padded = pad_shape(target_shape, grad_shape.len());
    let axes: Vec<usize> = padded
        .iter()
        .zip(grad_shape)
        .enumerate()
        .filter(|(_, (target_dim, grad_dim))| target_dim != grad_dim)
        .map(|(axis, _)| axis)
        .collect();
    let keepdims = target_shape.len() == grad_shape.len();
    let reduced = sum_kernel(grad, Some(&axes), keepdims)?;

    if reduced.shape() == target_shape {
        Ok(reduced)
    } else if reduced.numel() == target_shape.iter().product::<usize>() {
        reshape_kernel(&reduced, target_shape)
    } else {
        Err(mismatch())
    }
}
