use crate::error::AutodagError;
use std::cmp::max;

/// Determines the output shape resulting from broadcasting two input shapes.
///
/// Follows NumPy/PyTorch broadcasting rules:
/// 1. If the shapes have different numbers of dimensions, prepend 1s to the shorter shape.
/// 2. Compare dimensions element-wise from right to left.
/// 3. Dimensions are compatible if they are equal, or one of them is 1.
/// 4. The resulting dimension size is the maximum of the two compared dimensions.
pub fn broadcast_shapes(shape_a: &[usize], shape_b: &[usize]) -> Result<Vec<usize>, AutodagError> {
    let rank_a = shape_a.len();
    let rank_b = shape_b.len();
    let max_rank = max(rank_a, rank_b);
    let mut result_shape = vec![0; max_rank];

    for i in 0..max_rank {
        let dim_a = shape_a.get(rank_a.wrapping_sub(1 + i)).copied().unwrap_or(1);
        let dim_b = shape_b.get(rank_b.wrapping_sub(1 + i)).copied().unwrap_or(1);

        result_shape[max_rank - 1 - i] = if dim_a == dim_b || dim_b == 1 {
            dim_a
        } else if dim_a == 1 {
            dim_b
        } else {
            return Err(AutodagError::BroadcastError {
                shape1: shape_a.to_vec(),
                shape2: shape_b.to_vec(),
            });
        };
    }
    Ok(result_shape)
}

/// Left-pads `shape` with 1s up to `rank`. Shapes already at or above `rank` are returned as is.
pub fn pad_shape(shape: &[usize], rank: usize) -> Vec<usize> {
    let mut padded = vec![1; rank.saturating_sub(shape.len())];
    padded.extend_from_slice(shape);
    padded
}

/// Checks that `axes` is a permutation of `0..rank`.
pub fn validate_permutation(axes: &[usize], rank: usize) -> Result<(), AutodagError> {
    let mut seen = vec![false; rank];
    let valid = axes.len() == rank
        && axes.iter().all(|&axis| {
            if axis >= rank || seen[axis] {
                return false;
            }
            seen[axis] = true;
            true
        });
    if valid {
        Ok(())
    } else {
        Err(AutodagError::InvalidPermutation {
            dims: axes.to_vec(),
            rank,
        })
    }
}

/// Inverse of a permutation: `inverse[axes[i]] == i`.
pub fn inverse_permutation(axes: &[usize]) -> Vec<usize> {
    let mut inverse = vec![0; axes.len()];
    for (i, &axis) in axes.iter().enumerate() {
        inverse[axis] = i;
    }
    inverse
}
