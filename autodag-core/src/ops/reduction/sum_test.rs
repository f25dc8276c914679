use super::*;
use crate::autograd::mode::forward_mode;
use crate::types::DType;
use crate::utils::testing::{check_grad_ones, check_tensor_near, create_test_tensor, create_test_tensor_with_grad};

fn matrix() -> Tensor {
    create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3])
}

#[test]
fn test_sum_all() -> Result<(), AutodagError> {
    let s = sum_op(&matrix(), None, false)?;
    check_tensor_near(&s, &[], &[21.0], 1e-12);
    let kept = sum_op(&matrix(), None, true)?;
    check_tensor_near(&kept, &[1, 1], &[21.0], 1e-12);
    Ok(())
}

#[test]
fn test_sum_axes() -> Result<(), AutodagError> {
    check_tensor_near(&sum_op(&matrix(), Some(&[0]), false)?, &[3], &[5.0, 7.0, 9.0], 1e-12);
    check_tensor_near(&sum_op(&matrix(), Some(&[1]), true)?, &[2, 1], &[6.0, 15.0], 1e-12);
    // Duplicates are ignored.
    check_tensor_near(&sum_op(&matrix(), Some(&[1, 1]), false)?, &[2], &[6.0, 15.0], 1e-12);
    // An empty axis list leaves the tensor unchanged.
    check_tensor_near(&sum_op(&matrix(), Some(&[]), false)?, &[2, 3], &matrix().to_vec_f64(), 1e-12);
    Ok(())
}

#[test]
fn test_sum_invalid_axis() {
    assert_eq!(
        sum_op(&matrix(), Some(&[2]), false).unwrap_err(),
        AutodagError::InvalidAxis { axis: 2, rank: 2 }
    );
}

#[test]
fn test_sum_integer_kernel() -> Result<(), AutodagError> {
    let t = Tensor::new_i64(vec![1, 2, 3, 4], vec![2, 2])?;
    let s = sum_op(&t, Some(&[0]), false)?;
    assert_eq!(s.dtype(), DType::I64);
    assert_eq!(s.to_vec_f64(), vec![4.0, 6.0]);
    Ok(())
}

#[test]
fn test_sum_backward_ones() -> Result<(), AutodagError> {
    let a = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0, 4.0], vec![4]);
    sum_op(&a, None, false)?.backward(None)?;
    check_tensor_near(&a.grad().unwrap(), &[4], &[1.0; 4], 1e-12);
    Ok(())
}

#[test]
fn test_sum_backward_axis_broadcasts_seed() -> Result<(), AutodagError> {
    let a = create_test_tensor_with_grad(vec![0.0; 6], vec![2, 3]);
    let s = sum_op(&a, Some(&[1]), false)?;
    s.backward(Some(&create_test_tensor(vec![2.0, -1.0], vec![2])))?;
    check_tensor_near(&a.grad().unwrap(), &[2, 3], &[2.0, 2.0, 2.0, -1.0, -1.0, -1.0], 1e-12);
    Ok(())
}

#[test]
fn test_sum_check_grad() {
    let a = create_test_tensor_with_grad((0..24).map(|v| v as f64 * 0.25).collect(), vec![2, 3, 4]);
    let w = create_test_tensor((0..6).map(f64::from).collect(), vec![2, 3]);
    check_grad_ones(|i| sum_op(&i[0], Some(&[2]), false)?.mul(&w), &[a.clone()]).unwrap();
    check_grad_ones(|i| sum_op(&i[0], Some(&[0, 2]), true), &[a]).unwrap();
}

#[test]
fn test_sum_tangent() -> Result<(), AutodagError> {
    let a = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    a.set_tangent(Some(create_test_tensor(vec![1.0, 0.0, 0.0, 1.0], vec![2, 2])));
    let _guard = forward_mode();
    let s = sum_op(&a, Some(&[0]), false)?;
    check_tensor_near(&s.tangent().unwrap(), &[2], &[1.0, 1.0], 1e-12);
    Ok(())
}
