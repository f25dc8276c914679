use super::*;
use crate::utils::testing::{check_grad_ones, check_tensor_near, create_test_tensor, create_test_tensor_with_grad};

#[test]
fn test_squeeze_all_unit_dims() -> Result<(), AutodagError> {
    let t = create_test_tensor(vec![1.0, 2.0, 3.0], vec![1, 3, 1]);
    let s = squeeze_op(&t, None)?;
    check_tensor_near(&s, &[3], &[1.0, 2.0, 3.0], 1e-12);
    Ok(())
}

#[test]
fn test_squeeze_single_dim() -> Result<(), AutodagError> {
    let t = create_test_tensor(vec![1.0, 2.0], vec![1, 2, 1]);
    assert_eq!(squeeze_op(&t, Some(2))?.shape(), vec![1, 2]);
    assert_eq!(squeeze_op(&t, Some(0))?.shape(), vec![2, 1]);
    Ok(())
}

#[test]
fn test_squeeze_to_scalar() -> Result<(), AutodagError> {
    let t = create_test_tensor(vec![4.0], vec![1, 1]);
    let s = squeeze_op(&t, None)?;
    assert_eq!(s.shape(), Vec::<usize>::new());
    assert_eq!(s.item()?, 4.0);
    Ok(())
}

#[test]
fn test_squeeze_rejects_bad_dims() {
    let t = create_test_tensor(vec![1.0, 2.0], vec![1, 2]);
    assert_eq!(
        squeeze_op(&t, Some(2)).unwrap_err(),
        AutodagError::InvalidAxis { axis: 2, rank: 2 }
    );
    assert!(matches!(
        squeeze_op(&t, Some(1)),
        Err(AutodagError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_squeeze_backward_restores_shape() -> Result<(), AutodagError> {
    let a = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0], vec![3, 1]);
    let s = a.squeeze(Some(1))?;
    s.backward(Some(&create_test_tensor(vec![5.0, 6.0, 7.0], vec![3])))?;
    check_tensor_near(&a.grad().unwrap(), &[3, 1], &[5.0, 6.0, 7.0], 1e-12);
    Ok(())
}

#[test]
fn test_squeeze_check_grad() {
    let a = create_test_tensor_with_grad(vec![0.1, -0.4, 0.7, 1.2], vec![1, 4, 1]);
    let w = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![4]);
    check_grad_ones(|i| squeeze_op(&i[0], None)?.mul(&w), &[a]).unwrap();
}
