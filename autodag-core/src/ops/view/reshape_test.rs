use super::*;
use crate::utils::testing::{check_grad_ones, check_tensor_near, create_test_tensor, create_test_tensor_with_grad};
use std::rc::Rc;

#[test]
fn test_reshape_basic() -> Result<(), AutodagError> {
    let t = create_test_tensor((1..=6).map(f64::from).collect(), vec![2, 3]);
    let r = reshape_op(&t, &[3, 2])?;
    check_tensor_near(&r, &[3, 2], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 1e-12);
    let flat = reshape_op(&t, &[6])?;
    assert_eq!(flat.shape(), vec![6]);
    Ok(())
}

#[test]
fn test_reshape_copies() -> Result<(), AutodagError> {
    let t = create_test_tensor(vec![1.0, 2.0], vec![2]);
    let r = reshape_op(&t, &[1, 2])?;
    assert!(!Rc::ptr_eq(&t.buffer(), &r.buffer()));
    Ok(())
}

#[test]
fn test_reshape_numel_mismatch() {
    let t = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    let err = reshape_op(&t, &[3]).unwrap_err();
    assert!(matches!(err, AutodagError::ShapeMismatch { .. }));
}

#[test]
fn test_reshape_scalar_roundtrip() -> Result<(), AutodagError> {
    let t = create_test_tensor(vec![7.0], vec![1, 1]);
    let s = reshape_op(&t, &[])?;
    assert_eq!(s.item()?, 7.0);
    Ok(())
}

#[test]
fn test_reshape_backward() -> Result<(), AutodagError> {
    let a = create_test_tensor_with_grad((0..6).map(f64::from).collect(), vec![2, 3]);
    let r = reshape_op(&a, &[3, 2])?;
    r.backward(Some(&create_test_tensor((10..16).map(f64::from).collect(), vec![3, 2])))?;
    check_tensor_near(
        &a.grad().unwrap(),
        &[2, 3],
        &[10.0, 11.0, 12.0, 13.0, 14.0, 15.0],
        1e-12,
    );
    Ok(())
}

#[test]
fn test_reshape_check_grad() {
    let a = create_test_tensor_with_grad((0..6).map(|v| v as f64 * 0.3).collect(), vec![6]);
    let w = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
    check_grad_ones(|i| reshape_op(&i[0], &[2, 3])?.mul(&w), &[a]).unwrap();
}
