use super::*;
use crate::utils::testing::{check_tensor_near, create_test_tensor, create_test_tensor_with_grad};
use std::rc::Rc;

#[test]
fn test_clone_op_copies_storage() -> Result<(), AutodagError> {
    let t = create_test_tensor(vec![1.0, 2.0, 3.0], vec![3]);
    let c = clone_op(&t)?;
    check_tensor_near(&c, &[3], &[1.0, 2.0, 3.0], 1e-12);
    assert!(!Rc::ptr_eq(&t.buffer(), &c.buffer()));
    assert_ne!(t.id(), c.id());
    Ok(())
}

#[test]
fn test_clone_op_is_tracked_identity() -> Result<(), AutodagError> {
    let a = create_test_tensor_with_grad(vec![1.0, 2.0], vec![2]);
    let c = a.deep_clone()?;
    assert_eq!(c.grad_fn().unwrap().name(), "clone");
    c.mul(&c)?.sum(None, false)?.backward(None)?;
    check_tensor_near(&a.grad().unwrap(), &[2], &[2.0, 4.0], 1e-12);
    Ok(())
}

#[test]
fn test_clone_op_keeps_dtype() -> Result<(), AutodagError> {
    let t = Tensor::new_i64(vec![4, 5], vec![2])?;
    let c = clone_op(&t)?;
    assert_eq!(c.dtype(), t.dtype());
    Ok(())
}
