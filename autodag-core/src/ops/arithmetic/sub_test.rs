use super::*;
use crate::utils::testing::{check_grad_ones, check_tensor_near, create_test_tensor, create_test_tensor_with_grad};

#[test]
fn test_sub_forward_broadcast() {
    let a = create_test_tensor(vec![10.0, 20.0, 30.0, 40.0], vec![2, 2]);
    let b = create_test_tensor(vec![1.0, 2.0], vec![2]);
    let out = sub_op(&a, &b).unwrap();
    check_tensor_near(&out, &[2, 2], &[9.0, 18.0, 29.0, 38.0], 1e-12);
}

#[test]
fn test_sub_backward_negates_rhs() -> Result<(), AutodagError> {
    let a = create_test_tensor_with_grad(vec![1.0, 2.0], vec![2]);
    let b = create_test_tensor_with_grad(vec![3.0, 4.0], vec![2]);
    let out = sub_op(&a, &b)?;
    out.backward(Some(&create_test_tensor(vec![1.0, 2.0], vec![2])))?;
    check_tensor_near(&a.grad().unwrap(), &[2], &[1.0, 2.0], 1e-12);
    check_tensor_near(&b.grad().unwrap(), &[2], &[-1.0, -2.0], 1e-12);
    Ok(())
}

#[test]
fn test_sub_check_grad_matrix() {
    let a = create_test_tensor_with_grad(vec![0.5, -1.0, 2.5, 3.0], vec![2, 2]);
    let b = create_test_tensor_with_grad(vec![1.5, 0.25], vec![1, 2]);
    check_grad_ones(|i| sub_op(&i[0], &i[1]), &[a, b]).unwrap();
}
