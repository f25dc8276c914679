use super::*;
use crate::utils::testing::{check_grad_ones, check_tensor_near, create_test_tensor, create_test_tensor_with_grad};

#[test]
fn test_div_forward() {
    let a = create_test_tensor(vec![6.0, 8.0], vec![2]);
    let b = create_test_tensor(vec![2.0, 4.0], vec![2]);
    let out = div_op(&a, &b).unwrap();
    check_tensor_near(&out, &[2], &[3.0, 2.0], 1e-12);
}

#[test]
fn test_div_backward_closed_form() -> Result<(), AutodagError> {
    let a = create_test_tensor_with_grad(vec![6.0], vec![1]);
    let b = create_test_tensor_with_grad(vec![2.0], vec![1]);
    div_op(&a, &b)?.backward(None)?;
    check_tensor_near(&a.grad().unwrap(), &[1], &[0.5], 1e-12);
    // -a / b^2 = -6 / 4
    check_tensor_near(&b.grad().unwrap(), &[1], &[-1.5], 1e-12);
    Ok(())
}

#[test]
fn test_div_check_grad_broadcast() {
    let a = create_test_tensor_with_grad(vec![1.0, 2.0, -3.0, 4.0, 0.5, 6.0], vec![2, 3]);
    let b = create_test_tensor_with_grad(vec![1.5, -2.0, 2.5], vec![3]);
    check_grad_ones(|i| div_op(&i[0], &i[1]), &[a, b]).unwrap();
}

#[test]
fn test_div_by_scalar_tensor() {
    let a = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0], vec![3]);
    let s = create_test_tensor_with_grad(vec![4.0], vec![]);
    check_grad_ones(|i| div_op(&i[0], &i[1]), &[a, s]).unwrap();
}
