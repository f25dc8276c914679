use super::*;
use crate::autograd::mode::forward_mode;
use crate::error::AutodagError;
use crate::tensor::Tensor;
use crate::types::DType;
use crate::utils::testing::{check_grad_ones, check_tensor_near, create_test_tensor, create_test_tensor_with_grad};
use std::f64::consts::PI;

#[test]
fn test_forward_values() -> Result<(), AutodagError> {
    let x = create_test_tensor(vec![0.0, 1.0], vec![2]);
    check_tensor_near(&exp_op(&x)?, &[2], &[1.0, 1.0f64.exp()], 1e-12);
    check_tensor_near(&sin_op(&x)?, &[2], &[0.0, 1.0f64.sin()], 1e-12);
    check_tensor_near(&cos_op(&x)?, &[2], &[1.0, 1.0f64.cos()], 1e-12);
    check_tensor_near(&tanh_op(&x)?, &[2], &[0.0, 1.0f64.tanh()], 1e-12);
    let y = create_test_tensor(vec![1.0, 1.0f64.exp()], vec![2]);
    check_tensor_near(&ln_op(&y)?, &[2], &[0.0, 1.0], 1e-12);
    Ok(())
}

#[test]
fn test_ln_of_non_positive_is_not_an_error() -> Result<(), AutodagError> {
    let x = create_test_tensor(vec![0.0, -1.0], vec![2]);
    let values = ln_op(&x)?.to_vec_f64();
    assert_eq!(values[0], f64::NEG_INFINITY);
    assert!(values[1].is_nan());
    Ok(())
}

#[test]
fn test_integer_input_is_rejected() {
    let x = Tensor::new_i64(vec![1, 2], vec![2]).unwrap();
    assert!(matches!(
        exp_op(&x),
        Err(AutodagError::UnsupportedDType { dtype: DType::I64, .. })
    ));
}

#[test]
fn test_sin_backward_at_pi() -> Result<(), AutodagError> {
    let x = create_test_tensor_with_grad(vec![PI], vec![]);
    sin_op(&x)?.backward(None)?;
    check_tensor_near(&x.grad().unwrap(), &[], &[-1.0], 1e-12);
    Ok(())
}

#[test]
fn test_tanh_backward_at_zero() -> Result<(), AutodagError> {
    let x = create_test_tensor_with_grad(vec![0.0], vec![]);
    tanh_op(&x)?.backward(None)?;
    check_tensor_near(&x.grad().unwrap(), &[], &[1.0], 1e-12);
    Ok(())
}

#[test]
fn test_check_grad_all() {
    let x = create_test_tensor_with_grad(vec![0.3, 1.2, -0.8, 2.1], vec![2, 2]);
    let positive = create_test_tensor_with_grad(vec![0.3, 1.2, 0.8, 2.1], vec![2, 2]);
    check_grad_ones(|i| exp_op(&i[0]), &[x.clone()]).unwrap();
    check_grad_ones(|i| sin_op(&i[0]), &[x.clone()]).unwrap();
    check_grad_ones(|i| cos_op(&i[0]), &[x.clone()]).unwrap();
    check_grad_ones(|i| tanh_op(&i[0]), &[x]).unwrap();
    check_grad_ones(|i| ln_op(&i[0]), &[positive]).unwrap();
}

#[test]
fn test_tangents_match_derivatives() -> Result<(), AutodagError> {
    let x = create_test_tensor_with_grad(vec![0.5, 2.0], vec![2]);
    x.set_tangent(Some(create_test_tensor(vec![1.0, 2.0], vec![2])));
    let _guard = forward_mode();
    let e = exp_op(&x)?;
    check_tensor_near(
        &e.tangent().unwrap(),
        &[2],
        &[0.5f64.exp(), 2.0 * 2.0f64.exp()],
        1e-12,
    );
    let l = ln_op(&x)?;
    check_tensor_near(&l.tangent().unwrap(), &[2], &[2.0, 1.0], 1e-12);
    let c = cos_op(&x)?;
    check_tensor_near(
        &c.tangent().unwrap(),
        &[2],
        &[-(0.5f64.sin()), -2.0 * 2.0f64.sin()],
        1e-12,
    );
    Ok(())
}
